//! Request handler module
//!
//! Responsible for request routing dispatch and the catalog and static-file
//! handlers behind it.

pub mod catalog;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
