//! Routing module
//!
//! Maps a request path and query onto one of the API's route families.

mod route;

pub use route::{classify, Route};
