//! Catalog module
//!
//! The JSON document of albums, songs and artists, how it is loaded, and how
//! it is searched.

mod model;
mod search;
mod store;

pub use model::ResourceKind;
pub use search::{normalize_term, search, SearchResults};
pub use store::{CatalogError, CatalogStore};
