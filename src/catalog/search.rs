//! Free-text search over songs and albums

use std::collections::HashMap;

use serde::Serialize;

use super::model::{Catalog, Record};

/// Matches in catalog order, songs and albums kept apart
#[derive(Debug, Default, Serialize)]
pub struct SearchResults<'a> {
    pub songs: Vec<&'a Record>,
    pub albums: Vec<&'a Record>,
}

/// Trimmed, lowercased search term; `None` when nothing is left to search for
pub fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    (!term.is_empty()).then_some(term)
}

/// Case-insensitive substring match on a record's own title or its artist's name.
///
/// `term` must already be normalized. Artists are only used to resolve names;
/// they never appear in the results. A record without a title is matched on
/// its artist alone.
pub fn search<'a>(catalog: &'a Catalog, term: &str) -> SearchResults<'a> {
    let artist_names: HashMap<&str, String> = catalog
        .artists
        .iter()
        .filter_map(|artist| Some((artist.id()?, artist.name().to_lowercase())))
        .collect();

    let matches = |record: &Record| {
        record.title().to_lowercase().contains(term)
            || record
                .artist_id()
                .and_then(|id| artist_names.get(id))
                .is_some_and(|name| name.contains(term))
    };

    SearchResults {
        songs: catalog
            .songs
            .iter()
            .filter(|song| matches(*song))
            .collect(),
        albums: catalog
            .albums
            .iter()
            .filter(|album| matches(*album))
            .collect(),
    }
}
