//! Catalog document model
//!
//! Records are kept exactly as they appear in the document. The few fields
//! the server reasons about are read through accessors, so an incomplete
//! record never stops the rest of the catalog from being served.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three resource families exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Albums,
    Songs,
    Artists,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Albums, Self::Songs, Self::Artists];

    /// Match a URL path segment (`albums`, `songs`, `artists`)
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.segment() == segment)
    }

    pub const fn segment(self) -> &'static str {
        match self {
            Self::Albums => "albums",
            Self::Songs => "songs",
            Self::Artists => "artists",
        }
    }

    /// Capitalized singular name used in error messages
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Albums => "Album",
            Self::Songs => "Song",
            Self::Artists => "Artist",
        }
    }
}

/// One album, song or artist, serialized back with every field in document order
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// String value of `key`; absent, null and non-string values read as `None`
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Album or song title, empty when missing
    pub fn title(&self) -> &str {
        self.str_field("title").unwrap_or_default()
    }

    /// Artist name, empty when missing
    pub fn name(&self) -> &str {
        self.str_field("name").unwrap_or_default()
    }

    pub fn artist_id(&self) -> Option<&str> {
        self.str_field("artistID")
    }
}

/// The whole catalog document; a missing collection reads as empty
#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub albums: Vec<Record>,
    #[serde(default)]
    pub songs: Vec<Record>,
    #[serde(default)]
    pub artists: Vec<Record>,
}

impl Catalog {
    pub fn records(&self, kind: ResourceKind) -> &[Record] {
        match kind {
            ResourceKind::Albums => &self.albums,
            ResourceKind::Songs => &self.songs,
            ResourceKind::Artists => &self.artists,
        }
    }

    /// First record of `kind` whose id equals `id` exactly
    pub fn find(&self, kind: ResourceKind, id: &str) -> Option<&Record> {
        self.records(kind)
            .iter()
            .find(|record| record.id() == Some(id))
    }
}
