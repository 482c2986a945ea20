//! Route classification
//!
//! Each request path maps to exactly one [`Route`] by looking at how many
//! segments it has and what the first one is. The arms are disjoint, so the
//! result never depends on the order they are written in.

use crate::catalog::ResourceKind;

/// Where a request goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/search?q=<term>`, term still raw (not trimmed or lowercased)
    Search { term: String },
    /// `/albums`, `/songs`, `/artists`
    List(ResourceKind),
    /// `/{kind}/{id}`
    Entity { kind: ResourceKind, id: &'a str },
    /// `/{static_folder}/...`
    StaticFile,
    NotFound,
}

/// Classify a request.
///
/// `path` is the raw (still percent-encoded) URI path, `query` the raw query
/// string without the leading `?`.
///
/// When the static folder shares its name with a resource, API routes win for
/// one and two segment paths; only deeper paths reach the folder.
pub fn classify<'a>(path: &'a str, query: Option<&str>, static_folder: &str) -> Route<'a> {
    let segments: Vec<&'a str> = path.trim_matches('/').split('/').collect();
    let resource = segments.first().copied().and_then(ResourceKind::from_segment);

    match (segments.as_slice(), resource) {
        (["search"], None) if path == "/search" => {
            search_term(query).map_or(Route::NotFound, |term| Route::Search { term })
        }
        ([_], Some(kind)) if is_exact_list_path(path, kind) => Route::List(kind),
        ([_, id], Some(kind)) => Route::Entity { kind, id: *id },
        ([first, rest @ ..], resource)
            if *first == static_folder
                && !rest.is_empty()
                && (resource.is_none() || rest.len() > 1) =>
        {
            Route::StaticFile
        }
        _ => Route::NotFound,
    }
}

fn is_exact_list_path(path: &str, kind: ResourceKind) -> bool {
    path.strip_prefix('/') == Some(kind.segment())
}

/// First `q` parameter, form-url-decoded. An empty value still counts as present.
fn search_term(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}
