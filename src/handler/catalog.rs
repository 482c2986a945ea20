//! Catalog-backed handlers: search, list and entity lookup
//!
//! Each handler loads the catalog fresh; a missing or broken document turns
//! into the same 500 response for all of them.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::catalog::{self, CatalogError, ResourceKind, SearchResults};
use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;

/// `/search?q=<term>`
pub async fn search(
    ctx: &RequestContext<'_>,
    state: &AppState,
    raw_term: &str,
) -> Response<Full<Bytes>> {
    let Some(term) = catalog::normalize_term(raw_term) else {
        logger::log_debug("Search query is empty, returning no results");
        return http::build_json_response(Some(&SearchResults::default()), ctx.is_head);
    };
    logger::log_debug(&format!("Search query: '{term}'"));

    let catalog = match state.catalog.load().await {
        Ok(catalog) => catalog,
        Err(err) => return catalog_unavailable(&err, state, ctx.is_head),
    };

    let results = catalog::search(&catalog, &term);
    logger::log_debug(&format!(
        "Found {} songs, {} albums",
        results.songs.len(),
        results.albums.len()
    ));
    http::build_json_response(Some(&results), ctx.is_head)
}

/// `/albums`, `/songs`, `/artists`
pub async fn list(
    ctx: &RequestContext<'_>,
    state: &AppState,
    kind: ResourceKind,
) -> Response<Full<Bytes>> {
    match state.catalog.load().await {
        Ok(catalog) => http::build_json_response(Some(catalog.records(kind)), ctx.is_head),
        Err(err) => catalog_unavailable(&err, state, ctx.is_head),
    }
}

/// `/{kind}/{id}`
pub async fn entity(
    ctx: &RequestContext<'_>,
    state: &AppState,
    kind: ResourceKind,
    id: &str,
) -> Response<Full<Bytes>> {
    let catalog = match state.catalog.load().await {
        Ok(catalog) => catalog,
        Err(err) => return catalog_unavailable(&err, state, ctx.is_head),
    };

    match catalog.find(kind, id) {
        Some(record) => http::build_json_response(Some(record), ctx.is_head),
        None => http::build_error_response(
            StatusCode::NOT_FOUND,
            &format!("{} with ID {id} not found", kind.singular()),
            ctx.is_head,
        ),
    }
}

fn catalog_unavailable(err: &CatalogError, state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    logger::log_error(&format!(
        "{err} ({}): {}",
        state.catalog.path().display(),
        err.detail()
    ));
    http::build_error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string(), is_head)
}
