//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! classification, dispatch, and access logging.

use crate::config::AppState;
use crate::handler::{catalog, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Route};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw, still percent-encoded path
    pub path: &'a str,
    /// Raw query string without the leading `?`
    pub query: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let response = match *method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path: uri.path(),
                query: uri.query(),
                is_head: *method == Method::HEAD,
            };
            dispatch(&ctx, &state).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {}", uri.path()));
            http::build_405_response()
        }
    };

    if state.access_log() {
        log_access(&req, &response, peer_addr, started, &state);
    }
    Ok(response)
}

/// Classify the path and run the matching handler
pub async fn dispatch(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match routing::classify(ctx.path, ctx.query, state.static_folder()) {
        Route::Search { term } => catalog::search(ctx, state, &term).await,
        Route::List(kind) => catalog::list(ctx, state, kind).await,
        Route::Entity { kind, id } => catalog::entity(ctx, state, kind, id).await,
        Route::StaticFile => static_files::serve(ctx, state).await,
        Route::NotFound => {
            logger::log_debug(&format!("No route for {}", ctx.path));
            http::build_error_response(StatusCode::NOT_FOUND, "Not Found", ctx.is_head)
        }
    }
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = if req.version() == hyper::Version::HTTP_10 {
        "1.0"
    } else {
        "1.1"
    }
    .to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    const CATALOG: &str = r#"{
        "albums": [
            {"id": "album-1", "title": "A Night At The Opera", "artistID": "artist-1",
             "artworkURL": "albums/A Night At The Opera/cover.jpg"},
            {"id": "album-2", "title": "Random Access Memories", "artistID": "artist-2"}
        ],
        "songs": [
            {"id": "song-1", "title": "Bohemian Rhapsody", "artistID": "artist-1", "albumID": "album-1"},
            {"id": "song-2", "title": "Get Lucky", "artistID": "artist-2", "albumID": "album-2"}
        ],
        "artists": [
            {"id": "artist-1", "name": "Queen"},
            {"id": "artist-2", "name": "Daft Punk"}
        ]
    }"#;

    struct Fixture {
        _dir: tempfile::TempDir,
        state: AppState,
    }

    fn fixture(catalog: Option<&str>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        if let Some(doc) = catalog {
            std::fs::write(dir.path().join("music_catalog.json"), doc).unwrap();
        }
        let album = dir.path().join("albums/A Night At The Opera");
        std::fs::create_dir_all(&album).unwrap();
        std::fs::write(album.join("cover.jpg"), b"\xff\xd8cover").unwrap();

        let state = AppState::new(&Config::for_root(dir.path()));
        Fixture { _dir: dir, state }
    }

    async fn get(
        state: &AppState,
        path: &str,
        query: Option<&str>,
    ) -> (StatusCode, hyper::HeaderMap, Bytes) {
        let ctx = RequestContext {
            path,
            query,
            is_head: false,
        };
        let response = dispatch(&ctx, state).await;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    fn json(body: &Bytes) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_search_example() {
        let f = fixture(Some(CATALOG));
        let (status, headers, body) = get(&f.state, "/search", Some("q=queen")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");

        let value = json(&body);
        assert_eq!(value["albums"][0]["id"], "album-1");
        assert_eq!(value["songs"][0]["id"], "song-1");
        assert_eq!(value["albums"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_queen_body() {
        let f = fixture(Some(
            r#"{
                "artists": [{"id": "artist-1", "name": "Queen"}],
                "albums": [{"id": "album-1", "title": "A Night At The Opera", "artistID": "artist-1"}]
            }"#,
        ));
        let (status, _, body) = get(&f.state, "/search", Some("q=queen")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"songs":[],"albums":[{"id":"album-1","title":"A Night At The Opera","artistID":"artist-1"}]}"#
        );
    }

    #[tokio::test]
    async fn test_incomplete_record_does_not_break_catalog() {
        let f = fixture(Some(
            r#"{
                "albums": [{"id": "album-1", "artistID": "artist-1"}],
                "songs": [{"artistID": null, "title": "Intro", "id": "song-1", "duration": 61}],
                "artists": [{"id": "artist-1", "name": "Queen"}]
            }"#,
        ));

        let (status, _, body) = get(&f.state, "/artists", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"[{"id":"artist-1","name":"Queen"}]"#);

        let (status, _, body) = get(&f.state, "/albums/album-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":"album-1","artistID":"artist-1"}"#);

        // stored records come back untouched, null fields and key order included
        let (status, _, body) = get(&f.state, "/songs/song-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            r#"{"artistID":null,"title":"Intro","id":"song-1","duration":61}"#
        );

        let (status, _, body) = get(&f.state, "/search", Some("q=queen")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["albums"][0]["id"], "album-1");
    }

    #[tokio::test]
    async fn test_empty_search_skips_catalog() {
        // no catalog file at all, yet an empty term still succeeds
        let f = fixture(None);
        let (status, _, body) = get(&f.state, "/search", Some("q=%20%20")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"songs":[],"albums":[]}"#);
    }

    #[tokio::test]
    async fn test_list_preserves_order_and_fields() {
        let f = fixture(Some(CATALOG));
        let (status, _, body) = get(&f.state, "/albums", None).await;
        assert_eq!(status, StatusCode::OK);
        let value = json(&body);
        assert_eq!(value[0]["id"], "album-1");
        assert_eq!(value[1]["id"], "album-2");
        assert_eq!(value[0]["artworkURL"], "albums/A Night At The Opera/cover.jpg");

        let (_, _, again) = get(&f.state, "/albums", None).await;
        assert_eq!(body, again);
    }

    #[tokio::test]
    async fn test_entity_lookup() {
        let f = fixture(Some(CATALOG));
        for (path, id) in [
            ("/albums/album-2", "album-2"),
            ("/songs/song-1", "song-1"),
            ("/artists/artist-2", "artist-2"),
        ] {
            let (status, _, body) = get(&f.state, path, None).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert_eq!(json(&body)["id"], id);
        }
    }

    #[tokio::test]
    async fn test_entity_not_found_message() {
        let f = fixture(Some(CATALOG));
        let (status, headers, body) = get(&f.state, "/songs/song-9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(body, "Song with ID song-9 not found");

        let (_, _, body) = get(&f.state, "/artists/nobody", None).await;
        assert_eq!(body, "Artist with ID nobody not found");
    }

    #[tokio::test]
    async fn test_missing_catalog_is_500_but_static_still_served() {
        let f = fixture(None);
        for (path, query) in [
            ("/albums", None),
            ("/songs/song-1", None),
            ("/search", Some("q=queen")),
        ] {
            let (status, _, body) = get(&f.state, path, query).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
            assert_eq!(body, "Data file not found");
        }

        let (status, headers, body) =
            get(&f.state, "/albums/A%20Night%20At%20The%20Opera/cover.jpg", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["Content-Type"], "image/jpeg");
        assert_eq!(headers["Content-Length"], "7");
        assert_eq!(body, &b"\xff\xd8cover"[..]);
    }

    #[tokio::test]
    async fn test_malformed_catalog_is_500() {
        let f = fixture(Some(r#"{"albums": [ {"id": 1"#));
        let (status, _, body) = get(&f.state, "/artists", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error parsing data file");
    }

    #[tokio::test]
    async fn test_static_misses_and_traversal_are_404() {
        let f = fixture(Some(CATALOG));
        for path in [
            "/albums/A%20Night%20At%20The%20Opera/missing.jpg",
            "/albums/A%20Night%20At%20The%20Opera/..%2F..%2Fmusic_catalog.json",
            "/albums/x/../../music_catalog.json",
        ] {
            let (status, _, body) = get(&f.state, path, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
            assert_eq!(body, "File not found");
        }
    }

    #[tokio::test]
    async fn test_unknown_routes_are_404() {
        let f = fixture(Some(CATALOG));
        for path in ["/", "/playlists", "/songs/a/b", "/music_catalog.json"] {
            let (status, _, body) = get(&f.state, path, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
            assert_eq!(body, "Not Found");
        }
    }

    #[tokio::test]
    async fn test_methods() {
        let f = fixture(Some(CATALOG));
        let state = Arc::new(f.state);
        let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();

        let head = Request::head("/artists").body(()).unwrap();
        let response = handle_request(head, Arc::clone(&state), peer).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_ne!(response.headers()["Content-Length"], "0");
        assert!(response.into_body().collect().await.unwrap().to_bytes().is_empty());

        let options = Request::options("/albums").body(()).unwrap();
        let response = handle_request(options, Arc::clone(&state), peer).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let post = Request::post("/albums").body(()).unwrap();
        let response = handle_request(post, state, peer).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
