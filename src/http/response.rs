//! HTTP response building module
//!
//! Every response carries `Access-Control-Allow-Origin: *` so a browser or
//! simulator client on another origin can read it.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

const ALLOW_ORIGIN: &str = "*";
const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build a JSON response; `None` is the "not found" sentinel and yields 404
pub fn build_json_response<T: Serialize + ?Sized>(
    payload: Option<&T>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let Some(payload) = payload else {
        return build_error_response(StatusCode::NOT_FOUND, "Not Found", is_head);
    };

    match serde_json::to_vec(payload) {
        Ok(json) => build_body_response(
            StatusCode::OK,
            "application/json",
            Bytes::from(json),
            is_head,
        ),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error serializing response",
                is_head,
            )
        }
    }
}

/// Build a file response with an exact Content-Length
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    build_body_response(StatusCode::OK, content_type, Bytes::from(data), is_head)
}

/// Build an error response with a plain-text reason
pub fn build_error_response(
    status: StatusCode,
    reason: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    build_body_response(
        status,
        "text/plain; charset=utf-8",
        Bytes::from(reason.to_owned()),
        is_head,
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", ALLOWED_METHODS)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
        .header("Access-Control-Allow-Headers", "Content-Type")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut response = build_error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        false,
    );
    response
        .headers_mut()
        .insert("Allow", hyper::header::HeaderValue::from_static(ALLOWED_METHODS));
    response
}

/// Shared builder; HEAD keeps the headers (length included) but drops the body
fn build_body_response(
    status: StatusCode,
    content_type: &str,
    data: Bytes,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
