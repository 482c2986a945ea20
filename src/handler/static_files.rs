//! Static file serving module
//!
//! Serves media assets (cover art, audio) from the configured static folder.
//! Paths are percent-decoded, then canonicalized and required to stay inside
//! the canonical static folder.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;

/// `/{static_folder}/...`
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let root = &state.config.catalog.root_dir;
    let Some((file_path, content_type)) = locate(ctx.path, root, state.static_folder()).await
    else {
        return http::build_error_response(StatusCode::NOT_FOUND, "File not found", ctx.is_head);
    };

    match fs::read(&file_path).await {
        Ok(data) => {
            logger::log_debug(&format!(
                "Serving {} ({} bytes, {content_type})",
                file_path.display(),
                data.len()
            ));
            http::build_file_response(data, content_type, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            http::build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading file",
                ctx.is_head,
            )
        }
    }
}

/// Resolve a request path to a regular file inside `root/static_folder`
///
/// Returns the canonical file path and the content type guessed from the
/// requested name, or `None` for anything that should be a 404.
pub async fn locate(
    request_path: &str,
    root: &Path,
    static_folder: &str,
) -> Option<(PathBuf, &'static str)> {
    let encoded = request_path.strip_prefix('/').unwrap_or(request_path);
    let Ok(decoded) = percent_decode_str(encoded).decode_utf8() else {
        logger::log_debug(&format!("Path is not valid UTF-8 once decoded: {request_path}"));
        return None;
    };
    logger::log_debug(&format!("Static file request for decoded path: {decoded}"));

    let relative = Path::new(&*decoded);
    if relative.components().next() != Some(Component::Normal(OsStr::new(static_folder))) {
        logger::log_debug(&format!(
            "Decoded path does not start with static folder '{static_folder}'"
        ));
        return None;
    }

    let static_root = match root.join(static_folder).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static folder not found or inaccessible '{}': {e}",
                root.join(static_folder).display()
            ));
            return None;
        }
    };

    // Missing files are routine 404s, not worth a warning
    let Ok(canonical) = root.join(relative).canonicalize() else {
        logger::log_debug(&format!("File does not exist: {decoded}"));
        return None;
    };
    if !canonical.starts_with(&static_root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    match fs::metadata(&canonical).await {
        Ok(meta) if meta.is_file() => Some((canonical, mime::content_type_for(relative))),
        _ => {
            logger::log_debug(&format!("Not a regular file: {}", canonical.display()));
            None
        }
    }
}
