// Connection handling module
// Serves a single TCP connection to completion

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one connection and return once it is closed.
///
/// Keep-alive is off, so each connection carries exactly one request. The
/// whole exchange is bounded by `performance.request_timeout`; a client that
/// stalls past it is dropped so the accept loop can move on.
pub async fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) {
    let io = TokioIo::new(stream);
    let timeout = Duration::from_secs(state.config.performance.request_timeout);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let state = Arc::clone(state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
            handler::handle_request(req, Arc::clone(&state), peer_addr)
        }),
    );

    match tokio::time::timeout(timeout, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => logger::log_warning(&format!(
            "Connection from {peer_addr} timed out after {} seconds",
            timeout.as_secs()
        )),
    }
}
