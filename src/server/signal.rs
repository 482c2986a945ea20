// Signal handling module
//
// - SIGINT (Ctrl+C): graceful shutdown
// - SIGTERM:         graceful shutdown

use crate::logger;

/// Resolve once the process is asked to stop, logging which signal did it
pub async fn shutdown_signal() {
    let reason = wait_for_signal().await;
    logger::log_shutdown(reason);
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::SignalKind;

    tokio::select! {
        () = recv_or_pending(SignalKind::interrupt(), "SIGINT") => "SIGINT received",
        () = recv_or_pending(SignalKind::terminate(), "SIGTERM") => "SIGTERM received",
    }
}

/// Wait for `kind`; if it cannot be registered, never resolve
#[cfg(unix)]
async fn recv_or_pending(kind: tokio::signal::unix::SignalKind, name: &str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            logger::log_error(&format!("Failed to register {name} handler: {e}"));
            std::future::pending::<()>().await;
        }
    }
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
    "Ctrl+C received"
}
