//! Server module
//!
//! Owns the listener and the serial accept loop. `Server::bind` is the start
//! boundary, `Server::run` returns once the shutdown future resolves and the
//! listener is closed.

mod connection;
mod listener;
mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::logger;

pub use signal::shutdown_signal;

pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind the configured address. Must be called from within a Tokio runtime.
    pub fn bind(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let addr = config.get_socket_addr()?;
        let listener = listener::create_listener(addr)?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config)),
            local_addr,
        })
    }

    /// Actual bound address (resolves port 0)
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept and serve connections one at a time until `shutdown` resolves.
    ///
    /// A connection being served when shutdown is requested finishes first.
    /// Per-connection failures are logged and never end the loop.
    pub async fn run<F>(self, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => break,

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            connection::serve_connection(stream, peer_addr, &self.state).await;
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }
            }
        }

        drop(self.listener);
        logger::log_stopped(&self.local_addr);
        Ok(())
    }
}
