use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::errors::ServerError;
use super::handler::handle_connection;
use super::types::ServeContext;
use crate::config::ServerConfig;
use crate::events;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Listening socket plus the connection limit it is served with.
#[derive(Debug)]
pub struct HttpServer {
    listener: TcpListener,
    max_connections: usize,
}

impl HttpServer {
    /// Resolve `bind:port`, bind with `SO_REUSEADDR`, and listen.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let addr = config.address();
        let resolved = tokio::net::lookup_host(&addr)
            .await
            .map_err(|e| ServerError::InvalidAddress {
                addr: addr.clone(),
                message: e.to_string(),
            })?
            .next()
            .ok_or_else(|| ServerError::InvalidAddress {
                addr: addr.clone(),
                message: "address did not resolve".to_string(),
            })?;

        let listener = listen(resolved, config.backlog).map_err(|source| {
            ServerError::BindFailed {
                addr: addr.clone(),
                source,
            }
        })?;

        events::log_server_bound(resolved, config.backlog, config.max_connections);

        Ok(Self {
            listener,
            max_connections: config.max_connections,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` is cancelled.
    ///
    /// A connection permit is taken before each accept, so once
    /// `max_connections` handlers are running new clients wait in the listen
    /// backlog. Handlers are spawned and not joined. The listener is closed
    /// when this returns.
    pub async fn run(self, ctx: Arc<ServeContext>, shutdown: CancellationToken) {
        let HttpServer {
            listener,
            max_connections,
        } = self;
        let permits = Arc::new(Semaphore::new(max_connections));
        let mut accepted: u64 = 0;

        events::log_server_started();

        loop {
            let permit = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                permit = permits.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let (stream, peer) = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                result = listener.accept() => match result {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(event = "core.http.accept_failed", error = %e);
                        tokio::select! {
                            biased;
                            _ = shutdown.cancelled() => break,
                            _ = tokio::time::sleep(ACCEPT_BACKOFF) => {}
                        }
                        continue;
                    }
                },
            };

            accepted += 1;
            let ctx = ctx.clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move {
                handle_connection(stream, peer, ctx, shutdown).await;
                drop(permit);
            });
        }

        drop(listener);
        events::log_server_stopped(accepted);
    }
}

fn listen(addr: SocketAddr, backlog: u32) -> std::io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(backlog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback(port: u16) -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1".to_string(),
            port,
            ..ServerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let server = HttpServer::bind(&loopback(0)).await.unwrap();
        let addr = server.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    // SO_REUSEADDR still refuses a second listener on the same port on unix.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_bind_conflict_reports_bind_failed() {
        let first = HttpServer::bind(&loopback(0)).await.unwrap();
        let port = first.local_addr().unwrap().port();

        match HttpServer::bind(&loopback(port)).await {
            Err(ServerError::BindFailed { addr, .. }) => {
                assert_eq!(addr, format!("127.0.0.1:{port}"));
            }
            other => panic!("expected BindFailed, got {other:?}"),
        }
    }
}
