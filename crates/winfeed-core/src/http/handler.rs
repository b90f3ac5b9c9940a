use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::errors::RequestError;
use super::request::{RequestHead, read_request_head};
use super::response::Response;
use super::types::ServeContext;
use crate::errors::WinfeedError;

/// Serve exactly one request on `stream`, then close it.
///
/// Reading the request head is bounded by `ctx.max_header_bytes` and
/// `ctx.request_timeout`. Writing the response is bounded by
/// `ctx.write_timeout`. Both are abandoned if `shutdown` fires. Any failure
/// closes the connection, without a response if it happens while reading.
pub async fn handle_connection<S>(
    mut stream: S,
    peer: SocketAddr,
    ctx: Arc<ServeContext>,
    shutdown: CancellationToken,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    debug!(event = "core.http.connection_accepted", peer = %peer);

    let read = tokio::time::timeout(
        ctx.request_timeout,
        read_request_head(&mut stream, ctx.max_header_bytes),
    );
    let head = tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
            debug!(event = "core.http.connection_shutdown", peer = %peer);
            return;
        }
        result = read => match result {
            Ok(Ok(head)) => head,
            Ok(Err(e)) => {
                log_request_error(&e, peer);
                return;
            }
            Err(_) => {
                log_request_error(&RequestError::Timeout, peer);
                return;
            }
        },
    };

    let request = match RequestHead::parse(&head) {
        Ok(request) => request,
        Err(e) => {
            log_request_error(&e, peer);
            return;
        }
    };

    let response = dispatch(&request, &ctx);
    let write = tokio::time::timeout(ctx.write_timeout, response.write_to(&mut stream));
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => {
            debug!(event = "core.http.connection_shutdown", peer = %peer);
            return;
        }
        result = write => match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log_request_error(&RequestError::Io(e), peer);
                return;
            }
            Err(_) => {
                log_request_error(&RequestError::Timeout, peer);
                return;
            }
        },
    }
    let _ = stream.shutdown().await;

    debug!(
        event = "core.http.response_sent",
        peer = %peer,
        method = request.method(),
        path = request.path(),
        status = response.status(),
        bytes = response.body().len()
    );
}

/// Pick the response for a parsed request. The query string plays no part.
pub fn dispatch(request: &RequestHead, ctx: &ServeContext) -> Response {
    if request.path().starts_with(&ctx.image_path) {
        match ctx.store.snapshot() {
            Some(frame) => Response::Image(frame),
            None => Response::NoFrame,
        }
    } else {
        Response::Page(ctx.page.html())
    }
}

fn log_request_error(e: &RequestError, peer: SocketAddr) {
    match e {
        RequestError::HeaderTooLarge { .. } | RequestError::MalformedRequestLine { .. } => {
            warn!(
                event = "core.http.request_rejected",
                peer = %peer,
                error_code = e.error_code(),
                error = %e
            );
        }
        RequestError::Io(_) | RequestError::Incomplete | RequestError::Timeout => {
            debug!(
                event = "core.http.connection_dropped",
                peer = %peer,
                error_code = e.error_code(),
                error = %e
            );
        }
    }
}
