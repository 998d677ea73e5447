//! Gemini-style protocol server
//!
//! Each connection carries exactly one request: the client sends a URL line,
//! the server answers with a status header and a body, then closes. Bodies
//! that are streams are written chunk by chunk with a flush after each, so
//! playback reaches the client as it is produced.
//!
//! Transport security is out of scope; the listener speaks plain TCP.

pub mod request;
pub mod response;

pub use request::{parse_request, RequestError, MAX_REQUEST_LEN};
pub use response::{Body, Response, Status};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::time;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::handlers::App;

/// Accept connections forever, serving each on its own task.
pub async fn run(listener: TcpListener, app: Arc<App>, read_timeout: Duration) {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                // usually fd exhaustion; back off instead of spinning
                warn!(error = %e, "accept failed");
                time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };

        let app = Arc::clone(&app);
        let span = info_span!("conn", %peer);
        tokio::spawn(
            async move {
                if let Err(e) = handle_connection(stream, &app, read_timeout).await {
                    debug!(error = %e, "connection closed early");
                }
            }
            .instrument(span),
        );
    }
}

/// Serve a single request on `stream`.
///
/// Returns an error only for I/O failures, such as a write to a client that
/// already hung up. While a playback is waiting for its next chunk the read
/// side is watched, so a client that goes away (EOF or read error) ends the
/// playback at once and drops its pending wait. A client must therefore
/// keep its write side open until it has read the whole response.
pub async fn handle_connection<S>(stream: S, app: &App, read_timeout: Duration) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut request = BufReader::new(reader).take(MAX_REQUEST_LEN as u64 + 2);

    let mut line = Vec::new();
    let response = match time::timeout(read_timeout, request.read_until(b'\n', &mut line)).await {
        Err(_) => Response::failure(Status::BadRequest, "Request timed out"),
        Ok(Err(e)) => return Err(e),
        Ok(Ok(_)) => respond(app, &line).await,
    };

    info!(status = response.status.code(), meta = %response.meta, "response");
    write_response(&mut writer, request.into_inner(), response).await
}

async fn respond(app: &App, line: &[u8]) -> Response {
    if !line.ends_with(b"\n") {
        return if line.len() > MAX_REQUEST_LEN {
            Response::failure(Status::BadRequest, RequestError::TooLong.to_string())
        } else {
            Response::failure(Status::BadRequest, "Incomplete request")
        };
    }

    let Ok(line) = std::str::from_utf8(line) else {
        return Response::failure(Status::BadRequest, "Request is not UTF-8");
    };

    match parse_request(line) {
        Ok(path) => {
            debug!(%path, "request");
            app.handle(&path).await
        }
        Err(e @ RequestError::UnsupportedScheme(_)) => {
            Response::failure(Status::ProxyRequestRefused, e.to_string())
        }
        Err(e) => Response::failure(Status::BadRequest, e.to_string()),
    }
}

async fn write_response<W, R>(writer: &mut W, mut reader: R, response: Response) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    writer.write_all(response.header().as_bytes()).await?;
    writer.flush().await?;

    match response.body {
        Body::Empty => {}
        Body::Text(text) => writer.write_all(text.as_bytes()).await?,
        Body::Stream(mut chunks) => {
            let mut sent = 0usize;
            let mut scratch = [0u8; 256];
            loop {
                tokio::select! {
                    chunk = chunks.next() => {
                        let Some(chunk) = chunk else { break };
                        writer.write_all(chunk.as_bytes()).await?;
                        writer.flush().await?;
                        sent += 1;
                    }
                    read = reader.read(&mut scratch) => match read {
                        // trailing bytes after the request line are ignored
                        Ok(n) if n > 0 => {}
                        _ => {
                            debug!(chunks = sent, "client went away, playback abandoned");
                            return Ok(());
                        }
                    },
                }
            }
            debug!(chunks = sent, "stream finished");
        }
    }

    writer.flush().await?;
    writer.shutdown().await
}
