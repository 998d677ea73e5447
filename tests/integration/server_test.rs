//! End-to-end tests over real TCP connections

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use castmirror::{server, App, CastSource, DirSource, HttpSource, RetrievalError};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::helpers::{fixtures_dir, load_fixture, V1_OUTPUT, V2_OUTPUT};

/// Start a server over the fixtures directory and return its address.
async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = App::new(
        Arc::new(DirSource::new(fixtures_dir())),
        Duration::from_millis(100),
    )
    .with_hostname("test.local");
    tokio::spawn(server::run(listener, Arc::new(app), Duration::from_secs(5)));
    addr
}

async fn request(addr: SocketAddr, line: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(line.as_bytes()).await.unwrap();
    let mut out = String::new();
    stream.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn front_page() {
    let addr = start_server().await;
    let out = request(addr, "gemini://test.local/\r\n").await;
    assert!(out.starts_with("20 text/gemini\r\n# "));
    assert!(out.contains("gemini://test.local/22767"));
}

#[tokio::test]
async fn plays_v1_and_v2_recordings() {
    let addr = start_server().await;

    let out = request(addr, "gemini://test.local/1\r\n").await;
    assert_eq!(out, format!("20 text/x-ansi\r\n{}", V1_OUTPUT));

    let out = request(addr, "gemini://test.local/2\r\n").await;
    assert_eq!(out, format!("20 text/x-ansi\r\n{}", V2_OUTPUT));
}

#[tokio::test]
async fn meta_returns_header_json() {
    let addr = start_server().await;
    let out = request(addr, "gemini://test.local/meta/2\r\n").await;

    let (header, body) = out.split_once("\r\n").unwrap();
    assert_eq!(header, "20 application/json");
    let meta: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(meta["title"], "hello v2");
    assert_eq!(meta["width"], 100);
}

#[tokio::test]
async fn failures_are_not_found() {
    let addr = start_server().await;
    // header-only recording has nothing to play
    assert_eq!(request(addr, "gemini://test.local/3\r\n").await, "51 Not found\r\n");
    assert_eq!(request(addr, "gemini://test.local/404\r\n").await, "51 Not found\r\n");
    assert_eq!(
        request(addr, "gemini://test.local/meta/404\r\n").await,
        "51 Not found\r\n"
    );
}

#[tokio::test]
async fn concurrent_playbacks_are_independent() {
    let addr = start_server().await;
    let (a, b) = tokio::join!(
        request(addr, "gemini://test.local/1\r\n"),
        request(addr, "gemini://test.local/2\r\n"),
    );
    assert!(a.ends_with(V1_OUTPUT));
    assert!(b.ends_with(V2_OUTPUT));
}

#[tokio::test]
async fn client_hangup_does_not_stop_server() {
    let addr = start_server().await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"gemini://test.local/2\r\n")
        .await
        .unwrap();
    let mut reader = BufReader::new(stream);
    let mut header = String::new();
    reader.read_line(&mut header).await.unwrap();
    assert_eq!(header, "20 text/x-ansi\r\n");
    drop(reader);

    assert_eq!(
        request(addr, "/robots.txt\r\n").await,
        "20 text/plain\r\nUser-agent: *\nDisallow: /\n"
    );
}

// ============================================================================
// HTTP source
// ============================================================================

/// Minimal HTTP/1.1 upstream that serves fixture 2.cast at /a/7.cast and 404 elsewhere.
async fn start_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = load_fixture("2.cast");

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let body = body.clone();
            tokio::spawn(async move {
                let mut reader = BufReader::new(stream);
                let mut request_line = String::new();
                reader.read_line(&mut request_line).await.unwrap();
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).await.unwrap();
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                }

                let (status, body) = if request_line.starts_with("GET /a/7.cast ") {
                    ("200 OK", body)
                } else {
                    ("404 Not Found", b"gone".to_vec())
                };
                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let mut stream = reader.into_inner();
                stream.write_all(head.as_bytes()).await.unwrap();
                stream.write_all(&body).await.unwrap();
                stream.shutdown().await.unwrap();
            });
        }
    });
    addr
}

fn http_source(upstream: SocketAddr) -> HttpSource {
    HttpSource::new(
        format!("http://{}/a/{{id}}.cast", upstream),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn http_source_fetches_and_maps_404() {
    let upstream = start_upstream().await;
    let source = http_source(upstream);

    let raw = source.fetch_raw("7").await.unwrap();
    assert_eq!(raw, load_fixture("2.cast"));

    assert!(matches!(
        source.fetch_raw("8").await,
        Err(RetrievalError::NotFound { .. })
    ));
}

#[tokio::test]
async fn app_plays_from_http_source() {
    let upstream = start_upstream().await;
    let app = App::new(Arc::new(http_source(upstream)), Duration::from_millis(100));

    assert_eq!(app.handle("/7").await.into_text().await, V2_OUTPUT);
    assert_eq!(
        app.handle("/8").await.header(),
        "51 Not found\r\n"
    );
}
