//! Protocol responses.
//!
//! A response is a single header line, `<code> <meta>\r\n`, followed by an
//! optional body. On success `meta` is the body's media type; otherwise it is
//! a short human-readable message.

use std::fmt;

use futures::stream::{BoxStream, Stream, StreamExt};

/// Media type of the front page and other gemtext documents.
pub const GEMTEXT: &str = "text/gemini";
/// Media type of a live terminal feed.
pub const ANSI: &str = "text/x-ansi";
pub const JSON: &str = "application/json";
pub const PLAIN: &str = "text/plain";

/// Response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    NotFound,
    ProxyRequestRefused,
    BadRequest,
}

impl Status {
    pub fn code(&self) -> u8 {
        match self {
            Status::Success => 20,
            Status::NotFound => 51,
            Status::ProxyRequestRefused => 53,
            Status::BadRequest => 59,
        }
    }
}

/// Response payload.
pub enum Body {
    Empty,
    Text(String),
    /// Written chunk by chunk as the stream yields, flushing after each.
    Stream(BoxStream<'static, String>),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => write!(f, "Empty"),
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Stream(_) => write!(f, "Stream(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub meta: String,
    pub body: Body,
}

impl Response {
    /// Successful response with a fixed body.
    pub fn text(media_type: &str, body: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            meta: media_type.to_string(),
            body: Body::Text(body.into()),
        }
    }

    /// Successful response whose body is streamed.
    pub fn stream<S>(media_type: &str, chunks: S) -> Self
    where
        S: Stream<Item = String> + Send + 'static,
    {
        Self {
            status: Status::Success,
            meta: media_type.to_string(),
            body: Body::Stream(chunks.boxed()),
        }
    }

    pub fn not_found() -> Self {
        Self::failure(Status::NotFound, "Not found")
    }

    /// Header-only response carrying an error message.
    pub fn failure(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            meta: message.into(),
            body: Body::Empty,
        }
    }

    /// The header line, CRLF included.
    pub fn header(&self) -> String {
        format!("{} {}\r\n", self.status.code(), self.meta)
    }

    /// Drain the body into a string. Streams are consumed at their own pace.
    pub async fn into_text(self) -> String {
        match self.body {
            Body::Empty => String::new(),
            Body::Text(text) => text,
            Body::Stream(chunks) => chunks.collect::<Vec<_>>().await.concat(),
        }
    }
}
