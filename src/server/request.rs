//! Request line parsing.
//!
//! A request is a single absolute URL terminated by CRLF, at most 1024 bytes
//! long. Only the path is used for routing; a bare path (`/123`) is accepted
//! as well, which makes poking at the server with `nc` convenient.

use url::Url;

/// Longest accepted request URL, excluding the line terminator.
pub const MAX_REQUEST_LEN: usize = 1024;

const SCHEME: &str = "gemini";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("empty request")]
    Empty,

    #[error("request longer than 1024 bytes")]
    TooLong,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Extract the path from a request line.
pub fn parse_request(line: &str) -> Result<String, RequestError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return Err(RequestError::Empty);
    }
    if line.len() > MAX_REQUEST_LEN {
        return Err(RequestError::TooLong);
    }
    if line.starts_with('/') {
        return Ok(line.split(['?', '#']).next().unwrap_or_default().to_string());
    }

    let url = Url::parse(line)?;
    if url.scheme() != SCHEME {
        return Err(RequestError::UnsupportedScheme(url.scheme().to_string()));
    }
    Ok(url.path().to_string())
}
