//! Cast parsing errors.

/// Why a payload does not have the shape of one particular format.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("payload is empty")]
    Empty,

    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("document is not a JSON object")]
    NotObject,

    #[error("missing \"stdout\" frame list")]
    MissingStdout,

    #[error("\"stdout\" is not an array")]
    StdoutNotArray,

    #[error("frame {index}: {reason}")]
    BadFrame { index: usize, reason: &'static str },

    #[error("line {line}: {reason}")]
    BadLine { line: usize, reason: String },

    #[error("header has no event lines and does not declare version 2")]
    NotV2,
}

/// A recording matched neither supported format.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("recording is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("unrecognized cast format (as v1: {v1}; as v2: {v2})")]
    Unrecognized { v1: ShapeError, v2: ShapeError },
}
