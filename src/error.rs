//! Errors surfaced while loading a recording for a request.

use crate::asciicast::FormatError;
use crate::source::RetrievalError;

/// Why a recording could not be served.
///
/// Both variants map to "not found" at the protocol boundary. An empty
/// recording is not an error; callers check [`Cast::is_empty`](crate::Cast::is_empty).
#[derive(Debug, thiserror::Error)]
pub enum CastError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
