use thiserror::Error;

/// Failure of one weather fetch, classified at the orchestration boundary.
///
/// The variants carry owned descriptions rather than their sources so the
/// error can live in the shared [`QueryState`](crate::store::QueryState)
/// and be compared in tests. `Display` yields the human-readable message
/// the presentation layer shows: for provider failures that is the
/// provider's own text (e.g. "city not found") when the error body
/// carried one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never reached the provider, or the response could not
    /// be read.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    /// Anything else, e.g. a malformed success body.
    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
