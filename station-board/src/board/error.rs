//! Board fetch error types.

/// Errors that can occur when fetching a station board page.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status
    #[error("board request failed with status {status}")]
    Status { status: u16 },
}
