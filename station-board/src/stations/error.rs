//! Station list error types.

/// Errors that can occur while loading a station list document.
///
/// All variants are terminal for the load: no partial list is ever
/// returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened for reading.
    #[error("cannot open station list: {0}")]
    CannotOpen(#[source] std::io::Error),

    /// The document is well-formed XML but violates the station list
    /// structure (wrong root element, malformed coordinate text).
    #[error("invalid station list: {0}")]
    InvalidFormat(String),

    /// The document is not well-formed XML.
    #[error("malformed station list document: {0}")]
    Parse(String),

    /// Reading the document failed mid-stream.
    #[error("read error: {0}")]
    Io(String),
}

impl From<quick_xml::Error> for LoadError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => Self::Io(e.to_string()),
            other => Self::Parse(other.to_string()),
        }
    }
}
