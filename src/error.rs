use std::fmt;
use std::path::PathBuf;
use std::result;

use thiserror::Error;

/// Error types for arXiv client operations
#[derive(Error, Debug)]
pub enum ArxivError {
    /// HTTP request failed or returned a non-success status
    #[error("Request to {url} failed: {message}")]
    FetchError {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// arXiv answered with an error entry instead of results
    #[error("arXiv API error for {url}: {message}")]
    ApiError { url: String, message: String },

    /// XML parsing failed
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// Compound query text could not be parsed
    #[error("Failed to parse query {input:?}: {message}")]
    ParseError { input: String, message: String },

    /// Unknown operator, prefix or sort name
    #[error("Invalid {field}: {value:?}")]
    ValidationError { field: &'static str, value: String },

    /// Invalid query structure or parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// IO error for file operations
    #[error("IO error at {}: {message}", path.display())]
    IoError { path: PathBuf, message: String },
}

pub type Result<T> = result::Result<T, ArxivError>;

impl ArxivError {
    pub(crate) fn fetch(url: &str, err: reqwest::Error) -> Self {
        ArxivError::FetchError {
            url: url.to_string(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        ArxivError::ParseError {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

/// A page that came back without entries.
///
/// This is not fatal: it usually means the result set is exhausted, but it can also
/// point at a query the API silently matched against nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyResultWarning {
    /// The `search_query` value that was sent
    pub query: String,
    /// Offset of the empty page
    pub start: usize,
}

impl fmt::Display for EmptyResultWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no entries returned for query {} at offset {}",
            self.query, self.start
        )
    }
}

/// A single record that could not be downloaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to download {id} from {url}: {message}")]
pub struct DownloadError {
    /// Identifier of the record
    pub id: String,
    /// Document URL that was attempted
    pub url: String,
    pub message: String,
}
