use thiserror::Error;
use url::Url;

/// Centralized error type for treeloader-net
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("HTTP {status} for URL: {url}")]
    HttpError {
        url: Url,
        status: u16,
        body: Option<String>,
    },
    #[error("response body is not valid UTF-8: {url}")]
    InvalidUtf8 { url: Url },
}

impl NetError {
    /// Creates an HTTP status error
    pub fn http_error(status: u16, url: Url, body: Option<String>) -> Self {
        Self::HttpError { url, status, body }
    }

    /// Creates an HTTP error from a generic string
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    /// Gets the HTTP status code if the server answered with a non-success status
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a non-success status, if one was read
    pub fn body(&self) -> Option<&str> {
        match self {
            NetError::HttpError { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

pub type NetResult<T> = Result<T, NetError>;
