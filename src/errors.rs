//! Centralized error handling for argo_utils
//!
//! Every fallible operation in the crate returns [`Result`], so callers only
//! need to match on a single [`ArgoError`] type.

use thiserror::Error;

/// Main error type for argo_utils operations
#[derive(Debug, Error)]
pub enum ArgoError {
    /// The server answered 404
    #[error("{}", http_message(*status, body, url))]
    NotFound {
        status: u16,
        /// Response body with the first "Error" removed
        body: String,
        url: String,
    },

    /// The server answered 500
    #[error("{}", http_message(*status, body, url))]
    ServerError { status: u16, body: String, url: String },

    /// Any other non-success status
    #[error("{status} {reason} for url: {url}")]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// Argument outside of an accepted closed set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A data source backend could not be loaded
    #[error("Backend '{name}' is unavailable: {reason}")]
    BackendUnavailable { name: String, reason: String },

    /// Connection-level HTTP fault
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup table deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// NetCDF file operation errors
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// Generic error for everything else
    #[error("{0}")]
    Generic(String),
}

impl ArgoError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ArgoError::NotFound { status, .. }
            | ArgoError::ServerError { status, .. }
            | ArgoError::HttpStatus { status, .. } => Some(*status),
            ArgoError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short name of the error kind, used in warnings
    pub fn kind(&self) -> &'static str {
        match self {
            ArgoError::NotFound { .. } => "NotFound",
            ArgoError::ServerError { .. } => "ServerError",
            ArgoError::HttpStatus { .. } => "HttpStatus",
            ArgoError::InvalidArgument(_) => "InvalidArgument",
            ArgoError::BackendUnavailable { .. } => "BackendUnavailable",
            ArgoError::Network(_) => "Network",
            ArgoError::InvalidUrl(_) => "InvalidUrl",
            ArgoError::Io(_) => "Io",
            ArgoError::Json(_) => "Json",
            ArgoError::NetCDF(_) => "NetCDF",
            ArgoError::Generic(_) => "Generic",
        }
    }
}

/// Multi-line message shared by HTTP failures: status, body and url.
pub(crate) fn http_message(status: u16, body: &str, url: &str) -> String {
    [format!("Error {status} "), body.to_string(), url.to_string()].join("\n")
}

impl From<String> for ArgoError {
    fn from(error: String) -> Self {
        ArgoError::Generic(error)
    }
}

impl From<&str> for ArgoError {
    fn from(error: &str) -> Self {
        ArgoError::Generic(error.to_string())
    }
}

/// Result type alias for argo_utils operations
pub type Result<T> = std::result::Result<T, ArgoError>;
