use thiserror::Error;

use crate::geo::Point;

/// Convenient result alias for the geopath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of library errors.
///
/// Callers that translate errors into transport responses (exit codes, HTTP
/// statuses, batch item markers) should match on this instead of on the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    PathNotFound,
    NotFound,
    AccessDenied,
    Persistence,
    Analytics,
}

impl ErrorKind {
    /// Stable snake_case label used in metadata and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::PathNotFound => "path_not_found",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Analytics => "analytics",
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A latitude or longitude was outside its valid range or not finite.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidCoordinate {
        field: String,
        value: f64,
        expected: &'static str,
    },

    /// The requested algorithm tag is not one of the supported strategies.
    #[error("unknown algorithm '{name}'; expected one of: astar, dijkstra, bfs")]
    UnknownAlgorithm { name: String },

    /// Page numbers and sizes must be positive and within limits.
    #[error("invalid pagination: {reason}")]
    InvalidPagination { reason: String },

    /// A search option was out of range.
    #[error("invalid option {option}: {reason}")]
    InvalidOption { option: String, reason: String },

    /// Every operation is scoped to an owner.
    #[error("owner id is required")]
    MissingOwner,

    /// Raised when a batch exceeds the configured size limit.
    #[error("batch of {size} requests exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    /// Raised when no path connects the endpoints under the chosen strategy.
    #[error("no path found between {start} and {end} using {algorithm}")]
    PathNotFound {
        start: Point,
        end: Point,
        algorithm: String,
    },

    /// Raised when a record id is unknown to the repository.
    #[error("path record {id} not found")]
    RecordNotFound { id: String },

    /// Raised when the caller may not read or modify a record.
    #[error("access to path record {id} denied")]
    AccessDenied { id: String },

    /// Raised by repository adapters for storage failures.
    #[error("persistence failure: {message}")]
    Persistence { message: String },

    /// Raised by analytics sinks. Never surfaced by the service.
    #[error("analytics failure: {message}")]
    Analytics { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCoordinate { .. }
            | Error::UnknownAlgorithm { .. }
            | Error::InvalidPagination { .. }
            | Error::InvalidOption { .. }
            | Error::MissingOwner
            | Error::BatchTooLarge { .. } => ErrorKind::Validation,
            Error::PathNotFound { .. } => ErrorKind::PathNotFound,
            Error::RecordNotFound { .. } => ErrorKind::NotFound,
            Error::AccessDenied { .. } => ErrorKind::AccessDenied,
            Error::Persistence { .. } | Error::Io(_) | Error::Json(_) => ErrorKind::Persistence,
            Error::Analytics { .. } => ErrorKind::Analytics,
        }
    }

    /// Whether this is a request validation failure.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub(crate) fn invalid_option(option: &str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            option: option.to_string(),
            reason: reason.into(),
        }
    }
}
