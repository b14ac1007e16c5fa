//! Error types for the session layer.

use thiserror::Error;

use geotree::GeoTreeError;

/// Errors that can occur while hosting trees for sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The geometry cannot produce an envelope (for example an empty
    /// polygon or an empty collection).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A coordinate is outside the longitude/latitude domain.
    #[error("coordinate out of range: ({x}, {y})")]
    CoordinateOutOfRange { x: f64, y: f64 },

    /// No session registered under the given identifier.
    #[error("unknown session: {0}")]
    UnknownSession(String),

    /// Error bubbled up from the index core.
    #[error("index error: {0}")]
    Index(#[from] GeoTreeError),

    /// Snapshot serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
