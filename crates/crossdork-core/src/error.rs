use thiserror::Error;

/// Result type alias for crossdork operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while building or exchanging queries
#[derive(Error, Debug)]
pub enum QueryError {
    /// Request body did not have the expected shape
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Field mapping could not be interpreted
    #[error("invalid fields: {0}")]
    InvalidFields(String),

    /// Share code could not be decoded
    #[error("invalid share code: {0}")]
    Decode(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Engine id is not known
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A converter failed while building its query
    #[error("{engine} conversion failed: {message}")]
    Conversion {
        /// Engine id
        engine: String,
        /// What went wrong
        message: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl QueryError {
    /// Returns true if the caller sent something malformed
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest(_) | Self::InvalidFields(_) | Self::Decode(_) | Self::Json(_)
        )
    }

    /// HTTP status an adapter should answer with
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) | Self::InvalidFields(_) | Self::Decode(_) | Self::Json(_) => {
                400
            }
            Self::UnknownEngine(_) => 404,
            Self::Conversion { .. } | Self::Internal(_) => 500,
        }
    }

    /// Shorthand for a converter failure
    pub fn conversion(engine: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            engine: engine.into(),
            message: message.into(),
        }
    }
}
