use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Missing credential: {0}")]
    MissingCredential(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Encoding error: {0}")]
    EncodingError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl StudioError {
    /// Precondition failures are reported before any network activity.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StudioError::ValidationError(_) | StudioError::MissingCredential(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StudioError::MissingCredential("GEMINI_API_KEY not set".into());
        assert_eq!(err.to_string(), "Missing credential: GEMINI_API_KEY not set");
    }

    #[test]
    fn test_precondition_classification() {
        assert!(StudioError::ValidationError("no styles".into()).is_precondition());
        assert!(StudioError::MissingCredential("key".into()).is_precondition());
        assert!(!StudioError::ResponseError("empty".into()).is_precondition());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!StudioError::from(io).is_precondition());
    }
}
