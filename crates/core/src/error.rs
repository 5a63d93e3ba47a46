use thiserror::Error;

/// Result type alias for greemls-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the GREEMLS toolkit
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Validation errors
    #[error("validation error: {0}")]
    Validation(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.iso");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing.iso"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(Error::Config("bad plan".to_string()).to_string(), "configuration error: bad plan");
        assert_eq!(Error::Validation("empty".to_string()).to_string(), "validation error: empty");
        assert_eq!(Error::Other("boom".to_string()).to_string(), "boom");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
