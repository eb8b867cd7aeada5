//! Error types for the Aura assistant

use thiserror::Error;

/// Result type alias for Aura operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Aura assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Required speech backend is unavailable; fatal at startup
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    /// Speech recognition error (carries the recognizer's error code)
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Summary lookup error
    #[error("summary error: {0}")]
    Summary(String),

    /// Handler-level dispatch failure
    #[error("dispatch error: {0}")]
    Dispatch(String),

    /// Launcher error (URL could not be handed to the system opener)
    #[error("launcher error: {0}")]
    Launcher(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Whether this recognition error is transient and should be ignored
    ///
    /// Mirrors the browser convention where a `no-speech` result is not an
    /// error worth surfacing.
    #[must_use]
    pub fn is_transient_recognition(&self) -> bool {
        matches!(self, Self::Recognition(code) if code == "no-speech")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_recognition() {
        assert!(Error::Recognition("no-speech".to_string()).is_transient_recognition());
        assert!(!Error::Recognition("audio-capture".to_string()).is_transient_recognition());
        assert!(!Error::Config("x".to_string()).is_transient_recognition());
    }
}
