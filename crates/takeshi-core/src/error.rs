use thiserror::Error;

/// Top-level error type for Takeshi.
#[derive(Debug, Error)]
pub enum TakeshiError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Command catalog error.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Command handler failure.
    #[error("command error: {0}")]
    Command(String),

    /// Media stream or persistence error.
    #[error("media error: {0}")]
    Media(String),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(String),

    /// Non-success HTTP response.
    #[error("http status {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
