//! Error types for the Brewfather client.

/// Result type for client operations.
pub type BrewfatherResult<T> = Result<T, BrewfatherError>;

#[derive(Debug, thiserror::Error)]
pub enum BrewfatherError {
    /// The API answered with a non-success status. The body is not
    /// interpreted; call sites attach their own diagnostic text.
    #[error("Brewfather API returned status {status}")]
    Upstream { status: u16 },

    /// The request could not be completed (connection, DNS, malformed
    /// response).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Client construction failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL building failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
