use thiserror::Error;

/// Errors that can occur while loading recipe data or talking to the server
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Payload text was not valid JSON
    #[error("Failed to parse recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The host page has no element with the expected id
    #[error("No embedded payload with id '{0}'")]
    MissingPayload(String),

    /// JSON parsed, but has the wrong shape for the requested view
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// HTTP client failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Reading an input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
