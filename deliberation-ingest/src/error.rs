use deliberation_core::DeliberationError;
use thiserror::Error;

/// Errors at the Docent boundary.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Docent API key required. Set the {var} environment variable")]
    MissingApiKey { var: String },

    #[error("Failed to read prepared data: {0}")]
    Artifact(#[from] DeliberationError),
}
