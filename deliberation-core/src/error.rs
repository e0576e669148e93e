use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<DeliberationError>,
    },
}

impl DeliberationError {
    /// Attach the offending file path to an error.
    pub fn in_file(self, path: impl Into<String>) -> Self {
        DeliberationError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
