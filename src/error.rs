//! Error types for highlight-within

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
#[derive(Error, Debug)]
pub enum HighlightError {
    /// The highlight spec handed to a highlighter is not a recognized shape.
    /// Fatal to construction: no overlay is created.
    #[error("Invalid highlight configuration: {0}")]
    Configuration(String),

    /// A nested highlight spec is not a recognized shape. Aborts one pass.
    #[error("Unrecognized highlight spec: {0}")]
    UnrecognizedSpec(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl HighlightError {
    /// Promote a decode failure to a construction-time failure
    pub fn into_configuration(self) -> Self {
        match self {
            HighlightError::UnrecognizedSpec(msg) => HighlightError::Configuration(msg),
            other => other,
        }
    }
}
