use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Client name is required for client work")]
    MissingClientName,

    #[error("Invalid date '{value}': expected {expected}")]
    InvalidDate { value: String, expected: &'static str },

    #[error("Invalid date format pattern '{pattern}'")]
    InvalidDateFormat { pattern: String },

    #[error("Invalid camera format '{value}': expected {expected}")]
    InvalidCameraSpec { value: String, expected: &'static str },

    #[error("Invalid purpose '{value}'. Valid options: {valid}")]
    InvalidPurpose { value: String, valid: String },

    #[error("Camera assignment '{folder}' is listed more than once")]
    DuplicateCameraFolder { folder: String },

    #[error("Client '{name}' already exists")]
    DuplicateClient { name: String },

    #[error("Failed to create {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read template '{name}' at {}: {source}", path.display())]
    TemplateRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template '{name}' at {} is malformed: {source}", path.display())]
    TemplateLoad {
        name: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GeneratorError {
    /// Errors raised before any filesystem mutation because the input itself is unusable.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GeneratorError::EmptyField { .. }
                | GeneratorError::MissingClientName
                | GeneratorError::InvalidDate { .. }
                | GeneratorError::InvalidDateFormat { .. }
                | GeneratorError::InvalidCameraSpec { .. }
                | GeneratorError::InvalidPurpose { .. }
                | GeneratorError::DuplicateCameraFolder { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
