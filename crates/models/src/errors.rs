use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    /// Client-facing text without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation(msg) => msg,
        }
    }
}
