//! Error types for Meshforge

use thiserror::Error;

/// The main error type for Meshforge operations
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Empty or whitespace-only prompt. Rejected before any state change.
    #[error("Prompt is empty")]
    EmptyPrompt,

    /// The image provider produced no usable image data
    #[error("Generation error: {0}")]
    Generation(String),

    /// The mesh provider is transiently unavailable (HTTP 503)
    #[error("{0}")]
    ModelLoading(String),

    /// Any other non-success response from a provider
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Meshforge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<toml::de::Error> for ForgeError {
    fn from(err: toml::de::Error) -> Self {
        ForgeError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_nonempty() {
        let errors = [
            ForgeError::EmptyPrompt,
            ForgeError::Generation("no inline image data".to_string()),
            ForgeError::ModelLoading("model is loading".to_string()),
            ForgeError::Provider("bad gateway".to_string()),
            ForgeError::Config("missing key".to_string()),
        ];
        for err in errors {
            assert!(!err.to_string().trim().is_empty());
        }
    }

    #[test]
    fn test_model_loading_message_passes_through() {
        let err = ForgeError::ModelLoading("still warming up".to_string());
        assert_eq!(err.to_string(), "still warming up");
    }
}
