//! Provider registry
//!
//! Maps provider names to concrete implementations, and picks the mesh
//! fallback when no Hugging Face credential is configured.

pub mod gemini;
pub mod huggingface;
pub mod mock;
pub mod placeholder;

use crate::config::ForgeConfig;
use crate::provider::{ImageProvider, MeshProvider};
use crate::style::StylePreset;
use forge_core::{ForgeError, Result};

/// Create an image provider by name with configuration
pub fn create_image_provider(
    name: &str,
    config: &ForgeConfig,
    style: StylePreset,
) -> Result<Box<dyn ImageProvider>> {
    match name {
        "gemini" => Ok(Box::new(gemini::GeminiImageProvider::from_config(
            config, style,
        )?)),
        "mock" => Ok(Box::new(mock::MockImageProvider::new())),
        _ => Err(ForgeError::Config(format!(
            "Unknown image provider '{}'. Available: gemini, mock",
            name
        ))),
    }
}

/// Create a mesh provider by name with configuration
pub fn create_mesh_provider(name: &str, config: &ForgeConfig) -> Result<Box<dyn MeshProvider>> {
    match name {
        "huggingface" => Ok(Box::new(
            huggingface::HuggingFaceMeshProvider::from_config(config)?,
        )),
        "placeholder" => Ok(Box::new(placeholder::PlaceholderMeshProvider::new())),
        _ => Err(ForgeError::Config(format!(
            "Unknown mesh provider '{}'. Available: huggingface, placeholder",
            name
        ))),
    }
}

/// Default mesh provider selection: Hugging Face when a credential is
/// configured, the fixed-delay placeholder otherwise. The fallback exists for
/// offline demonstration, not resilience.
pub fn default_mesh_provider(config: &ForgeConfig) -> Box<dyn MeshProvider> {
    match huggingface::HuggingFaceMeshProvider::from_config(config) {
        Ok(provider) => Box::new(provider),
        Err(_) => Box::new(placeholder::PlaceholderMeshProvider::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn test_unknown_provider_names_rejected() {
        let config = ForgeConfig::default();
        assert!(create_image_provider("dalle", &config, StylePreset::low_poly()).is_err());
        assert!(create_mesh_provider("meshy", &config).is_err());
    }

    #[test]
    fn test_default_mesh_provider_falls_back_without_credential() {
        let config = ForgeConfig::default();
        let provider = default_mesh_provider(&config);
        assert_eq!(provider.name(), "placeholder");
    }

    #[test]
    fn test_default_mesh_provider_uses_huggingface_with_credential() {
        let mut config = ForgeConfig::default();
        config.providers.insert(
            "huggingface".to_string(),
            ProviderConfig {
                api_key: Some("hf_test".to_string()),
                api_url: None,
                model: None,
            },
        );
        let provider = default_mesh_provider(&config);
        assert_eq!(provider.name(), "huggingface");
    }
}
