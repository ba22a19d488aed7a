//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `MESHFORGE_{PROVIDER}_API_KEY`
//! 2. Project-local: `.meshforge/config.toml`
//! 3. Global: `~/.meshforge/config.toml`

use forge_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Generation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Default style preset name; falls back to the built-in low-poly preset
    #[serde(default)]
    pub style: Option<String>,
    /// Directory where generated artifacts are staged
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            style: None,
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    ".meshforge/generated".to_string()
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ForgeConfigFile {
    #[serde(default)]
    providers: HashMap<String, ProviderConfig>,
    #[serde(default)]
    generation: GenerationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct ForgeConfig {
    pub providers: HashMap<String, ProviderConfig>,
    pub generation: GenerationConfig,
}

impl ForgeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = ForgeConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".meshforge/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config);

        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(ForgeConfig {
            providers: config.providers,
            generation: config.generation,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL override for a provider
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Get model override for a provider
    pub fn model(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.model.as_deref())
    }

    /// Get the default style preset name
    pub fn default_style(&self) -> Option<&str> {
        self.generation.style.as_deref()
    }

    /// Directory where generated artifacts are staged
    pub fn output_dir(&self) -> &str {
        &self.generation.output_dir
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".meshforge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<ForgeConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: ForgeConfigFile = toml::from_str(&content).map_err(|e| {
            forge_core::ForgeError::Config(format!(
                "Failed to parse config {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut ForgeConfigFile, overlay: ForgeConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.model.is_some() {
                entry.model = provider.model;
            }
        }

        if overlay.generation.style.is_some() {
            base.generation.style = overlay.generation.style;
        }
        if overlay.generation.output_dir != default_output_dir() {
            base.generation.output_dir = overlay.generation.output_dir;
        }
    }

    fn apply_env_overrides(config: &mut ForgeConfigFile) {
        let provider_names = ["gemini", "huggingface"];
        for name in &provider_names {
            let env_key = format!("MESHFORGE_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }
        }
    }
}
