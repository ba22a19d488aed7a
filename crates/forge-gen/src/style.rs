//! Style presets for wrapping generation prompts
//!
//! A preset pins the visual vocabulary the image provider is asked for:
//! single subject, fixed framing, fixed rendering aesthetic. The built-in
//! low-poly preset reproduces the product default; custom presets can be
//! loaded from `styles/<name>.style.toml`.

use forge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A style preset applied to every generation prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylePreset {
    /// Preset name (e.g. "low_poly")
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Prepended to the subject, e.g. "A single low-poly stylized object"
    #[serde(default)]
    pub prompt_prefix: Option<String>,
    /// Framing sentence enforcing subject placement and background
    #[serde(default)]
    pub subject_framing: Option<String>,
    /// Appended rendering-aesthetic sentence
    #[serde(default)]
    pub prompt_suffix: Option<String>,
}

/// TOML file wrapper
#[derive(Debug, Deserialize)]
struct StyleFile {
    style: StylePreset,
}

impl StylePreset {
    /// The built-in default: one low-poly subject on a plain background
    pub fn low_poly() -> Self {
        Self {
            name: "low_poly".to_string(),
            description: Some("Low-poly stylized render on a plain background".to_string()),
            prompt_prefix: Some("A single low-poly stylized object".to_string()),
            subject_framing: Some(
                "Shown from a side profile view, centered on a plain solid white background"
                    .to_string(),
            ),
            prompt_suffix: Some(
                "High quality, clean topology aesthetic, vibrant colors, stylized 3D render look"
                    .to_string(),
            ),
        }
    }

    /// Load a style preset from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: StyleFile = toml::from_str(&content).map_err(|e| {
            ForgeError::Config(format!(
                "Failed to parse style preset {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(file.style)
    }

    /// Find and load a style preset by name, searching standard locations
    pub fn find(name: &str) -> Result<Self> {
        let candidates = [
            format!("styles/{}.style.toml", name),
            format!(".meshforge/styles/{}.style.toml", name),
        ];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(ForgeError::Config(format!(
            "Style preset '{}' not found (searched: {})",
            name,
            candidates.join(", ")
        )))
    }

    /// Wrap a user subject in the preset's fixed visual style
    pub fn wrap_prompt(&self, subject: &str) -> String {
        let mut parts = Vec::new();

        match &self.prompt_prefix {
            Some(prefix) => parts.push(format!("{}, {}", prefix, subject)),
            None => parts.push(subject.to_string()),
        }

        if let Some(framing) = &self.subject_framing {
            parts.push(framing.clone());
        }

        if let Some(suffix) = &self.prompt_suffix {
            parts.push(suffix.clone());
        }

        parts.join(". ")
    }
}
