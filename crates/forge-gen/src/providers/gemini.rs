//! Gemini concept-image provider
//!
//! Sends the style-wrapped prompt to the Gemini generateContent endpoint with
//! a 1:1 aspect ratio and returns the first inline image found in the
//! response as a data URI. One call, no retries; provider failures propagate
//! with the provider's own message.

use crate::config::ForgeConfig;
use crate::provider::{ImageProvider, ImageRef, ProviderStatus};
use crate::style::StylePreset;
use forge_core::{ForgeError, Result};
use std::time::Duration;

const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Gemini provider for concept image generation
pub struct GeminiImageProvider {
    api_key: String,
    api_url: String,
    model: String,
    style: StylePreset,
}

impl GeminiImageProvider {
    /// Create a new GeminiImageProvider from config
    pub fn from_config(config: &ForgeConfig, style: StylePreset) -> Result<Self> {
        let api_key = config
            .api_key("gemini")
            .ok_or_else(|| {
                ForgeError::Config(
                    "Gemini API key not configured. Set MESHFORGE_GEMINI_API_KEY or add to .meshforge/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("gemini")
            .unwrap_or(DEFAULT_GEMINI_URL)
            .trim_end_matches('/')
            .to_string();

        let model = config
            .model("gemini")
            .unwrap_or(DEFAULT_IMAGE_MODEL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            model,
            style,
        })
    }
}

impl ImageProvider for GeminiImageProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn generate_image(&self, prompt: &str) -> Result<ImageRef> {
        let full_prompt = self.style.wrap_prompt(prompt);

        let payload = serde_json::json!({
            "contents": [{
                "parts": [{ "text": full_prompt }]
            }],
            "generationConfig": {
                "imageConfig": { "aspectRatio": "1:1" }
            }
        });

        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let agent = build_agent();
        let mut response = agent
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .send_json(&payload)
            .map_err(|e| {
                ForgeError::Generation(format!("Image provider request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body_text(response.into_body());
            return Err(ForgeError::Generation(if body.is_empty() {
                format!("Image provider returned status {}", status)
            } else {
                body
            }));
        }

        let value: serde_json::Value = response.body_mut().read_json().map_err(|e| {
            ForgeError::Generation(format!("Failed to parse image provider response: {}", e))
        })?;

        extract_inline_image(&value)
    }
}

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .http_status_as_error(false)
        .build();
    config.into()
}

fn read_body_text(body: ureq::Body) -> String {
    let mut reader = body.into_reader();
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut bytes).ok();
    String::from_utf8_lossy(&bytes).trim().to_string()
}

/// Scan a generateContent response for the first inline image part
pub fn extract_inline_image(response: &serde_json::Value) -> Result<ImageRef> {
    let candidates = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .map(|c| c.as_slice())
        .unwrap_or_default();

    for candidate in candidates {
        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .map(|p| p.as_slice())
            .unwrap_or_default();

        for part in parts {
            if let Some(inline) = part.get("inlineData") {
                if let Some(data) = inline.get("data").and_then(|d| d.as_str()) {
                    let mime = inline
                        .get("mimeType")
                        .and_then(|m| m.as_str())
                        .unwrap_or("image/png");
                    return Ok(ImageRef::from_base64(data, mime));
                }
            }
        }
    }

    Err(ForgeError::Generation(
        "Image provider response contained no inline image data".to_string(),
    ))
}

/// Parse a generateContent response body for testing
pub fn parse_image_response(json: &str) -> Result<ImageRef> {
    let response: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ForgeError::Generation(format!("Invalid JSON: {}", e)))?;
    extract_inline_image(&response)
}
