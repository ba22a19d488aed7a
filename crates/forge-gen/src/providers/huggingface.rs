//! Hugging Face image-to-3D mesh provider
//!
//! Posts the raw concept-image bytes to the inference endpoint and reads the
//! GLB response body. A 503 means the hosted model is still loading and is
//! surfaced with a specific try-again message; everything else non-2xx is a
//! plain provider error carrying the response body.

use crate::config::ForgeConfig;
use crate::provider::{ImageRef, MeshProvider, ProviderStatus};
use forge_core::{ForgeError, Result};
use std::time::Duration;

/// Message shown when the hosted model answers 503
pub const MODEL_LOADING_MESSAGE: &str =
    "The 3D generation model is currently loading. Please try again in a minute.";

const DEFAULT_HF_URL: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_MESH_MODEL: &str = "google/shap-e";
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Hugging Face inference provider for image-to-3D generation
pub struct HuggingFaceMeshProvider {
    api_key: String,
    api_url: String,
    model: String,
}

impl HuggingFaceMeshProvider {
    /// Create a new HuggingFaceMeshProvider from config
    pub fn from_config(config: &ForgeConfig) -> Result<Self> {
        let api_key = config
            .api_key("huggingface")
            .ok_or_else(|| {
                ForgeError::Config(
                    "Hugging Face API key not configured. Set MESHFORGE_HUGGINGFACE_API_KEY or add to .meshforge/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("huggingface")
            .unwrap_or(DEFAULT_HF_URL)
            .trim_end_matches('/')
            .to_string();

        let model = config
            .model("huggingface")
            .unwrap_or(DEFAULT_MESH_MODEL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            model,
        })
    }
}

impl MeshProvider for HuggingFaceMeshProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        if self.api_key.is_empty() {
            return Ok(ProviderStatus::NoApiKey);
        }
        Ok(ProviderStatus::Available)
    }

    fn generate_mesh(&self, image: &ImageRef) -> Result<Vec<u8>> {
        let image_bytes = image.to_bytes()?;
        let url = format!("{}/{}", self.api_url, self.model);

        let agent = build_agent();
        let response = agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(&image_bytes[..])
            .map_err(|e| ForgeError::Provider(format!("Mesh provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body_text(response.into_body());
            return Err(classify_failure(status.as_u16(), &body));
        }

        let mut reader = response.into_body().into_reader();
        let mut glb = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut glb)
            .map_err(|e| ForgeError::Provider(format!("Failed to read mesh data: {}", e)))?;

        if !glb.starts_with(b"glTF") {
            return Err(ForgeError::Provider(
                "Mesh provider returned a non-GLB payload".to_string(),
            ));
        }

        Ok(glb)
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

/// Map a non-success inference response onto the error taxonomy
pub fn classify_failure(status_code: u16, body: &str) -> ForgeError {
    if status_code == 503 {
        return ForgeError::ModelLoading(MODEL_LOADING_MESSAGE.to_string());
    }
    if body.is_empty() {
        ForgeError::Provider(format!("Mesh provider returned status {}", status_code))
    } else {
        ForgeError::Provider(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_503_maps_to_model_loading() {
        let err = classify_failure(503, "Model google/shap-e is currently loading");
        assert!(matches!(err, ForgeError::ModelLoading(_)));
        assert!(err.to_string().contains("currently loading"));
    }

    #[test]
    fn test_other_status_carries_body() {
        let err = classify_failure(400, r#"{"error":"invalid input"}"#);
        assert!(matches!(err, ForgeError::Provider(_)));
        assert!(err.to_string().contains("invalid input"));
    }

    #[test]
    fn test_empty_body_falls_back_to_status_text() {
        let err = classify_failure(502, "");
        assert!(err.to_string().contains("502"));
    }
}
