//! Provider traits and the image reference type

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use forge_core::{ForgeError, Result};
use std::fmt;

/// A generated concept image carried as a `data:<mime>;base64,...` URI.
///
/// The image provider produces one of these; the mesh provider strips the
/// prefix back off to recover the raw bytes. Keeping the URI form end to end
/// means the reference can be dropped straight into an `<img>` tag.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageRef {
    uri: String,
}

impl ImageRef {
    /// Wrap PNG bytes as a data URI
    pub fn from_png_bytes(bytes: &[u8]) -> Self {
        Self::from_base64(&STANDARD.encode(bytes), "image/png")
    }

    /// Wrap already-encoded base64 data with the given MIME type
    pub fn from_base64(data: &str, mime: &str) -> Self {
        Self {
            uri: format!("data:{};base64,{}", mime, data),
        }
    }

    /// The full data URI
    pub fn as_uri(&self) -> &str {
        &self.uri
    }

    /// Strip the data-URI prefix and decode back to raw bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let (_, data) = self.uri.split_once(',').ok_or_else(|| {
            ForgeError::Generation("Image reference is not a data URI".to_string())
        })?;
        STANDARD
            .decode(data)
            .map_err(|e| ForgeError::Generation(format!("Invalid base64 image data: {}", e)))
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({} chars)", self.uri.len())
    }
}

/// Status returned by a provider health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Available,
    NoApiKey,
}

/// A provider that turns a text prompt into a concept image
pub trait ImageProvider: Send {
    /// Provider name (e.g. "gemini", "mock")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Generate a concept image for the prompt
    fn generate_image(&self, prompt: &str) -> Result<ImageRef>;
}

/// A provider that turns a concept image into a binary GLB mesh
pub trait MeshProvider: Send {
    /// Provider name (e.g. "huggingface", "placeholder")
    fn name(&self) -> &str;

    /// Check if the provider is usable (API key set)
    fn health_check(&self) -> Result<ProviderStatus>;

    /// Generate GLB bytes from a concept image
    fn generate_mesh(&self, image: &ImageRef) -> Result<Vec<u8>>;
}
