//! Mock image provider for offline use and testing
//!
//! Generates a small solid-color PNG whose color is derived from the prompt,
//! so distinct prompts stay visually distinguishable without any network call.

use crate::provider::{ImageProvider, ImageRef, ProviderStatus};
use forge_core::{ForgeError, Result};
use std::io::Cursor;

/// Image provider that renders a deterministic solid-color square
pub struct MockImageProvider;

impl MockImageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProvider for MockImageProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate_image(&self, prompt: &str) -> Result<ImageRef> {
        let seed = prompt
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let r = (seed & 0xFF) as u8;
        let g = ((seed >> 8) & 0xFF) as u8;
        let b = ((seed >> 16) & 0xFF) as u8;

        let img = image::RgbaImage::from_pixel(64, 64, image::Rgba([r, g, b, 255]));

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| ForgeError::Generation(format!("Failed to encode mock image: {}", e)))?;

        Ok(ImageRef::from_png_bytes(&png))
    }
}
