//! Placeholder mesh provider
//!
//! Produces a fixed single-triangle GLB after a short delay, standing in for
//! the hosted image-to-3D model when no credential is configured. The delay
//! approximates real inference latency so the staged progress output still
//! reads sensibly.

use crate::provider::{ImageRef, MeshProvider, ProviderStatus};
use forge_core::Result;
use std::time::Duration;

const PLACEHOLDER_DELAY: Duration = Duration::from_secs(3);

/// Mesh provider that returns a built-in triangle GLB
pub struct PlaceholderMeshProvider {
    delay: Duration,
}

impl PlaceholderMeshProvider {
    pub fn new() -> Self {
        Self {
            delay: PLACEHOLDER_DELAY,
        }
    }

    /// Override the simulated inference delay (used by tests)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for PlaceholderMeshProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshProvider for PlaceholderMeshProvider {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn health_check(&self) -> Result<ProviderStatus> {
        Ok(ProviderStatus::Available)
    }

    fn generate_mesh(&self, _image: &ImageRef) -> Result<Vec<u8>> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(placeholder_glb())
    }
}

// Single triangle: 3 vec3 positions (36 bytes) + 3 u16 indices (6 bytes,
// padded to 8 so the binary chunk stays 4-byte aligned).
const PLACEHOLDER_GLTF_JSON: &str = r#"{"asset":{"version":"2.0","generator":"meshforge-placeholder"},"scene":0,"scenes":[{"nodes":[0]}],"nodes":[{"mesh":0}],"meshes":[{"primitives":[{"attributes":{"POSITION":0},"indices":1}]}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[-0.5,-0.5,0.0],"max":[0.5,0.5,0.0]},{"bufferView":1,"componentType":5123,"count":3,"type":"SCALAR"}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36},{"buffer":0,"byteOffset":36,"byteLength":6}],"buffers":[{"byteLength":44}]}"#;

/// Build the built-in single-triangle GLB
pub fn placeholder_glb() -> Vec<u8> {
    let mut json = PLACEHOLDER_GLTF_JSON.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let positions: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
    let indices: [u16; 3] = [0, 1, 2];

    let mut bin = Vec::with_capacity(44);
    for v in positions {
        bin.extend_from_slice(&v.to_le_bytes());
    }
    for i in indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total_len = 12 + 8 + json.len() + 8 + bin.len();

    let mut glb = Vec::with_capacity(total_len);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total_len as u32).to_le_bytes());

    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
    glb.extend_from_slice(&json);

    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(&0x004E_4942u32.to_le_bytes());
    glb.extend_from_slice(&bin);

    glb
}
