//! The check command: report provider configuration status

use anyhow::Result;
use forge_gen::providers::gemini::GeminiImageProvider;
use forge_gen::{providers, ForgeConfig, MeshProvider as _, ProviderStatus, StylePreset};

pub fn run() -> Result<()> {
    let config = ForgeConfig::load().unwrap_or_default();

    println!("Provider status:");

    match GeminiImageProvider::from_config(&config, StylePreset::low_poly()) {
        Ok(provider) => {
            use forge_gen::ImageProvider as _;
            match provider.health_check()? {
                ProviderStatus::Available => println!("  gemini: available"),
                ProviderStatus::NoApiKey => println!("  gemini: no API key"),
            }
        }
        Err(e) => println!("  gemini: not configured ({})", e),
    }

    let mesh = providers::default_mesh_provider(&config);
    if mesh.name() == "huggingface" {
        println!("  huggingface: available");
    } else {
        println!("  huggingface: no API key, fallback mode active (placeholder mesh provider)");
    }

    Ok(())
}
