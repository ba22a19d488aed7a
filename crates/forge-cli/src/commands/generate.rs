//! The generate command: run the full prompt-to-mesh pipeline

use crate::viewer::{ViewerOptions, ViewerPage};
use anyhow::Result;
use forge_core::ContentHash;
use forge_gen::{
    providers, ForgeConfig, ForgePipeline, ForgeSession, GenerationStatus, ImageProvider as _,
    MeshProvider as _, StylePreset,
};
use std::path::Path;

pub struct GenerateArgs {
    pub prompt: String,
    pub style: Option<String>,
    pub image_provider: Option<String>,
    pub mesh_provider: Option<String>,
    pub output: Option<String>,
    pub download: bool,
    pub view: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = ForgeConfig::load().unwrap_or_default();

    // Style: explicit flag > config default > built-in low-poly
    let style = match args.style.as_deref().or_else(|| config.default_style()) {
        Some(name) => match StylePreset::find(name) {
            Ok(preset) => preset,
            Err(e) => {
                eprintln!("Warning: Could not load style '{}': {}", name, e);
                StylePreset::low_poly()
            }
        },
        None => StylePreset::low_poly(),
    };

    let image_provider_name = args.image_provider.as_deref().unwrap_or("gemini");
    let image_provider = providers::create_image_provider(image_provider_name, &config, style)?;

    let mesh_provider = match args.mesh_provider.as_deref() {
        Some(name) => providers::create_mesh_provider(name, &config)?,
        None => {
            let provider = providers::default_mesh_provider(&config);
            if provider.name() == "placeholder" {
                eprintln!(
                    "Warning: No Hugging Face API key configured; using the placeholder mesh provider."
                );
            }
            provider
        }
    };

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir().to_string());

    println!(
        "Generating '{}' via {} + {}...",
        args.prompt,
        image_provider.name(),
        mesh_provider.name()
    );

    let pipeline = ForgePipeline::new(image_provider, mesh_provider, &output_dir);
    let mut session = ForgeSession::with_prompt(&args.prompt);

    pipeline.run(&mut session, |status| {
        println!("[{:>3}%] {}", status.progress_percent(), status_line(status));
    })?;

    match session.status() {
        GenerationStatus::Completed { model, .. } => {
            let image_path = pipeline.image_path_for(session.prompt());

            println!("  Image: {}", image_path.display());
            println!("  Model: {}", model.display());
            if let Ok(hash) = ContentHash::from_file(model) {
                println!("  Hash: {}", hash.to_prefixed_hex());
            }

            if args.download {
                if let Some(dest) = session.download_to(Path::new("."))? {
                    println!("  Downloaded: {}", dest.display());
                }
            }

            if args.view {
                let page = ViewerPage::write(
                    model,
                    Some(&image_path),
                    &Path::new(&output_dir).join("viewer.html"),
                    &ViewerOptions::default(),
                )?;
                println!("  Viewer: {}", page.persist().display());
            }

            Ok(())
        }
        GenerationStatus::Failed { error } => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
        other => {
            // The pipeline always lands in a terminal state
            anyhow::bail!("Generation ended in unexpected state '{}'", other.label());
        }
    }
}

fn status_line(status: &GenerationStatus) -> &str {
    match status {
        GenerationStatus::Idle => "Idle",
        GenerationStatus::GeneratingImage { message } => message,
        GenerationStatus::GeneratingMesh { message, .. } => message,
        GenerationStatus::Completed { message, .. } => message,
        GenerationStatus::Failed { error } => error,
    }
}
