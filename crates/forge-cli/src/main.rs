//! Meshforge CLI - prompt to concept image to 3D mesh

mod commands;
mod viewer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, generate, view};

#[derive(Parser)]
#[command(name = "meshforge")]
#[command(about = "Generate 3D assets from text prompts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a 3D asset from a text prompt
    Generate {
        /// Description of the asset (e.g., "a flaming obsidian dagger")
        prompt: String,

        /// Style preset name
        #[arg(long)]
        style: Option<String>,

        /// Image provider (gemini, mock)
        #[arg(long)]
        image_provider: Option<String>,

        /// Mesh provider (huggingface, placeholder); picked from config if omitted
        #[arg(long)]
        mesh_provider: Option<String>,

        /// Output directory for generated artifacts
        #[arg(short, long)]
        output: Option<String>,

        /// Copy the finished mesh into the current directory
        #[arg(long)]
        download: bool,

        /// Write an HTML viewer page next to the generated files
        #[arg(long)]
        view: bool,
    },

    /// Write an HTML viewer page for an existing mesh
    View {
        /// Path to the GLB file
        model: String,

        /// Concept image to show alongside the model
        #[arg(long)]
        image: Option<String>,

        /// Output path for the viewer page
        #[arg(short, long, default_value = "viewer.html")]
        output: String,

        /// Disable model auto-rotation
        #[arg(long)]
        no_auto_rotate: bool,

        /// Disable mouse camera controls
        #[arg(long)]
        no_camera_controls: bool,
    },

    /// Check provider configuration and credentials
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            prompt,
            style,
            image_provider,
            mesh_provider,
            output,
            download,
            view,
        } => generate::run(generate::GenerateArgs {
            prompt,
            style,
            image_provider,
            mesh_provider,
            output,
            download,
            view,
        }),
        Commands::View {
            model,
            image,
            output,
            no_auto_rotate,
            no_camera_controls,
        } => view::run(view::ViewArgs {
            model,
            image,
            output,
            no_auto_rotate,
            no_camera_controls,
        }),
        Commands::Check => check::run(),
    }
}
