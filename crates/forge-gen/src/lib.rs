//! Forge Gen - prompt to concept image to 3D mesh
//!
//! A single linear workflow: the user's prompt goes to an image provider
//! (Gemini), the resulting concept image goes to an image-to-3D provider
//! (Hugging Face inference, or a local placeholder when no credential is
//! configured), and a status object tracks the stages in between.

pub mod config;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod session;
pub mod status;
pub mod style;

pub use config::ForgeConfig;
pub use pipeline::ForgePipeline;
pub use provider::{ImageProvider, ImageRef, MeshProvider, ProviderStatus};
pub use session::ForgeSession;
pub use status::GenerationStatus;
pub use style::StylePreset;
