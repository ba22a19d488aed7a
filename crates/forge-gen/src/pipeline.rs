//! Generation pipeline
//!
//! Drives a session through the two provider calls in order, emitting each
//! status to an observer as it happens. A provider failure lands the session
//! in `Failed` with the provider's message; it is not an `Err` from `run`,
//! because a failed generation is a normal outcome the caller presents to the
//! user. `Err` is reserved for submissions that never start.

use crate::provider::{ImageProvider, ImageRef, MeshProvider};
use crate::session::ForgeSession;
use crate::status::GenerationStatus;
use forge_core::{ForgeError, Result};
use std::path::PathBuf;

const GENERATING_IMAGE_MESSAGE: &str = "Forging concept image...";
const GENERATING_MESH_MESSAGE: &str = "Casting 3D mesh...";
const COMPLETED_MESSAGE: &str = "Forge complete!";
const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred during generation.";

/// Orchestrates prompt -> image -> mesh and stages the artifacts on disk
pub struct ForgePipeline {
    image: Box<dyn ImageProvider>,
    mesh: Box<dyn MeshProvider>,
    output_dir: PathBuf,
}

impl ForgePipeline {
    pub fn new(
        image: Box<dyn ImageProvider>,
        mesh: Box<dyn MeshProvider>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image,
            mesh,
            output_dir: output_dir.into(),
        }
    }

    /// Run a full generation for the session's prompt.
    ///
    /// The observer sees every status the session enters, in order. Returns
    /// `Err` only when the submission is rejected outright (empty prompt, or
    /// a generation already in flight); in that case the session status is
    /// untouched.
    pub fn run<F>(&self, session: &mut ForgeSession, mut observe: F) -> Result<()>
    where
        F: FnMut(&GenerationStatus),
    {
        if session.prompt().trim().is_empty() {
            return Err(ForgeError::EmptyPrompt);
        }
        if !session.status().accepts_submission() {
            return Err(ForgeError::Generation(
                "session already has a generation in progress or completed; reset before submitting again".to_string(),
            ));
        }

        session.transition(GenerationStatus::GeneratingImage {
            message: GENERATING_IMAGE_MESSAGE.to_string(),
        });
        observe(session.status());

        let image = match self.image.generate_image(session.prompt()) {
            Ok(image) => image,
            Err(e) => {
                session.transition(GenerationStatus::Failed {
                    error: failure_message(&e),
                });
                observe(session.status());
                return Ok(());
            }
        };

        session.transition(GenerationStatus::GeneratingMesh {
            image: image.clone(),
            message: GENERATING_MESH_MESSAGE.to_string(),
        });
        observe(session.status());

        let staged = self
            .mesh
            .generate_mesh(&image)
            .and_then(|glb| self.stage(&asset_slug(session.prompt()), &image, &glb));

        match staged {
            Ok(model) => {
                session.transition(GenerationStatus::Completed {
                    image,
                    model,
                    message: COMPLETED_MESSAGE.to_string(),
                });
            }
            Err(e) => {
                session.transition(GenerationStatus::Failed {
                    error: failure_message(&e),
                });
            }
        }
        observe(session.status());

        Ok(())
    }

    /// Write the concept image and mesh into the output directory, returning
    /// the model path
    fn stage(&self, slug: &str, image: &ImageRef, glb: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let image_path = self.output_dir.join(format!("{}.png", slug));
        std::fs::write(&image_path, image.to_bytes()?)?;

        let model_path = self.output_dir.join(format!("{}.glb", slug));
        std::fs::write(&model_path, glb)?;

        Ok(model_path)
    }

    /// Path where the concept image for a prompt is staged
    pub fn image_path_for(&self, prompt: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", asset_slug(prompt)))
    }
}

/// Filesystem-safe slug from the first few prompt words
fn asset_slug(prompt: &str) -> String {
    let slug: String = prompt
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if slug.is_empty() {
        "generation".to_string()
    } else {
        slug
    }
}

fn failure_message(error: &ForgeError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderStatus;
    use crate::providers::mock::MockImageProvider;
    use crate::providers::placeholder::PlaceholderMeshProvider;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct FailingImageProvider;

    impl ImageProvider for FailingImageProvider {
        fn name(&self) -> &str {
            "failing"
        }
        fn health_check(&self) -> Result<ProviderStatus> {
            Ok(ProviderStatus::Available)
        }
        fn generate_image(&self, _prompt: &str) -> Result<ImageRef> {
            Err(ForgeError::Generation("image service exploded".to_string()))
        }
    }

    struct CountingMeshProvider {
        calls: Arc<AtomicUsize>,
        result: Result<Vec<u8>>,
    }

    impl MeshProvider for CountingMeshProvider {
        fn name(&self) -> &str {
            "counting"
        }
        fn health_check(&self) -> Result<ProviderStatus> {
            Ok(ProviderStatus::Available)
        }
        fn generate_mesh(&self, _image: &ImageRef) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(glb) => Ok(glb.clone()),
                Err(e) => Err(ForgeError::Provider(e.to_string())),
            }
        }
    }

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("forge_pipeline_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn happy_pipeline(dir: &Path) -> ForgePipeline {
        ForgePipeline::new(
            Box::new(MockImageProvider::new()),
            Box::new(PlaceholderMeshProvider::with_delay(Duration::ZERO)),
            dir,
        )
    }

    #[test]
    fn test_full_run_visits_stages_in_order() {
        let dir = temp_dir();
        let pipeline = happy_pipeline(&dir);
        let mut session = ForgeSession::with_prompt("a crystal war hammer");

        let mut labels = Vec::new();
        pipeline
            .run(&mut session, |status| labels.push(status.label()))
            .unwrap();

        assert_eq!(
            labels,
            vec!["generating-image", "generating-mesh", "completed"]
        );

        let GenerationStatus::Completed { model, .. } = session.status() else {
            panic!("expected completed, got {}", session.status().label());
        };
        assert!(model.exists());
        assert!(std::fs::read(model).unwrap().starts_with(b"glTF"));
        assert!(dir.join("a_crystal_war.png").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_prompt_rejected_without_transition() {
        let dir = temp_dir();
        let pipeline = happy_pipeline(&dir);

        for prompt in ["", "   ", "\t\n"] {
            let mut session = ForgeSession::with_prompt(prompt);
            let mut observed = 0;
            let err = pipeline.run(&mut session, |_| observed += 1).unwrap_err();

            assert!(matches!(err, ForgeError::EmptyPrompt));
            assert_eq!(observed, 0);
            assert_eq!(session.status(), &GenerationStatus::Idle);
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_image_failure_skips_mesh_provider() {
        let dir = temp_dir();
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = ForgePipeline::new(
            Box::new(FailingImageProvider),
            Box::new(CountingMeshProvider {
                calls: calls.clone(),
                result: Ok(Vec::new()),
            }),
            &dir,
        );

        let mut session = ForgeSession::with_prompt("a sword");
        let mut labels = Vec::new();
        pipeline
            .run(&mut session, |status| labels.push(status.label()))
            .unwrap();

        assert_eq!(labels, vec!["generating-image", "failed"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let GenerationStatus::Failed { error } = session.status() else {
            panic!("expected failed");
        };
        assert!(error.contains("image service exploded"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_mesh_failure_carries_provider_message() {
        let dir = temp_dir();
        let pipeline = ForgePipeline::new(
            Box::new(MockImageProvider::new()),
            Box::new(CountingMeshProvider {
                calls: Arc::new(AtomicUsize::new(0)),
                result: Err(ForgeError::ModelLoading(
                    "The 3D generation model is currently loading. Please try again in a minute."
                        .to_string(),
                )),
            }),
            &dir,
        );

        let mut session = ForgeSession::with_prompt("a shield");
        pipeline.run(&mut session, |_| {}).unwrap();

        let GenerationStatus::Failed { error } = session.status() else {
            panic!("expected failed");
        };
        assert!(error.contains("currently loading"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_resubmission_rejected_until_reset() {
        let dir = temp_dir();
        let pipeline = happy_pipeline(&dir);
        let mut session = ForgeSession::with_prompt("an axe");

        pipeline.run(&mut session, |_| {}).unwrap();
        assert_eq!(session.status().label(), "completed");

        let err = pipeline.run(&mut session, |_| {}).unwrap_err();
        assert!(err.to_string().contains("reset"));
        assert_eq!(session.status().label(), "completed");

        session.reset();
        session.set_prompt("an axe");
        pipeline.run(&mut session, |_| {}).unwrap();
        assert_eq!(session.status().label(), "completed");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_restart_allowed_after_failure() {
        let dir = temp_dir();
        let failing = ForgePipeline::new(
            Box::new(FailingImageProvider),
            Box::new(PlaceholderMeshProvider::with_delay(Duration::ZERO)),
            &dir,
        );

        let mut session = ForgeSession::with_prompt("a bow");
        failing.run(&mut session, |_| {}).unwrap();
        assert_eq!(session.status().label(), "failed");

        // Same session, same prompt, working provider this time
        let working = happy_pipeline(&dir);
        working.run(&mut session, |_| {}).unwrap();
        assert_eq!(session.status().label(), "completed");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_asset_slug() {
        assert_eq!(asset_slug("a crystal war hammer"), "a_crystal_war");
        assert_eq!(asset_slug("Sword!"), "sword");
        assert_eq!(asset_slug("  spaced   out  "), "spaced_out");
        assert_eq!(asset_slug("!!!"), "generation");
    }
}
