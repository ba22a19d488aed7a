//! Per-session state: the prompt and the status object
//!
//! A session starts at `Idle`, is driven by the pipeline, and can be reset by
//! the user for a fresh generation. Reset clears the prompt and returns the
//! status to exactly `Idle`.

use crate::status::GenerationStatus;
use forge_core::Result;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A single user session: prompt plus generation status
#[derive(Debug, Default)]
pub struct ForgeSession {
    prompt: String,
    status: GenerationStatus,
}

impl ForgeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            status: GenerationStatus::Idle,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn status(&self) -> &GenerationStatus {
        &self.status
    }

    /// Advance the status machine. Only the pipeline calls this.
    pub(crate) fn transition(&mut self, next: GenerationStatus) {
        debug_assert!(
            self.status.can_transition_to(&next),
            "illegal status transition: {} -> {}",
            self.status.label(),
            next.label()
        );
        self.status = next;
    }

    /// Return to `Idle` with the prompt cleared
    pub fn reset(&mut self) {
        self.prompt.clear();
        self.status = GenerationStatus::Idle;
    }

    /// Copy the finished mesh into `dir` under a timestamped filename.
    /// No-op (`Ok(None)`) unless the session holds a completed model.
    pub fn download_to(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let GenerationStatus::Completed { model, .. } = &self.status else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)?;
        let dest = dir.join(download_file_name());
        std::fs::copy(model, &dest)?;
        Ok(Some(dest))
    }
}

/// Timestamped download filename, e.g. `meshforge_1735689600000.glb`
pub fn download_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("meshforge_{}.glb", millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ImageRef;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("forge_session_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = ForgeSession::new();
        assert_eq!(session.status(), &GenerationStatus::Idle);
        assert!(session.prompt().is_empty());
    }

    #[test]
    fn test_reset_clears_prompt_and_status() {
        let mut session = ForgeSession::with_prompt("a crystal dagger");
        session.transition(GenerationStatus::GeneratingImage {
            message: "working".to_string(),
        });
        session.transition(GenerationStatus::Failed {
            error: "boom".to_string(),
        });

        session.reset();
        assert_eq!(session.status(), &GenerationStatus::Idle);
        assert!(session.prompt().is_empty());
    }

    #[test]
    fn test_download_is_noop_without_model() {
        let dir = temp_dir();
        let session = ForgeSession::with_prompt("a sword");
        assert!(session.download_to(&dir).unwrap().is_none());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_download_copies_completed_model() {
        let dir = temp_dir();
        let model = dir.join("staged.glb");
        std::fs::write(&model, b"glTF fake").unwrap();

        let mut session = ForgeSession::with_prompt("a sword");
        session.transition(GenerationStatus::GeneratingImage {
            message: "working".to_string(),
        });
        session.transition(GenerationStatus::GeneratingMesh {
            image: ImageRef::from_png_bytes(b"png"),
            message: "working".to_string(),
        });
        session.transition(GenerationStatus::Completed {
            image: ImageRef::from_png_bytes(b"png"),
            model: model.clone(),
            message: "done".to_string(),
        });

        let dest = session.download_to(&dir).unwrap().unwrap();
        let name = dest.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("meshforge_"));
        assert!(name.ends_with(".glb"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"glTF fake");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_download_file_name_format() {
        let name = download_file_name();
        assert!(name.starts_with("meshforge_"));
        assert!(name.ends_with(".glb"));
        let stamp = &name["meshforge_".len()..name.len() - ".glb".len()];
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }
}
