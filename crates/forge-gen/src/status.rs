//! Generation status machine
//!
//! A generation moves strictly `Idle -> GeneratingImage -> GeneratingMesh ->
//! Completed`, with `Failed` reachable only from the two generating stages.
//! There is no retry or partial recovery; a failed session must be restarted
//! by the user. Payload fields exist only on the variants where they are
//! valid, so states like "completed without an image" cannot be constructed.

use crate::provider::ImageRef;
use std::path::PathBuf;

/// Current state of a generation workflow. Mutated only by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStatus {
    Idle,
    GeneratingImage {
        message: String,
    },
    GeneratingMesh {
        image: ImageRef,
        message: String,
    },
    Completed {
        image: ImageRef,
        model: PathBuf,
        message: String,
    },
    Failed {
        error: String,
    },
}

impl GenerationStatus {
    /// Progress percentage shown by the presentation layer
    pub fn progress_percent(&self) -> u8 {
        match self {
            GenerationStatus::Idle | GenerationStatus::Failed { .. } => 0,
            GenerationStatus::GeneratingImage { .. } => 33,
            GenerationStatus::GeneratingMesh { .. } => 66,
            GenerationStatus::Completed { .. } => 100,
        }
    }

    /// Short machine-readable name for display and test assertions
    pub fn label(&self) -> &'static str {
        match self {
            GenerationStatus::Idle => "idle",
            GenerationStatus::GeneratingImage { .. } => "generating-image",
            GenerationStatus::GeneratingMesh { .. } => "generating-mesh",
            GenerationStatus::Completed { .. } => "completed",
            GenerationStatus::Failed { .. } => "failed",
        }
    }

    /// Whether the workflow has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationStatus::Completed { .. } | GenerationStatus::Failed { .. }
        )
    }

    /// Whether a new submission may start from this state. The form is only
    /// shown when idle or after a failure.
    pub fn accepts_submission(&self) -> bool {
        matches!(
            self,
            GenerationStatus::Idle | GenerationStatus::Failed { .. }
        )
    }

    /// Whether the pipeline may move from this state to `next`. Reset back to
    /// `Idle` is a session operation and deliberately not part of this matrix.
    pub fn can_transition_to(&self, next: &GenerationStatus) -> bool {
        match (self, next) {
            (GenerationStatus::Idle, GenerationStatus::GeneratingImage { .. }) => true,
            (GenerationStatus::Failed { .. }, GenerationStatus::GeneratingImage { .. }) => true,
            (GenerationStatus::GeneratingImage { .. }, GenerationStatus::GeneratingMesh { .. }) => {
                true
            }
            (GenerationStatus::GeneratingImage { .. }, GenerationStatus::Failed { .. }) => true,
            (GenerationStatus::GeneratingMesh { .. }, GenerationStatus::Completed { .. }) => true,
            (GenerationStatus::GeneratingMesh { .. }, GenerationStatus::Failed { .. }) => true,
            _ => false,
        }
    }
}

impl Default for GenerationStatus {
    fn default() -> Self {
        GenerationStatus::Idle
    }
}
