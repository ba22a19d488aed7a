//! Standalone HTML viewer page for generated meshes
//!
//! The page loads the model-viewer web component from a CDN and points it at
//! the GLB on disk. A `ViewerPage` owns the written file: it is removed on
//! drop unless `persist` is called, so a page created for a transient
//! preview never outlives its use.

use anyhow::Result;
use std::path::{Path, PathBuf};

const MODEL_VIEWER_SRC: &str =
    "https://ajax.googleapis.com/ajax/libs/model-viewer/3.5.0/model-viewer.min.js";

/// Display options for the viewer page
pub struct ViewerOptions {
    pub auto_rotate: bool,
    pub camera_controls: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            camera_controls: true,
        }
    }
}

/// A written viewer page, removed on drop unless persisted
pub struct ViewerPage {
    path: PathBuf,
    persisted: bool,
}

impl ViewerPage {
    /// Render and write the page to `output`
    pub fn write(
        model: &Path,
        image: Option<&Path>,
        output: &Path,
        options: &ViewerOptions,
    ) -> Result<Self> {
        let html = render_html(model, image, options);
        std::fs::write(output, html)?;
        Ok(Self {
            path: output.to_path_buf(),
            persisted: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the file on disk past the lifetime of this handle
    pub fn persist(mut self) -> PathBuf {
        self.persisted = true;
        self.path.clone()
    }
}

impl Drop for ViewerPage {
    fn drop(&mut self) {
        if !self.persisted {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

fn render_html(model: &Path, image: Option<&Path>, options: &ViewerOptions) -> String {
    let mut attrs = String::new();
    if options.auto_rotate {
        attrs.push_str(" auto-rotate");
    }
    if options.camera_controls {
        attrs.push_str(" camera-controls");
    }

    let image_panel = match image {
        Some(path) => format!(
            r#"    <div class="panel"><h2>Concept image</h2><img src="{}" alt="concept image"></div>
"#,
            path.display()
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Meshforge Viewer</title>
  <script type="module" src="{src}"></script>
  <style>
    body {{ margin: 0; background: #1a1a2e; color: #eee; font-family: sans-serif; display: flex; }}
    model-viewer {{ width: 100vw; height: 100vh; }}
    .panel {{ padding: 1rem; max-width: 320px; }}
    .panel img {{ width: 100%; border-radius: 8px; }}
  </style>
</head>
<body>
{image_panel}    <model-viewer src="{model}"{attrs} shadow-intensity="1" environment-image="neutral" exposure="1"></model-viewer>
</body>
</html>
"#,
        src = MODEL_VIEWER_SRC,
        image_panel = image_panel,
        model = model.display(),
        attrs = attrs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("forge_viewer_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_render_includes_model_and_script() {
        let html = render_html(Path::new("out/sword.glb"), None, &ViewerOptions::default());
        assert!(html.contains(r#"src="out/sword.glb""#));
        assert!(html.contains(MODEL_VIEWER_SRC));
        assert!(html.contains("auto-rotate"));
        assert!(html.contains("camera-controls"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_render_omits_disabled_attributes() {
        let options = ViewerOptions {
            auto_rotate: false,
            camera_controls: false,
        };
        let html = render_html(Path::new("m.glb"), None, &options);
        assert!(!html.contains("auto-rotate"));
        assert!(!html.contains("camera-controls"));
    }

    #[test]
    fn test_render_includes_optional_image_panel() {
        let html = render_html(
            Path::new("m.glb"),
            Some(Path::new("concept.png")),
            &ViewerOptions::default(),
        );
        assert!(html.contains(r#"<img src="concept.png""#));
    }

    #[test]
    fn test_page_removed_on_drop() {
        let dir = temp_dir();
        let output = dir.join("viewer.html");

        {
            let page =
                ViewerPage::write(Path::new("m.glb"), None, &output, &ViewerOptions::default())
                    .unwrap();
            assert!(page.path().exists());
        }
        assert!(!output.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_persisted_page_survives_drop() {
        let dir = temp_dir();
        let output = dir.join("viewer.html");

        let page = ViewerPage::write(Path::new("m.glb"), None, &output, &ViewerOptions::default())
            .unwrap();
        let kept = page.persist();

        assert!(kept.exists());
        assert!(std::fs::read_to_string(&kept).unwrap().contains("model-viewer"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
