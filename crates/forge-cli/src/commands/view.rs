//! The view command: write a standalone HTML viewer for a GLB file

use crate::viewer::{ViewerOptions, ViewerPage};
use anyhow::Result;
use std::path::Path;

pub struct ViewArgs {
    pub model: String,
    pub image: Option<String>,
    pub output: String,
    pub no_auto_rotate: bool,
    pub no_camera_controls: bool,
}

pub fn run(args: ViewArgs) -> Result<()> {
    let model = Path::new(&args.model);
    if !model.exists() {
        anyhow::bail!("File not found: {}", args.model);
    }

    let options = ViewerOptions {
        auto_rotate: !args.no_auto_rotate,
        camera_controls: !args.no_camera_controls,
    };

    let image = args.image.as_deref().map(Path::new);
    let page = ViewerPage::write(model, image, Path::new(&args.output), &options)?;
    let path = page.persist();

    println!("Viewer page: {}", path.display());
    println!("Open it in a browser to inspect the model.");

    Ok(())
}
