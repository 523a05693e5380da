use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use pdfpane::{AcquisitionController, Config, DocumentPicker, PathPicker, PromptPicker, Status};

use super::output::output_result;
use crate::OutputFormat;

pub async fn cmd_open(config: &Config, path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let picker: Arc<dyn DocumentPicker> = match path {
        Some(path) => Arc::new(PathPicker::new(Some(path))),
        None => Arc::new(PromptPicker),
    };
    let controller = AcquisitionController::from_config(config, picker)?;

    let state = controller.select_and_load().await;
    // The controller is fresh, so the only way to still be idle after a
    // selection is a dismissed picker: nothing to show, nothing went wrong.
    if state.status == Status::Idle {
        println!("No document selected");
        return Ok(());
    }

    let plan = controller.render_plan().await;
    output_result(&state, &plan, format)
}
