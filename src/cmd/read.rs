use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use pdfpane::{AcquisitionController, Config, PathPicker};

use super::output::output_result;
use crate::OutputFormat;

pub async fn cmd_read(config: &Config, format: OutputFormat) -> Result<()> {
    let controller = AcquisitionController::from_config(config, Arc::new(PathPicker::default()))?;

    if matches!(format, OutputFormat::Text) {
        println!("🌐 Loading: {}", controller.document_url());
    }
    let start = Instant::now();
    let state = controller.load_from_remote().await;
    let plan = controller.render_plan().await;
    if matches!(format, OutputFormat::Text) {
        println!("⏱️  {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
    }

    output_result(&state, &plan, format)
}
