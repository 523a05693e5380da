use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

use pdfpane::{AcquisitionController, Config, PathPicker};

pub async fn cmd_download(config: &Config, url: &str, filename: &str) -> Result<()> {
    let controller = AcquisitionController::from_config(config, Arc::new(PathPicker::default()))?;

    println!("⬇️  Downloading: {url}");
    let start = Instant::now();
    let path = controller.download(url, filename).await?;
    let size = tokio::fs::metadata(&path).await?.len();

    println!(
        "💾 Saved {size} bytes to {} in {:.1}ms",
        path.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
