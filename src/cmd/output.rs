use anyhow::{bail, Result};
use serde::Serialize;

use pdfpane::{AcquisitionState, RenderMode, RenderPlan, Status};

use crate::OutputFormat;

/// Longest reference printed in text mode; data: URIs run to megabytes.
const MAX_REFERENCE_CHARS: usize = 120;

#[derive(Serialize)]
struct Report<'a> {
    state: &'a AcquisitionState,
    plan: &'a RenderPlan,
}

/// Print the settled state and its plan, failing when the attempt errored.
pub fn output_result(state: &AcquisitionState, plan: &RenderPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Report { state, plan })?);
        }
        OutputFormat::Text => {
            println!("📊 Status: {}", state.status);
            if let Some(source) = &state.source {
                println!("📄 Source: {}", source.reference());
            }
            if let Some(payload) = &state.payload {
                println!("📦 Payload: {} ({} chars)", payload.media_type(), payload.len());
            }
            output_plan(plan);
        }
    }

    if state.status == Status::Error {
        bail!(
            "acquisition failed: {}",
            state.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

pub fn output_plan(plan: &RenderPlan) {
    let mode = match plan.mode {
        RenderMode::InlineFrame => "inline-frame",
        RenderMode::EmbeddedViewerUrl => "embedded-viewer-url",
        RenderMode::None => "none",
    };
    println!("🖼️  Render: {mode}");
    if let Some(reference) = &plan.reference {
        println!("🔗 Reference: {}", truncate_text(reference, MAX_REFERENCE_CHARS));
    }
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}… ({} more bytes)", &text[..idx], text.len() - idx),
        None => text.to_string(),
    }
}
