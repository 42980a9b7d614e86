//! Loading captured pages from disk.

use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{DteError, Result};
use crate::types::{PageCapture, StyleSample, StyleSource};

/// Read and normalize a [`PageCapture`] JSON document.
pub fn load_capture(path: &Path) -> Result<PageCapture> {
    if !path.is_file() {
        return Err(DteError::capture(format!(
            "Capture file not found: {}",
            path.display()
        )));
    }

    let raw = std::fs::read_to_string(path)?;
    let capture = parse_capture(&raw)?;
    debug!(
        "loaded capture {} ({} samples, {} style sources)",
        path.display(),
        capture.samples.len(),
        capture.style_sources.len()
    );
    Ok(capture)
}

/// Capture document as written to disk. Samples stay untyped until each one
/// is converted on its own.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCapture {
    url: Option<String>,
    title: Option<String>,
    #[serde(default)]
    samples: Vec<Value>,
    #[serde(default)]
    style_sources: Vec<StyleSource>,
}

/// Parse a capture document.
///
/// A sample that does not match the [`StyleSample`] shape is dropped and the
/// rest are kept. An empty capture is valid and analyzes to empty tokens.
pub fn parse_capture(raw: &str) -> Result<PageCapture> {
    let document: RawCapture = serde_json::from_str(raw)?;

    let total = document.samples.len();
    let samples: Vec<StyleSample> = document
        .samples
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<StyleSample>(value) {
            Ok(sample) => Some(sample),
            Err(err) => {
                debug!("capture: skipping malformed sample #{i}: {err}");
                None
            }
        })
        .collect();
    if samples.len() < total {
        debug!("capture: kept {} of {} samples", samples.len(), total);
    }

    let mut capture = PageCapture {
        url: document.url,
        title: document.title,
        samples,
        style_sources: document.style_sources,
    };
    capture.normalize();
    Ok(capture)
}
