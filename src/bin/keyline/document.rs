//! Loading and normalizing input documents.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read a document from `path`, or from stdin when no path is given.
pub fn load(path: Option<&Path>) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read from stdin")?;
            input
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| {
        let offset = e.utf8_error().valid_up_to();
        anyhow::anyhow!("input is not valid UTF-8 (first invalid byte at offset {})", offset)
    })?;

    tracing::debug!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "<stdin>".into()),
        bytes = text.len(),
        lines = text.split('\n').count(),
        "loaded document"
    );

    Ok(text)
}

/// Re-serialize a JSON document with two-space indentation, keeping key order.
///
/// The output is the layout the locator expects, so keys in minified or
/// oddly formatted files become locatable.
pub fn normalize(text: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(text).context("failed to parse document as JSON")?;
    let pretty = serde_json::to_string_pretty(&value)?;

    tracing::debug!(
        before = text.len(),
        after = pretty.len(),
        "normalized document"
    );

    Ok(pretty)
}
