//! Element file reading

use std::path::Path;

use anyhow::{Context, Result};
use plexus_config::InputFormat;
use plexus_core::Element;
use tracing::debug;

/// Read every element of `path`.
///
/// `Json` expects a single array; `JsonLines` one element per line, with
/// blank lines ignored.
pub fn read_elements(path: &Path, format: InputFormat) -> Result<Vec<Element>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read element file '{}'", path.display()))?;

    let elements = parse_elements(&content, format)
        .with_context(|| format!("Failed to parse element file '{}'", path.display()))?;

    debug!(
        "Read {} elements from {:?} as {}",
        elements.len(),
        path,
        format
    );
    Ok(elements)
}

fn parse_elements(content: &str, format: InputFormat) -> Result<Vec<Element>> {
    match format {
        InputFormat::Json => Ok(serde_json::from_str(content)?),
        InputFormat::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).with_context(|| format!("Invalid element on line {}", index + 1))
            })
            .collect(),
    }
}
