//! Output shaping and writing for generated task definitions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use deplojo_compose::GeneratedTaskDefinition;
use deplojo_compose::registration::to_registration_payload;
use serde_json::Value;

/// Shape of each emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The generated definition, environment as a mapping.
    Raw,
    /// The payload sent to the orchestration service, environment as a
    /// list of name/value pairs.
    Registration,
}

/// Converts generated entries into the documents to emit, keyed by name.
#[must_use]
pub fn render_documents(
    generated: &BTreeMap<String, GeneratedTaskDefinition>,
    format: OutputFormat,
) -> BTreeMap<String, Value> {
    generated
        .iter()
        .map(|(name, entry)| {
            let document = match format {
                OutputFormat::Raw => entry.definition.clone().into_value(),
                OutputFormat::Registration => to_registration_payload(&entry.definition),
            };
            (name.clone(), document)
        })
        .collect()
}

/// Writes each document to `<dir>/<name>.json`, creating `dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn write_documents(
    dir: &Path,
    documents: &BTreeMap<String, Value>,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(documents.len());
    for (name, document) in documents {
        let path = dir.join(format!("{name}.json"));
        let mut content = serde_json::to_string_pretty(document)?;
        content.push('\n');
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), "task definition written");
        written.push(path);
    }
    Ok(written)
}
