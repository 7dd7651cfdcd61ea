//! Loading and saving the edited file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use json_tree::Document;

/// Read and parse `path`. Any failure here is fatal for the editor.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = Document::parse(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    info!("loaded {} ({} bytes)", path.display(), text.len());
    Ok(document)
}

/// Pretty-print `document` with `indent` spaces and write it to `path`,
/// followed by a newline.
pub fn save_document(path: &Path, document: &Document, indent: usize) -> Result<()> {
    let mut text = document
        .to_pretty_string_with_indent(indent)
        .context("failed to serialize document")?;
    text.push('\n');
    fs::write(path, &text).with_context(|| format!("failed to write {}", path.display()))?;
    info!("saved {} ({} bytes)", path.display(), text.len());
    Ok(())
}
