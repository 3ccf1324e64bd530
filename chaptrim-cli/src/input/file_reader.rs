//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use chaptrim_engine::RawDocument;
use std::fs;
use std::path::Path;

/// Reads raw documents from disk
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a file as a raw document named after its stem
    pub fn read_document(path: &Path) -> Result<RawDocument> {
        let source_name = chaptrim_engine::store::fs::source_name(path)
            .with_context(|| format!("Cannot derive a source name from {}", path.display()))?;
        Ok(RawDocument::new(source_name, Self::read_text(path)?))
    }
}
