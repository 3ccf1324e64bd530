//! Filesystem-backed stores
//!
//! Layout:
//!
//! ```text
//! raw/<source>.txt          raw documents
//! processed/<source>.txt    cleaned documents
//! configs/<source>/meta.json (or meta.toml)
//! ```

use super::{ConfigStore, DocumentStore, RawDocument};
use crate::error::{EngineError, Result};
use chaptrim_core::{CleaningSpec, ConfigFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of a per-source metadata document, without extension
const META_FILE_STEM: &str = "meta";

/// Extension of raw and processed documents
const DOCUMENT_EXTENSION: &str = "txt";

/// Source name of a document file (its file stem)
pub fn source_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
enum RawSources {
    /// Every `*.txt` file directly inside a directory
    Directory(PathBuf),
    /// An explicit list of files
    Files(Vec<PathBuf>),
}

/// Documents stored as text files
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    sources: RawSources,
    processed_dir: PathBuf,
}

impl FsDocumentStore {
    /// Read raw documents from `raw_dir/*.txt`, write to `processed_dir`
    pub fn new(raw_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources: RawSources::Directory(raw_dir.into()),
            processed_dir: processed_dir.into(),
        }
    }

    /// Read raw documents from an explicit file list
    pub fn from_files(files: Vec<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources: RawSources::Files(files),
            processed_dir: processed_dir.into(),
        }
    }

    /// Where the cleaned text of a source is written
    pub fn processed_path(&self, source_name: &str) -> PathBuf {
        self.processed_dir
            .join(format!("{source_name}.{DOCUMENT_EXTENSION}"))
    }

    /// Read the cleaned text of a source
    pub fn processed_document(&self, source_name: &str) -> Result<String> {
        let path = self.processed_path(source_name);
        if !path.is_file() {
            return Err(EngineError::MissingDocument {
                source_name: source_name.to_string(),
            });
        }
        fs::read_to_string(&path).map_err(|e| EngineError::io(path, e))
    }

    fn raw_paths(&self) -> Result<Vec<PathBuf>> {
        match &self.sources {
            RawSources::Files(files) => Ok(files.clone()),
            RawSources::Directory(dir) => {
                let entries = fs::read_dir(dir).map_err(|e| EngineError::io(dir, e))?;
                let mut paths = Vec::new();
                for entry in entries {
                    let path = entry.map_err(|e| EngineError::io(dir, e))?.path();
                    let is_document = path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION));
                    if path.is_file() && is_document {
                        paths.push(path);
                    }
                }
                paths.sort();
                Ok(paths)
            }
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn raw_documents(&self) -> Result<Vec<RawDocument>> {
        self.raw_paths()?
            .into_iter()
            .map(|path| {
                let name = source_name(&path).ok_or_else(|| {
                    EngineError::ConfigError(format!(
                        "cannot derive a source name from '{}'",
                        path.display()
                    ))
                })?;
                let content = fs::read_to_string(&path).map_err(|e| EngineError::io(&path, e))?;
                log::debug!("Loaded raw document '{}' from {}", name, path.display());
                Ok(RawDocument::new(name, content))
            })
            .collect()
    }

    fn set_processed_document(&self, source_name: &str, content: &str) -> Result<()> {
        fs::create_dir_all(&self.processed_dir)
            .map_err(|e| EngineError::io(&self.processed_dir, e))?;
        let path = self.processed_path(source_name);
        fs::write(&path, content).map_err(|e| EngineError::io(&path, e))?;
        log::debug!("Wrote processed document to {}", path.display());
        Ok(())
    }
}

/// Specifications stored as `<root>/<source>/meta.{json,toml}`
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    root: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Existing metadata file of a source, JSON preferred over TOML
    pub fn config_path(&self, source_name: &str) -> Option<PathBuf> {
        [ConfigFormat::Json, ConfigFormat::Toml]
            .into_iter()
            .map(|format| self.meta_path(source_name, format))
            .find(|path| path.is_file())
    }

    fn meta_path(&self, source_name: &str, format: ConfigFormat) -> PathBuf {
        self.root
            .join(source_name)
            .join(format!("{META_FILE_STEM}.{}", format.extension()))
    }
}

impl ConfigStore for FsConfigStore {
    fn config(&self, source_name: &str) -> Result<CleaningSpec> {
        let path = self
            .config_path(source_name)
            .ok_or_else(|| EngineError::MissingConfig {
                source_name: source_name.to_string(),
            })?;
        log::debug!("Loading cleaning config for '{}' from {}", source_name, path.display());
        CleaningSpec::from_file(&path).map_err(|e| EngineError::invalid_config(source_name, e))
    }

    fn set_config(&self, source_name: &str, spec: &CleaningSpec) -> Result<()> {
        let dir = self.root.join(source_name);
        fs::create_dir_all(&dir).map_err(|e| EngineError::io(&dir, e))?;
        spec.save(&self.meta_path(source_name, ConfigFormat::Json))
            .map_err(|e| EngineError::invalid_config(source_name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_name_is_file_stem() {
        assert_eq!(source_name(Path::new("raw/finance-101.txt")).as_deref(), Some("finance-101"));
        assert_eq!(source_name(Path::new("book")).as_deref(), Some("book"));
    }

    #[test]
    fn test_directory_listing_only_takes_txt_files() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().join("raw");
        fs::create_dir(&raw).unwrap();
        fs::write(raw.join("b.txt"), "second").unwrap();
        fs::write(raw.join("a.txt"), "first").unwrap();
        fs::write(raw.join("notes.md"), "ignored").unwrap();
        fs::create_dir(raw.join("nested.txt")).unwrap();

        let store = FsDocumentStore::new(&raw, dir.path().join("processed"));
        let documents = store.raw_documents().unwrap();

        assert_eq!(
            documents,
            vec![RawDocument::new("a", "first"), RawDocument::new("b", "second")]
        );
    }

    #[test]
    fn test_missing_raw_dir_is_io_error() {
        let store = FsDocumentStore::new("/nonexistent/raw", "/nonexistent/processed");
        assert!(matches!(store.raw_documents(), Err(EngineError::Io { .. })));
    }

    #[test]
    fn test_processed_document_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::from_files(Vec::new(), dir.path().join("out/processed"));

        assert!(matches!(
            store.processed_document("book"),
            Err(EngineError::MissingDocument { .. })
        ));
        store.set_processed_document("book", "clean text").unwrap();
        assert_eq!(store.processed_document("book").unwrap(), "clean text");
        assert!(store.processed_path("book").ends_with("out/processed/book.txt"));
    }

    #[test]
    fn test_config_store_prefers_json() {
        let dir = TempDir::new().unwrap();
        let source_dir = dir.path().join("book");
        fs::create_dir(&source_dir).unwrap();
        fs::write(
            source_dir.join("meta.toml"),
            "[remove_patterns]\nchapter_separator = \"toml\"\n",
        )
        .unwrap();

        let store = FsConfigStore::new(dir.path());
        let spec = store.config("book").unwrap();
        assert_eq!(spec.remove_patterns.chapter_separator.as_text(), Some("toml"));

        fs::write(
            source_dir.join("meta.json"),
            r#"{"remove_patterns": {"chapter_separator": "json"}}"#,
        )
        .unwrap();
        let spec = store.config("book").unwrap();
        assert_eq!(spec.remove_patterns.chapter_separator.as_text(), Some("json"));
    }

    #[test]
    fn test_config_store_missing_and_invalid() {
        let dir = TempDir::new().unwrap();
        let store = FsConfigStore::new(dir.path());

        assert!(matches!(
            store.config("absent"),
            Err(EngineError::MissingConfig { .. })
        ));

        fs::create_dir(dir.path().join("broken")).unwrap();
        fs::write(dir.path().join("broken/meta.json"), "{ nope").unwrap();
        assert!(matches!(
            store.config("broken"),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_set_config_writes_meta_json() {
        let dir = TempDir::new().unwrap();
        let store = FsConfigStore::new(dir.path());
        let spec = CleaningSpec::builder().inline_pattern("Рис.").build();

        store.set_config("new-book", &spec).unwrap();
        assert!(dir.path().join("new-book/meta.json").is_file());
        assert_eq!(store.config("new-book").unwrap(), spec);
    }
}
