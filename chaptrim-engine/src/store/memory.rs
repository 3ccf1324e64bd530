//! In-memory stores

use super::{ConfigStore, DocumentStore, RawDocument};
use crate::error::{EngineError, Result};
use chaptrim_core::CleaningSpec;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| EngineError::LockPoisoned(e.to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| EngineError::LockPoisoned(e.to_string()))
}

/// Documents held in memory, ordered by source name
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    raw: RwLock<BTreeMap<String, String>>,
    processed: RwLock<BTreeMap<String, String>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with raw documents
    pub fn with_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let raw = documents
            .into_iter()
            .map(|doc| (doc.source_name, doc.content))
            .collect();
        Self {
            raw: RwLock::new(raw),
            processed: RwLock::default(),
        }
    }

    /// Add or replace a raw document
    pub fn set_raw_document(&self, source_name: &str, content: &str) -> Result<()> {
        write(&self.raw)?.insert(source_name.to_string(), content.to_string());
        Ok(())
    }

    /// Cleaned text of a source, if it has been processed
    pub fn processed_document(&self, source_name: &str) -> Result<Option<String>> {
        Ok(read(&self.processed)?.get(source_name).cloned())
    }

    /// Every processed document, ordered by source name
    pub fn processed_documents(&self) -> Result<Vec<(String, String)>> {
        Ok(read(&self.processed)?
            .iter()
            .map(|(name, content)| (name.clone(), content.clone()))
            .collect())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn raw_documents(&self) -> Result<Vec<RawDocument>> {
        Ok(read(&self.raw)?
            .iter()
            .map(|(name, content)| RawDocument::new(name.as_str(), content.as_str()))
            .collect())
    }

    fn set_processed_document(&self, source_name: &str, content: &str) -> Result<()> {
        write(&self.processed)?.insert(source_name.to_string(), content.to_string());
        Ok(())
    }
}

/// Documents held in memory in insertion order
///
/// Unlike [`InMemoryDocumentStore`], duplicate source names are kept apart:
/// raw documents come back in the order they were given and every cleaned
/// text is appended in the order it was stored.
#[derive(Debug, Default)]
pub struct SequenceDocumentStore {
    raw: Vec<RawDocument>,
    processed: RwLock<Vec<(String, String)>>,
}

impl SequenceDocumentStore {
    /// Create a store holding `documents` in the given order
    pub fn new(documents: Vec<RawDocument>) -> Self {
        Self {
            raw: documents,
            processed: RwLock::default(),
        }
    }

    /// Every processed document, in the order it was stored
    pub fn processed_documents(&self) -> Result<Vec<(String, String)>> {
        Ok(read(&self.processed)?.clone())
    }
}

impl DocumentStore for SequenceDocumentStore {
    fn raw_documents(&self) -> Result<Vec<RawDocument>> {
        Ok(self.raw.clone())
    }

    fn set_processed_document(&self, source_name: &str, content: &str) -> Result<()> {
        write(&self.processed)?.push((source_name.to_string(), content.to_string()));
        Ok(())
    }
}

/// Specifications held in memory
#[derive(Debug, Default)]
pub struct InMemoryConfigStore {
    configs: RwLock<BTreeMap<String, CleaningSpec>>,
}

impl InMemoryConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn config(&self, source_name: &str) -> Result<CleaningSpec> {
        read(&self.configs)?
            .get(source_name)
            .cloned()
            .ok_or_else(|| EngineError::MissingConfig {
                source_name: source_name.to_string(),
            })
    }

    fn set_config(&self, source_name: &str, spec: &CleaningSpec) -> Result<()> {
        write(&self.configs)?.insert(source_name.to_string(), spec.clone());
        Ok(())
    }
}

/// One specification shared by every source
///
/// `set_config` is rejected: the cleaning spec is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigStore {
    spec: CleaningSpec,
}

impl StaticConfigStore {
    /// Serve `spec` for every source
    pub fn new(spec: CleaningSpec) -> Self {
        Self { spec }
    }
}

impl ConfigStore for StaticConfigStore {
    fn config(&self, _source_name: &str) -> Result<CleaningSpec> {
        Ok(self.spec.clone())
    }

    fn set_config(&self, source_name: &str, _spec: &CleaningSpec) -> Result<()> {
        Err(EngineError::ConfigError(format!(
            "static config store cannot store a config for '{source_name}'"
        )))
    }
}
