//! Document and configuration stores
//!
//! Both stores are keyed by a stable source name. The pipeline fetches
//! everything it needs before cleaning starts and persists results after
//! cleaning finishes, so implementations only need to be `Send + Sync`, not
//! fast.

use crate::error::Result;
use chaptrim_core::CleaningSpec;

pub mod fs;
pub mod memory;

pub use fs::{FsConfigStore, FsDocumentStore};
pub use memory::{
    InMemoryConfigStore, InMemoryDocumentStore, SequenceDocumentStore, StaticConfigStore,
};

/// A raw document waiting to be cleaned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Stable key shared with the configuration store
    pub source_name: String,
    /// Full document text
    pub content: String,
}

impl RawDocument {
    /// Create a raw document
    pub fn new(source_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            content: content.into(),
        }
    }
}

/// Source of raw documents and sink for cleaned ones
pub trait DocumentStore: Send + Sync {
    /// Fetch every raw document
    fn raw_documents(&self) -> Result<Vec<RawDocument>>;

    /// Store the cleaned text of a source
    fn set_processed_document(&self, source_name: &str, content: &str) -> Result<()>;
}

/// Per-source cleaning specifications
pub trait ConfigStore: Send + Sync {
    /// Fetch the specification of a source
    ///
    /// Returns [`EngineError::MissingConfig`](crate::EngineError::MissingConfig)
    /// when the source has none.
    fn config(&self, source_name: &str) -> Result<CleaningSpec>;

    /// Store the specification of a source
    fn set_config(&self, source_name: &str, spec: &CleaningSpec) -> Result<()>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for Box<T> {
    fn raw_documents(&self) -> Result<Vec<RawDocument>> {
        (**self).raw_documents()
    }

    fn set_processed_document(&self, source_name: &str, content: &str) -> Result<()> {
        (**self).set_processed_document(source_name, content)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn config(&self, source_name: &str) -> Result<CleaningSpec> {
        (**self).config(source_name)
    }

    fn set_config(&self, source_name: &str, spec: &CleaningSpec) -> Result<()> {
        (**self).set_config(source_name, spec)
    }
}
