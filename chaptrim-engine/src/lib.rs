//! Batch orchestration for document cleaning
//!
//! This crate connects the cleaning core to the outside world: it defines
//! the document and configuration stores, runs batches of documents
//! sequentially or on a rayon pool, and persists the results.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod store;

// Re-export key types
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use executor::{auto_select, CleaningJob, ExecutionMode, Executor, SequentialExecutor};
#[cfg(feature = "parallel")]
pub use executor::ParallelExecutor;
pub use pipeline::{BatchReport, CleaningPipeline, DocumentReport};
pub use store::{
    ConfigStore, DocumentStore, FsConfigStore, FsDocumentStore, InMemoryConfigStore,
    InMemoryDocumentStore, RawDocument, SequenceDocumentStore, StaticConfigStore,
};

// Re-export from core for convenience
pub use chaptrim_core::{CleanedDocument, CleaningSpec, CleaningStats, DocumentProcessor};
