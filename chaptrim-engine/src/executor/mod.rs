//! Execution strategies for cleaning a batch of documents
//!
//! Documents are independent: each one gets its own classifier state, so the
//! only thing workers share is the read-only [`DocumentProcessor`].

use crate::error::Result;
use chaptrim_core::{CleanedDocument, DocumentProcessor};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One document after another on the calling thread
    Sequential,
    /// Documents spread over a worker pool
    Parallel,
    /// Pick based on batch size
    #[default]
    Adaptive,
}

/// One document to clean
#[derive(Debug, Clone, Copy)]
pub struct CleaningJob<'a> {
    /// Source the document belongs to
    pub source_name: &'a str,
    /// Raw document text
    pub content: &'a str,
    /// Processor compiled from the source's spec
    pub processor: &'a DocumentProcessor,
}

impl CleaningJob<'_> {
    /// Run the job
    pub fn run(&self) -> CleanedDocument {
        log::debug!("Cleaning document '{}'", self.source_name);
        self.processor.process_with_stats(self.content)
    }
}

/// Callback invoked with the source name after each document is cleaned
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Sync);

/// Trait for execution strategies
pub trait Executor: Send + Sync {
    /// Clean every job, returning results in job order
    fn execute(&self, jobs: &[CleaningJob<'_>], on_done: ProgressFn<'_>)
        -> Result<Vec<CleanedDocument>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Select an execution mode from the number of documents in a batch
pub fn auto_select(document_count: usize, threshold: usize) -> ExecutionMode {
    if document_count < 2 || document_count < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

/// Build the executor for a resolved mode
pub fn executor_for(mode: ExecutionMode, threads: Option<usize>) -> Box<dyn Executor> {
    match mode {
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => Box::new(ParallelExecutor::new(threads)),
        _ => {
            let _ = threads;
            Box::new(SequentialExecutor)
        }
    }
}
