//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{CleaningJob, ExecutionMode, Executor, ProgressFn},
};
use chaptrim_core::CleanedDocument;
use rayon::prelude::*;

/// Multi-threaded executor: one document per rayon task
#[derive(Debug, Clone)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Create a parallel executor (`None` = one thread per CPU)
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    /// Threads the pool will be built with
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Executor for ParallelExecutor {
    fn execute(
        &self,
        jobs: &[CleaningJob<'_>],
        on_done: ProgressFn<'_>,
    ) -> Result<Vec<CleanedDocument>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.thread_count())
            .build()
            .map_err(|e| EngineError::ParallelError(e.to_string()))?;

        log::debug!(
            "Cleaning {} documents on {} threads",
            jobs.len(),
            pool.current_num_threads()
        );

        // `collect` on an indexed parallel iterator keeps job order
        let results: Vec<CleanedDocument> = pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    let cleaned = job.run();
                    on_done(job.source_name);
                    cleaned
                })
                .collect()
        });

        Ok(results)
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
