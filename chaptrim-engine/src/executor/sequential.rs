//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{CleaningJob, ExecutionMode, Executor, ProgressFn},
};
use chaptrim_core::CleanedDocument;

/// Sequential single-threaded executor
#[derive(Debug, Clone)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        jobs: &[CleaningJob<'_>],
        on_done: ProgressFn<'_>,
    ) -> Result<Vec<CleanedDocument>> {
        Ok(jobs
            .iter()
            .map(|job| {
                let cleaned = job.run();
                on_done(job.source_name);
                cleaned
            })
            .collect())
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaptrim_core::{CleaningSpec, DocumentProcessor};
    use std::sync::Mutex;

    #[test]
    fn test_results_follow_job_order() {
        let processor =
            DocumentProcessor::from_spec(&CleaningSpec::builder().inline_pattern("^x").build());
        let jobs = [
            CleaningJob { source_name: "a", content: "x1\nA", processor: &processor },
            CleaningJob { source_name: "b", content: "B\n\nx2", processor: &processor },
        ];
        let seen = Mutex::new(Vec::new());

        let results = SequentialExecutor
            .execute(&jobs, &|name| seen.lock().unwrap().push(name.to_string()))
            .unwrap();

        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b"]);
    }
}
