//! Configuration types for the engine

use crate::executor::ExecutionMode;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Minimum number of documents for adaptive mode to go parallel
    pub parallel_threshold: usize,
    /// Skip sources without a cleaning config instead of failing the batch
    pub skip_missing_config: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Adaptive,
            threads: None,
            parallel_threshold: 4,
            skip_missing_config: true,
        }
    }
}

impl EngineConfig {
    /// Single-threaded configuration
    pub fn sequential() -> Self {
        Self {
            execution_mode: ExecutionMode::Sequential,
            threads: Some(1),
            ..Self::default()
        }
    }

    /// Always use the worker pool
    pub fn parallel() -> Self {
        Self {
            execution_mode: ExecutionMode::Parallel,
            ..Self::default()
        }
    }

    /// Set the execution mode
    pub fn with_execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.execution_mode = mode;
        self
    }

    /// Set the worker thread count
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Set the adaptive parallel threshold (in documents)
    pub fn with_parallel_threshold(mut self, documents: usize) -> Self {
        self.parallel_threshold = documents;
        self
    }

    /// Choose whether sources without a config are skipped or fail the batch
    pub fn with_skip_missing_config(mut self, skip: bool) -> Self {
        self.skip_missing_config = skip;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.threads == Some(0) {
            return Err(crate::EngineError::ConfigError(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = EngineConfig::default();
        assert_eq!(default.execution_mode, ExecutionMode::Adaptive);
        assert!(default.skip_missing_config);

        let sequential = EngineConfig::sequential();
        assert_eq!(sequential.execution_mode, ExecutionMode::Sequential);
        assert_eq!(sequential.threads, Some(1));

        assert_eq!(EngineConfig::parallel().execution_mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::default()
            .with_threads(Some(3))
            .with_parallel_threshold(10)
            .with_skip_missing_config(false)
            .with_execution_mode(ExecutionMode::Parallel);
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.parallel_threshold, 10);
        assert!(!config.skip_missing_config);
        assert_eq!(config.execution_mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_zero_threads_is_invalid() {
        assert!(EngineConfig::default().with_threads(Some(0)).validate().is_err());
        assert!(EngineConfig::default().validate().is_ok());
    }
}
