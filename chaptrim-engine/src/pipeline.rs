//! Fetch, clean and persist a batch of documents

use crate::{
    config::EngineConfig,
    error::{EngineError, Result},
    executor::{auto_select, executor_for, CleaningJob, ExecutionMode, ProgressFn},
    store::{ConfigStore, DocumentStore, RawDocument},
};
use chaptrim_core::{CleaningStats, DocumentProcessor};
use serde::Serialize;
use std::collections::HashMap;

/// Result of cleaning one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    /// Source the document belongs to
    pub source_name: String,
    /// Cleaning statistics
    pub stats: CleaningStats,
}

/// Result of a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Cleaned documents, in store order
    pub documents: Vec<DocumentReport>,
    /// Sources skipped because they have no cleaning config
    pub skipped: Vec<String>,
}

impl BatchReport {
    /// Characters read across all cleaned documents
    pub fn total_input_chars(&self) -> usize {
        self.documents.iter().map(|d| d.stats.input_chars).sum()
    }

    /// Characters written across all cleaned documents
    pub fn total_output_chars(&self) -> usize {
        self.documents.iter().map(|d| d.stats.output_chars).sum()
    }
}

/// Cleans every raw document of a [`DocumentStore`] with the specs of a
/// [`ConfigStore`]
///
/// Store I/O happens on the calling thread, before and after cleaning; only
/// the cleaning itself runs on the executor.
pub struct CleaningPipeline<D, C> {
    documents: D,
    configs: C,
    config: EngineConfig,
}

impl<D: DocumentStore, C: ConfigStore> CleaningPipeline<D, C> {
    /// Create a pipeline with the default engine configuration
    pub fn new(documents: D, configs: C) -> Self {
        Self {
            documents,
            configs,
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The document store
    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// The configuration store
    pub fn configs(&self) -> &C {
        &self.configs
    }

    /// Run the pipeline
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with_progress(&|_| {})
    }

    /// Run the pipeline, calling `on_done` after each cleaned document
    ///
    /// `on_done` may be called from worker threads.
    pub fn run_with_progress(&self, on_done: ProgressFn<'_>) -> Result<BatchReport> {
        self.config.validate()?;

        let raw = self.documents.raw_documents()?;
        log::info!("Fetched {} raw documents", raw.len());

        let (pending, processors, skipped) = self.resolve_processors(&raw)?;

        let jobs: Vec<CleaningJob<'_>> = pending
            .iter()
            .map(|doc| CleaningJob {
                source_name: &doc.source_name,
                content: &doc.content,
                processor: &processors[doc.source_name.as_str()],
            })
            .collect();

        let mode = match self.config.execution_mode {
            ExecutionMode::Adaptive => auto_select(jobs.len(), self.config.parallel_threshold),
            mode => mode,
        };
        let executor = executor_for(mode, self.config.threads);
        log::debug!("Executing {} jobs in {:?} mode", jobs.len(), executor.mode());

        let results = executor.execute(&jobs, on_done)?;

        let mut report = BatchReport {
            documents: Vec::with_capacity(results.len()),
            skipped,
        };
        for (job, cleaned) in jobs.iter().zip(results) {
            self.documents
                .set_processed_document(job.source_name, &cleaned.text)?;
            report.documents.push(DocumentReport {
                source_name: job.source_name.to_string(),
                stats: cleaned.stats,
            });
        }

        log::info!(
            "Cleaned {} documents ({} skipped): {} -> {} characters",
            report.documents.len(),
            report.skipped.len(),
            report.total_input_chars(),
            report.total_output_chars()
        );
        Ok(report)
    }

    /// Compile one processor per source, dropping sources without a config
    /// when the engine is configured to skip them
    #[allow(clippy::type_complexity)]
    fn resolve_processors<'r>(
        &self,
        raw: &'r [RawDocument],
    ) -> Result<(Vec<&'r RawDocument>, HashMap<&'r str, DocumentProcessor>, Vec<String>)> {
        let mut pending = Vec::with_capacity(raw.len());
        let mut processors: HashMap<&str, DocumentProcessor> = HashMap::new();
        let mut skipped = Vec::new();

        for doc in raw {
            let name = doc.source_name.as_str();
            if processors.contains_key(name) {
                log::warn!("Source '{name}' appears more than once");
                pending.push(doc);
                continue;
            }
            match self.configs.config(name) {
                Ok(spec) => {
                    processors.insert(name, DocumentProcessor::from_spec(&spec));
                    pending.push(doc);
                }
                Err(EngineError::MissingConfig { .. }) if self.config.skip_missing_config => {
                    log::warn!("No cleaning config for '{name}', skipping");
                    skipped.push(name.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        Ok((pending, processors, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        InMemoryConfigStore, InMemoryDocumentStore, SequenceDocumentStore, StaticConfigStore,
    };
    use chaptrim_core::CleaningSpec;

    #[test]
    fn test_report_totals() {
        let report = BatchReport {
            documents: vec![
                DocumentReport {
                    source_name: "a".into(),
                    stats: CleaningStats {
                        input_chars: 10,
                        output_chars: 4,
                        ..CleaningStats::default()
                    },
                },
                DocumentReport {
                    source_name: "b".into(),
                    stats: CleaningStats {
                        input_chars: 5,
                        output_chars: 5,
                        ..CleaningStats::default()
                    },
                },
            ],
            skipped: Vec::new(),
        };
        assert_eq!(report.total_input_chars(), 15);
        assert_eq!(report.total_output_chars(), 9);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["documents"][1]["source_name"], "b");
        assert_eq!(json["documents"][0]["stats"]["output_chars"], 4);
        assert_eq!(json["skipped"], serde_json::json!([]));
    }

    #[test]
    fn test_missing_config_can_fail_the_batch() {
        let documents =
            InMemoryDocumentStore::with_documents([RawDocument::new("book", "text")]);
        let pipeline = CleaningPipeline::new(documents, InMemoryConfigStore::new())
            .with_config(EngineConfig::sequential().with_skip_missing_config(false));

        assert!(matches!(
            pipeline.run(),
            Err(EngineError::MissingConfig { .. })
        ));
        assert!(pipeline.documents().processed_documents().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_sources_keep_input_order() {
        let documents = SequenceDocumentStore::new(vec![
            RawDocument::new("book", "FIRST\n\n"),
            RawDocument::new("atlas", "map"),
            RawDocument::new("book", "SECOND"),
        ]);
        let pipeline = CleaningPipeline::new(documents, StaticConfigStore::new(CleaningSpec::default()))
            .with_config(EngineConfig::sequential());

        let report = pipeline.run().unwrap();
        let names: Vec<&str> = report.documents.iter().map(|d| d.source_name.as_str()).collect();
        assert_eq!(names, ["book", "atlas", "book"]);

        let texts: Vec<String> = pipeline
            .documents()
            .processed_documents()
            .unwrap()
            .into_iter()
            .map(|(_, text)| text)
            .collect();
        assert_eq!(texts, ["FIRST", "map", "SECOND"]);
    }

    #[test]
    fn test_invalid_engine_config_is_rejected() {
        let pipeline = CleaningPipeline::new(
            InMemoryDocumentStore::new(),
            StaticConfigStore::new(CleaningSpec::default()),
        )
        .with_config(EngineConfig::default().with_threads(Some(0)));
        assert!(matches!(pipeline.run(), Err(EngineError::ConfigError(_))));
    }
}
