//! Clean command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{DocumentOutput, JsonFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use chaptrim_engine::{
    BatchReport, CleaningPipeline, CleaningSpec, ConfigStore, EngineConfig, FsConfigStore,
    FsDocumentStore, SequenceDocumentStore, StaticConfigStore,
};
use clap::Args;
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for the clean command
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Cleaning specification applied to every input
    #[arg(short, long, value_name = "FILE", conflicts_with = "config_dir")]
    pub config: Option<PathBuf>,

    /// Directory of per-source specifications (DIR/<name>/meta.json)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Write cleaned documents to DIR/<name>.txt (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Force parallel processing even for small batches
    #[arg(short, long)]
    pub parallel: bool,

    /// Number of worker threads (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// CLI settings file
    #[arg(long, value_name = "FILE", env = "CHAPTRIM_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Cleaned text, or a per-document summary with --output-dir
    Text,
    /// JSON report with statistics for every document
    Json,
}

impl OutputFormat {
    /// Every format, in display order
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Text, OutputFormat::Json];

    /// Parse a format name as written in the settings file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "Cleaned text, or a per-document summary with --output-dir",
            OutputFormat::Json => "JSON report with statistics for every document",
        }
    }
}

impl CleanArgs {
    /// Execute the clean command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::info!("Starting document cleaning");
        log::debug!("Arguments: {:?}", self);

        let settings = CliConfig::load(self.settings.as_deref())?;
        let format = self.output_format(&settings)?;
        let engine_config = self.engine_config(&settings);
        let configs = self.config_store()?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} input file(s)", files.len());

        let mut formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Json => Box::new(JsonFormatter::new(
                io::stdout(),
                settings.output.pretty_json,
            )),
            OutputFormat::Text if self.quiet && self.output_dir.is_some() => {
                Box::new(TextFormatter::new(io::sink()))
            }
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
        };

        match &self.output_dir {
            Some(dir) => self.clean_to_directory(files, dir, configs, engine_config, formatter.as_mut()),
            None => Self::clean_to_stdout(&files, configs, engine_config, formatter.as_mut()),
        }
    }

    /// Clean into memory and print every cleaned document in input order
    ///
    /// Inputs sharing a file stem are all printed.
    fn clean_to_stdout(
        files: &[PathBuf],
        configs: Box<dyn ConfigStore>,
        engine_config: EngineConfig,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<()> {
        let documents = files
            .iter()
            .map(|path| FileReader::read_document(path))
            .collect::<Result<Vec<_>>>()?;

        let pipeline = CleaningPipeline::new(SequenceDocumentStore::new(documents), configs)
            .with_config(engine_config);
        let report = pipeline.run().context("Failed to clean documents")?;

        // The pipeline stores one text per report entry, in the same order
        let texts = pipeline.documents().processed_documents()?;
        for (document, (_, text)) in report.documents.iter().zip(&texts) {
            formatter.format_document(&DocumentOutput {
                source_name: &document.source_name,
                text: Some(text),
                stats: &document.stats,
            })?;
        }
        formatter.finish(&report.skipped)
    }

    /// Clean into `dir`, reporting progress per document
    fn clean_to_directory(
        &self,
        files: Vec<PathBuf>,
        dir: &Path,
        configs: Box<dyn ConfigStore>,
        engine_config: EngineConfig,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<()> {
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(files.len() as u64);

        let pipeline = CleaningPipeline::new(FsDocumentStore::from_files(files, dir), configs)
            .with_config(engine_config);
        let report = pipeline
            .run_with_progress(&|source_name| progress.document_completed(source_name))
            .context("Failed to clean documents")?;
        progress.finish();

        Self::write_summary(&report, formatter)?;
        log::info!("Cleaned documents written to {}", dir.display());
        Ok(())
    }

    fn write_summary(report: &BatchReport, formatter: &mut dyn OutputFormatter) -> Result<()> {
        for document in &report.documents {
            formatter.format_document(&DocumentOutput {
                source_name: &document.source_name,
                text: None,
                stats: &document.stats,
            })?;
        }
        formatter.finish(&report.skipped)
    }

    /// Flag, then settings file, then text
    fn output_format(&self, settings: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_name(&settings.output.default_format).ok_or_else(|| {
            CliError::SettingsError(format!(
                "unknown output format '{}'",
                settings.output.default_format
            ))
            .into()
        })
    }

    fn engine_config(&self, settings: &CliConfig) -> EngineConfig {
        let config = if self.parallel {
            EngineConfig::parallel()
        } else {
            EngineConfig::default()
        };
        config
            .with_threads(self.threads.or_else(|| settings.threads()))
            .with_parallel_threshold(settings.performance.parallel_threshold)
    }

    fn config_store(&self) -> Result<Box<dyn ConfigStore>> {
        match (&self.config, &self.config_dir) {
            (Some(path), _) => {
                let spec = CleaningSpec::from_file(path).with_context(|| {
                    format!("Failed to load cleaning config: {}", path.display())
                })?;
                log::debug!("Using {} for every input", path.display());
                Ok(Box::new(StaticConfigStore::new(spec)))
            }
            (None, Some(dir)) => {
                log::debug!("Using per-source configs under {}", dir.display());
                Ok(Box::new(FsConfigStore::new(dir.clone())))
            }
            (None, None) => Err(CliError::ConfigError(
                "either --config or --config-dir is required".to_string(),
            )
            .into()),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: &str) -> CleanArgs {
        CleanArgs {
            input: vec![input.to_string()],
            config: None,
            config_dir: None,
            output_dir: None,
            format: None,
            parallel: false,
            threads: None,
            settings: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_output_format_precedence() {
        let mut settings = CliConfig::default();
        settings.output.default_format = "JSON".to_string();

        let mut clean = args("*.txt");
        assert_eq!(clean.output_format(&settings).unwrap(), OutputFormat::Json);

        clean.format = Some(OutputFormat::Text);
        assert_eq!(clean.output_format(&settings).unwrap(), OutputFormat::Text);

        clean.format = None;
        settings.output.default_format = "markdown".to_string();
        assert!(clean.output_format(&settings).is_err());
    }

    #[test]
    fn test_engine_config_from_flags_and_settings() {
        let mut settings = CliConfig::default();
        settings.performance.worker_threads = 2;
        settings.performance.parallel_threshold = 10;

        let mut clean = args("*.txt");
        let config = clean.engine_config(&settings);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.parallel_threshold, 10);
        assert_eq!(config.execution_mode, chaptrim_engine::ExecutionMode::Adaptive);

        clean.parallel = true;
        clean.threads = Some(6);
        let config = clean.engine_config(&settings);
        assert_eq!(config.threads, Some(6));
        assert_eq!(config.execution_mode, chaptrim_engine::ExecutionMode::Parallel);
    }

    #[test]
    fn test_config_source_is_required() {
        let err = args("*.txt").config_store().err().unwrap();
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn test_clean_to_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("book.txt");
        let spec = dir.path().join("meta.json");
        fs::write(&input, "Обложка\nГлава 1\nТекст.\nЛитература").unwrap();
        fs::write(
            &spec,
            r#"{"remove_patterns": {"before_first_chapter": "^Глава 1", "after_last_chapter": "^Литература"}}"#,
        )
        .unwrap();

        let mut clean = args(input.to_str().unwrap());
        clean.config = Some(spec);
        clean.output_dir = Some(dir.path().join("out"));
        clean.execute().unwrap();

        let cleaned = fs::read_to_string(dir.path().join("out/book.txt")).unwrap();
        assert_eq!(cleaned, "Глава 1\nТекст.");
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_name(format.name()), Some(format));
            assert!(!format.description().is_empty());
        }
    }
}
