use anyhow::{Result, Context, anyhow};
use log::{warn, info};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::level::{BatchProcessor, BatchReport, FileOutcome, LevelPipeline, ProcessedLevel};

// @module: Application controller for level normalization

/// Name of the issue log written in folder mode
pub const ISSUES_LOG_FILE: &str = "levelgrid.issues.log";

/// Main application controller for level normalization
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pipeline built from the configuration
    pub fn pipeline(&self) -> LevelPipeline {
        self.config.pipeline()
    }

    /// Normalize one raw sample in memory
    pub fn normalize_text(&self, raw: &str) -> Result<ProcessedLevel> {
        self.pipeline()
            .process(raw)
            .context("Failed to build canonical grid")
    }

    /// Normalize a single sample file without writing anything
    pub fn normalize_file(&self, input_file: &Path) -> Result<ProcessedLevel> {
        let raw = FileManager::load_sample(input_file)?;
        self.normalize_text(&raw)
            .with_context(|| format!("Failed to normalize {:?}", input_file))
    }

    fn batch_processor(&self) -> BatchProcessor {
        BatchProcessor::new(
            self.pipeline(),
            self.config.processing.concurrent_files,
            &self.config.processing.output_suffix,
        )
    }

    /// Normalize one sample file and write its canonical grid
    pub async fn run(&self, input_file: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<BatchReport> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let report = self.batch_processor()
            .process_files(std::slice::from_ref(&input_file), output_dir.as_deref(), force_overwrite, |_, _| {})
            .await;

        if let Some((_, error)) = report.failures().first() {
            return Err(anyhow!("Failed to normalize {:?}: {}", input_file, error));
        }

        for file in &report.files {
            if let FileOutcome::Written { output, rows, columns, .. } = &file.outcome {
                info!("Success: {} ({}x{})", output.display(), rows, columns);
            }
        }

        Ok(report)
    }

    /// Normalize every sample file under `input_dir`
    ///
    /// Files that fail are reported and logged; they never stop the run.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<BatchReport> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let processor = self.batch_processor();
        let sample_files = self.find_sample_files(&input_dir, &processor)?;

        if sample_files.is_empty() {
            return Err(anyhow!("No sample files found in directory: {:?}", input_dir));
        }

        info!("Normalizing {} sample file(s) in {:?}", sample_files.len(), input_dir);

        let progress_bar = ProgressBar::new(sample_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Normalizing levels");

        let pb = progress_bar.clone();
        let report = processor
            .process_files(&sample_files, output_dir.as_deref(), force_overwrite, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} written, {} skipped, {} errors",
            report.written(),
            report.skipped(),
            report.failed()
        );
        info!("{} in {}", summary_message, Self::format_duration(start_time.elapsed()));

        if report.failed() > 0 {
            let log_dir = output_dir.unwrap_or_else(|| input_dir.clone());
            if let Err(e) = self.write_issue_log(&report, &log_dir.join(ISSUES_LOG_FILE), &summary_message) {
                warn!("Failed to write issue log: {}", e);
            }
        }

        Ok(report)
    }

    /// Sample files under `input_dir`, excluding previously written grids
    fn find_sample_files(&self, input_dir: &Path, processor: &BatchProcessor) -> Result<Vec<PathBuf>> {
        let mut sample_files = Vec::new();
        for ext in &self.config.processing.input_extensions {
            let mut files = FileManager::find_files(input_dir, ext)?;
            sample_files.append(&mut files);
        }

        sample_files.retain(|path| !processor.is_output_file(path));
        sample_files.sort();
        sample_files.dedup();
        Ok(sample_files)
    }

    fn write_issue_log(&self, report: &BatchReport, log_path: &Path, summary: &str) -> Result<()> {
        FileManager::append_to_log_file(log_path, summary)?;
        for (input, message) in report.failures() {
            FileManager::append_to_log_file(log_path, &format!("ERROR {}: {}", input.display(), message))?;
        }
        info!("Issues written to {}", log_path.display());
        Ok(())
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
