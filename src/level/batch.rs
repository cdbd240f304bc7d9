/*!
 * Batch processing of level sample files.
 *
 * Files are converted concurrently with a bounded fan-out. Every file is
 * independent: a failure is recorded in the report and the remaining files
 * keep going.
 */

use futures::stream::{self, StreamExt};
use log::{debug, error, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::AppError;
use crate::file_utils::FileManager;

use super::core::{LevelPipeline, ProcessedLevel};

/// Extension of written canonical grids
pub const OUTPUT_EXTENSION: &str = "txt";

/// Outcome of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Canonical grid written to `output`
    Written {
        output: PathBuf,
        rows: usize,
        columns: usize,
        warnings: usize,
    },
    /// Output already present and overwrite not forced
    Skipped { output: PathBuf },
    /// Reading, parsing, processing or writing failed
    Failed { error: String },
}

/// Report entry for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: FileOutcome,
}

/// Result of a batch run, sorted by input path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    // @returns: Number of written grids
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Written { .. }))
    }

    // @returns: Number of skipped files
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped { .. }))
    }

    // @returns: Number of failed files
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Failed { .. }))
    }

    /// Failed inputs with their error messages
    pub fn failures(&self) -> Vec<(&Path, &str)> {
        self.files
            .iter()
            .filter_map(|report| match &report.outcome {
                FileOutcome::Failed { error } => Some((report.input.as_path(), error.as_str())),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|report| predicate(&report.outcome)).count()
    }
}

/// Batch processor converting sample files into canonical grid files
pub struct BatchProcessor {
    /// The pipeline applied to every sample
    pipeline: LevelPipeline,

    /// Maximum number of files in flight
    max_concurrent_files: usize,

    /// Suffix inserted before the output extension
    output_suffix: String,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(pipeline: LevelPipeline, max_concurrent_files: usize, output_suffix: &str) -> Self {
        Self {
            pipeline,
            max_concurrent_files: max_concurrent_files.max(1),
            output_suffix: output_suffix.to_string(),
        }
    }

    /// Output path for `input`, inside `output_dir` or next to the input
    pub fn output_path_for(&self, input: &Path, output_dir: Option<&Path>) -> PathBuf {
        let dir = output_dir
            .map(Path::to_path_buf)
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        FileManager::generate_output_path(input, dir, &self.output_suffix, OUTPUT_EXTENSION)
    }

    /// Whether `path` looks like a grid written by this processor
    pub fn is_output_file(&self, path: &Path) -> bool {
        let suffix = format!(".{}.{}", self.output_suffix, OUTPUT_EXTENSION);
        path.file_name()
            .map(|name| name.to_string_lossy().ends_with(&suffix))
            .unwrap_or(false)
    }

    /// Convert `files`, writing one canonical grid per input
    ///
    /// # Arguments
    /// * `files` - Sample files (`.txt` raw text or `.json` string/array)
    /// * `output_dir` - Destination directory, the input's directory when `None`
    /// * `force_overwrite` - Replace existing outputs instead of skipping
    /// * `progress_callback` - Called with (completed, total) after each file
    pub async fn process_files(
        &self,
        files: &[PathBuf],
        output_dir: Option<&Path>,
        force_overwrite: bool,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> BatchReport {
        let total_files = files.len();
        let completed = Arc::new(AtomicUsize::new(0));

        let mut reports: Vec<FileReport> = stream::iter(files.iter().cloned())
            .map(|input| {
                let output = self.output_path_for(&input, output_dir);
                let completed = completed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    let outcome = self.process_file(&input, output, force_overwrite).await;

                    let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total_files);

                    FileReport { input, outcome }
                }
            })
            .buffer_unordered(self.max_concurrent_files)
            .collect()
            .await;

        reports.sort_by(|a, b| a.input.cmp(&b.input));
        BatchReport { files: reports }
    }

    async fn process_file(&self, input: &Path, output: PathBuf, force_overwrite: bool) -> FileOutcome {
        if !force_overwrite && tokio::fs::try_exists(&output).await.unwrap_or(false) {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input);
            return FileOutcome::Skipped { output };
        }

        match self.convert_file(input, &output).await {
            Ok(level) => {
                debug!("Wrote {}x{} grid to {:?}", level.rows, level.columns, output);
                FileOutcome::Written {
                    output,
                    rows: level.rows,
                    columns: level.columns,
                    warnings: level.warnings.len(),
                }
            }
            Err(e) => {
                error!("Error processing file {:?}: {}", input, e);
                FileOutcome::Failed { error: e.to_string() }
            }
        }
    }

    async fn convert_file(&self, input: &Path, output: &Path) -> Result<ProcessedLevel, AppError> {
        let content = tokio::fs::read_to_string(input).await?;
        let raw = FileManager::parse_sample(input, &content)?;
        let level = self.pipeline.process(&raw)?;

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, &level.grid).await?;

        Ok(level)
    }
}
