/*!
 * Level pipeline composing extraction, transposition and shape
 * normalization.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::GridResult;

use super::dialect::ModelDialect;
use super::extract::{NEWLINE, TranscriptExtractor, detect_separator};
use super::shape::{FillSpec, ShapeNormalizer, ShapeSpec};
use super::transpose::{GridWarning, OrientationTransposer, RaggedColumnPolicy};

/// Layout of the level text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Row-major, rows separated by the separator
    #[default]
    Horizontal,
    /// Column-major, columns stored bottom-to-top
    Vertical,
}

/// Options controlling how extracted text becomes a canonical grid
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Orientation of the extracted text
    #[serde(default)]
    pub orientation: Orientation,

    /// Default separator, overridden by auto-detection
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Padding characters
    #[serde(flatten)]
    pub fill: FillSpec,

    /// Explicit target shape; basic normalization (fill only) when absent
    #[serde(default)]
    pub shape: Option<ShapeSpec>,

    /// Handling of short vertical columns
    #[serde(default)]
    pub ragged_columns: RaggedColumnPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            separator: default_separator(),
            fill: FillSpec::default(),
            shape: None,
            ragged_columns: RaggedColumnPolicy::default(),
        }
    }
}

fn default_separator() -> char {
    NEWLINE
}

/// Canonical grid produced from one raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedLevel {
    /// Rows joined by `separator`
    pub grid: String,
    /// Effective separator between rows
    pub separator: char,
    /// Number of rows
    pub rows: usize,
    /// Width of the widest row
    pub columns: usize,
    /// Non-fatal findings
    pub warnings: Vec<GridWarning>,
}

impl ProcessedLevel {
    fn new(grid: String, separator: char, warnings: Vec<GridWarning>) -> Self {
        let rows = grid.split(separator).count();
        let columns = grid
            .split(separator)
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        Self { grid, separator, rows, columns, warnings }
    }

    /// Grid rows in top-to-bottom order
    pub fn row_strings(&self) -> Vec<&str> {
        self.grid.split(self.separator).collect()
    }

    /// Rows concatenated without separators, as consumed by metric scoring
    pub fn flattened(&self) -> String {
        self.row_strings().concat()
    }

    /// Whether every row has the same length
    pub fn is_rectangular(&self) -> bool {
        self.row_strings()
            .iter()
            .all(|row| row.chars().count() == self.columns)
    }
}

/// Stateless pipeline turning raw model output into a canonical grid
#[derive(Debug, Clone, Default)]
pub struct LevelPipeline {
    /// Dialect used for extraction; raw text is used as is when absent
    pub dialect: Option<ModelDialect>,
    /// Layout options
    pub layout: LayoutOptions,
}

impl LevelPipeline {
    /// Create a pipeline
    pub fn new(dialect: Option<ModelDialect>, layout: LayoutOptions) -> Self {
        Self { dialect, layout }
    }

    /// Run extraction, optional transposition and normalization on `raw`
    pub fn process(&self, raw: &str) -> GridResult<ProcessedLevel> {
        if let Some(shape) = &self.layout.shape {
            shape.validate()?;
        }

        let extracted = match self.dialect {
            Some(dialect) => TranscriptExtractor::extract(raw, dialect),
            // Level files usually end with a line terminator
            None => raw.trim_end_matches(['\r', '\n']).to_string(),
        };

        let mut separator = detect_separator(&extracted, self.layout.separator);
        let mut warnings = Vec::new();

        let text = match self.layout.orientation {
            Orientation::Horizontal => extracted,
            Orientation::Vertical => {
                let transposed = OrientationTransposer::from_vertical(
                    &extracted,
                    separator,
                    self.layout.fill.fill_char,
                    self.layout.ragged_columns,
                )?;
                warnings.extend(transposed.warning);
                // Transposed rows are newline-joined
                separator = NEWLINE;
                transposed.text
            }
        };

        let fill = &self.layout.fill;
        let grid = match &self.layout.shape {
            Some(shape) => ShapeNormalizer::enforce(&text, separator, fill, shape)?,
            None => ShapeNormalizer::normalize_rows(&text, separator, fill.fill_char)?,
        };

        let level = ProcessedLevel::new(grid, separator, warnings);
        debug!("Canonical grid {}x{}", level.rows, level.columns);
        Ok(level)
    }

    /// Process independent inputs, keeping one result per input
    ///
    /// A failing input never stops the remaining ones.
    pub fn process_many<S: AsRef<str>>(&self, inputs: &[S]) -> Vec<GridResult<ProcessedLevel>> {
        inputs.iter().map(|raw| self.process(raw.as_ref())).collect()
    }
}
