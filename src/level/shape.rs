/*!
 * Shape normalization of level grids.
 *
 * Two entry points share one convergent trim/pad core:
 * - basic mode (`ShapeNormalizer::normalize`) only makes the grid
 *   rectangular;
 * - extended mode (`ShapeNormalizer::enforce`) honours explicit row and
 *   column counts before falling back to the convergent pass.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};

use super::extract::NEWLINE;

/// Padding characters
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FillSpec {
    /// Empty-space tile used for padding
    #[serde(default = "default_fill_char")]
    pub fill_char: char,

    /// Solid floor tile used to pad the last row, if set
    #[serde(default)]
    pub ground_char: Option<char>,
}

impl Default for FillSpec {
    fn default() -> Self {
        Self {
            fill_char: default_fill_char(),
            ground_char: None,
        }
    }
}

impl FillSpec {
    /// Fill spec without a ground tile
    pub fn new(fill_char: char) -> Self {
        Self { fill_char, ground_char: None }
    }

    /// Set the ground tile
    pub fn with_ground(mut self, ground_char: char) -> Self {
        self.ground_char = Some(ground_char);
        self
    }
}

pub(crate) fn default_fill_char() -> char {
    '-'
}

/// Which target dimensions are enforced
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeEnforcement {
    #[default]
    None,
    Rows,
    Columns,
    Both,
}

/// Target grid shape
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeSpec {
    /// Target number of rows
    #[serde(default)]
    pub row_count: Option<usize>,

    /// Target number of columns
    #[serde(default)]
    pub col_count: Option<usize>,

    /// Dimensions to enforce
    #[serde(default)]
    pub enforcement: ShapeEnforcement,

    /// Run the convergent trim/pad pass even when rows are enforced
    #[serde(default)]
    pub legacy_column_fallback: bool,
}

impl ShapeSpec {
    /// Shape enforcing both dimensions
    pub fn exact(row_count: usize, col_count: usize) -> Self {
        Self {
            row_count: Some(row_count),
            col_count: Some(col_count),
            enforcement: ShapeEnforcement::Both,
            legacy_column_fallback: false,
        }
    }

    // @returns: Whether the row count is enforced
    pub fn enforces_rows(&self) -> bool {
        matches!(self.enforcement, ShapeEnforcement::Rows | ShapeEnforcement::Both)
    }

    // @returns: Whether the column count is enforced
    pub fn enforces_columns(&self) -> bool {
        matches!(self.enforcement, ShapeEnforcement::Columns | ShapeEnforcement::Both)
    }

    /// Check that every enforced dimension is supplied and usable
    pub fn validate(&self) -> GridResult<()> {
        if self.enforces_rows() && self.row_count.is_none() {
            return Err(GridError::Configuration(format!(
                "enforcement '{:?}' requires a row count",
                self.enforcement
            )));
        }
        if self.enforces_columns() && self.col_count.is_none() {
            return Err(GridError::Configuration(format!(
                "enforcement '{:?}' requires a column count",
                self.enforcement
            )));
        }
        if self.row_count == Some(0) {
            return Err(GridError::Configuration(
                "row count must be at least 1".to_string(),
            ));
        }
        if self.col_count == Some(0) {
            return Err(GridError::Configuration(
                "column count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Normalizer producing rectangular grids
pub struct ShapeNormalizer;

impl ShapeNormalizer {
    /// Basic mode: make newline-separated `text` rectangular
    pub fn normalize(text: &str, fill_char: char) -> GridResult<String> {
        Self::normalize_rows(text, NEWLINE, fill_char)
    }

    /// Basic mode on rows joined by `separator`
    ///
    /// Every row pads with `fill_char`; the ground tile is never used here.
    pub fn normalize_rows(text: &str, separator: char, fill_char: char) -> GridResult<String> {
        let rows = split_rows(text, separator);
        let rows = Self::converge_rows(rows, fill_char, None)?;
        Ok(join_rows(&rows, separator))
    }

    /// Extended mode: enforce `shape` on the rows of `text`
    ///
    /// # Arguments
    /// * `text` - Rows joined by `separator`
    /// * `separator` - Row separator, also used to rejoin the output
    /// * `fill` - Padding characters
    /// * `shape` - Target shape and enforcement mode
    pub fn enforce(
        text: &str,
        separator: char,
        fill: &FillSpec,
        shape: &ShapeSpec,
    ) -> GridResult<String> {
        shape.validate()?;

        let mut rows = split_rows(text, separator);

        if shape.enforces_rows() {
            if let Some(row_count) = shape.row_count {
                rows = Self::enforce_row_count(rows, row_count, shape.col_count, fill.fill_char);
            }
        }

        let mut columns_enforced = false;
        if shape.enforces_columns() {
            if let Some(col_count) = shape.col_count {
                rows = Self::enforce_column_count(rows, col_count, fill);
                columns_enforced = true;
            }
        }

        let fallback = shape.enforcement == ShapeEnforcement::None || shape.legacy_column_fallback;
        if fallback && !columns_enforced {
            rows = Self::converge_rows(rows, fill.fill_char, fill.ground_char)?;
        }

        Ok(join_rows(&rows, separator))
    }

    /// Keep the last `row_count` rows, or prepend filler rows at the top
    ///
    /// Filler rows are as wide as the longest existing row, or `col_count`
    /// when there is no row at all.
    pub fn enforce_row_count(
        mut rows: Vec<String>,
        row_count: usize,
        col_count: Option<usize>,
        fill_char: char,
    ) -> Vec<String> {
        if rows.len() > row_count {
            debug!("Dropping {} top row(s)", rows.len() - row_count);
            rows.drain(..rows.len() - row_count);
        } else if rows.len() < row_count {
            let width = rows
                .iter()
                .map(|row| row.chars().count())
                .max()
                .or(col_count)
                .unwrap_or(0);
            let filler: String = std::iter::repeat_n(fill_char, width).collect();

            let missing = row_count - rows.len();
            debug!("Prepending {} filler row(s) of width {}", missing, width);

            let mut enforced = vec![filler; missing];
            enforced.append(&mut rows);
            rows = enforced;
        }
        rows
    }

    /// Truncate or pad every row to exactly `col_count` characters
    ///
    /// The last row pads with the ground tile when one is configured.
    pub fn enforce_column_count(rows: Vec<String>, col_count: usize, fill: &FillSpec) -> Vec<String> {
        let last = rows.len().saturating_sub(1);

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                let len = row.chars().count();
                if len > col_count {
                    row.chars().take(col_count).collect()
                } else {
                    let pad = if index == last {
                        fill.ground_char.unwrap_or(fill.fill_char)
                    } else {
                        fill.fill_char
                    };
                    pad_row(row, col_count - len, pad)
                }
            })
            .collect()
    }

    /// Convergent trim/pad shared by both modes
    ///
    /// Each round strips one trailing `fill_char` from every row at the
    /// current maximum length; rounds repeat until one trims nothing. Rows
    /// are then right-padded to the final maximum, the last row with
    /// `last_row_fill` when given.
    pub fn converge_rows(
        rows: Vec<String>,
        fill_char: char,
        last_row_fill: Option<char>,
    ) -> GridResult<Vec<String>> {
        if rows.is_empty() {
            return Err(GridError::EmptyGrid);
        }

        let mut grid: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();

        let mut rounds = 0usize;
        loop {
            let max_len = grid.iter().map(Vec::len).max().unwrap_or(0);
            let mut trimmed = false;

            for row in grid.iter_mut().filter(|row| row.len() == max_len) {
                if row.last() == Some(&fill_char) {
                    row.pop();
                    trimmed = true;
                }
            }

            if !trimmed {
                break;
            }
            rounds += 1;
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let last = grid.len() - 1;
        debug!("Converged to width {} after {} trim round(s)", width, rounds);

        Ok(grid
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                let pad = match last_row_fill {
                    Some(ground) if index == last => ground,
                    _ => fill_char,
                };
                row.resize(width, pad);
                row.into_iter().collect()
            })
            .collect())
    }
}

fn split_rows(text: &str, separator: char) -> Vec<String> {
    text.split(separator).map(str::to_string).collect()
}

fn join_rows(rows: &[String], separator: char) -> String {
    rows.join(separator.to_string().as_str())
}

fn pad_row(mut row: String, count: usize, pad: char) -> String {
    row.extend(std::iter::repeat_n(pad, count));
    row
}
