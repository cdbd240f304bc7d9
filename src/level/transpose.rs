/*!
 * Conversion between the vertical-bar (column-major) encoding and
 * row-major text.
 *
 * In the vertical encoding each separator-delimited field is one column of
 * the level, stored bottom-to-top: the first character of a field is the
 * bottom tile, the last one the top tile.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{GridError, GridResult};

use super::extract::NEWLINE;

/// What to do with columns shorter than the first one
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RaggedColumnPolicy {
    /// Fill the missing top tiles with the fill character
    #[default]
    Pad,
    /// Skip the missing tiles, leaving upper rows shorter
    Omit,
}

/// Non-fatal findings reported alongside a processed level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridWarning {
    /// Some vertical columns were shorter than the deduced row count
    RaggedColumns {
        /// Row count taken from the first column
        expected_rows: usize,
        /// Indices of the columns that were too short
        short_columns: Vec<usize>,
        /// Policy applied to the missing tiles
        policy: RaggedColumnPolicy,
    },
}

impl std::fmt::Display for GridWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RaggedColumns { expected_rows, short_columns, policy } => write!(
                f,
                "{} column(s) shorter than {} rows ({:?}), policy {:?}",
                short_columns.len(),
                expected_rows,
                short_columns,
                policy
            ),
        }
    }
}

/// Row-major text rebuilt from a vertical encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transposition {
    /// Rows joined with a newline
    pub text: String,
    /// Ragged-column report, if any column was short
    pub warning: Option<GridWarning>,
}

/// Transposer between vertical-bar and row-major layouts
pub struct OrientationTransposer;

impl OrientationTransposer {
    /// Rebuild row-major text from a vertical encoding
    ///
    /// # Arguments
    /// * `text` - Vertical encoding, one column per field
    /// * `separator` - Field separator between columns
    /// * `fill` - Tile used for missing positions under `RaggedColumnPolicy::Pad`
    /// * `policy` - Handling of columns shorter than the first one
    ///
    /// # Returns
    /// * The rows joined with a newline, or `GridError::MalformedInput` when
    ///   the text is empty or its first column is empty
    pub fn from_vertical(
        text: &str,
        separator: char,
        fill: char,
        policy: RaggedColumnPolicy,
    ) -> GridResult<Transposition> {
        if text.is_empty() {
            return Err(GridError::MalformedInput(
                "vertical level text is empty".to_string(),
            ));
        }

        let columns: Vec<Vec<char>> = text
            .split(separator)
            .map(|column| column.chars().collect())
            .collect();

        // The first column defines the level height
        let rows = match columns.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(GridError::MalformedInput(
                    "first vertical column is empty".to_string(),
                ));
            }
        };

        let short_columns: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, column)| column.len() < rows)
            .map(|(index, _)| index)
            .collect();

        let warning = if short_columns.is_empty() {
            None
        } else {
            let warning = GridWarning::RaggedColumns {
                expected_rows: rows,
                short_columns,
                policy,
            };
            warn!("Ragged vertical level: {}", warning);
            Some(warning)
        };

        let reconstructed: Vec<String> = (0..rows)
            .map(|row| {
                let index = rows - 1 - row;
                columns
                    .iter()
                    .filter_map(|column| match column.get(index) {
                        Some(&tile) => Some(tile),
                        None => match policy {
                            RaggedColumnPolicy::Pad => Some(fill),
                            RaggedColumnPolicy::Omit => None,
                        },
                    })
                    .collect()
            })
            .collect();

        Ok(Transposition {
            text: reconstructed.join(NEWLINE.to_string().as_str()),
            warning,
        })
    }

    /// Encode row-major rows into the vertical-bar layout
    ///
    /// Column `j` of the output lists the tiles of column `j` from the bottom
    /// row up. Rows too short for a column contribute nothing to it.
    pub fn to_vertical<S: AsRef<str>>(rows: &[S], separator: char) -> String {
        let grid: Vec<Vec<char>> = rows.iter().map(|row| row.as_ref().chars().collect()).collect();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);

        let columns: Vec<String> = (0..width)
            .map(|col| grid.iter().rev().filter_map(|row| row.get(col)).collect())
            .collect();

        columns.join(separator.to_string().as_str())
    }
}
