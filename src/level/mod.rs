/*!
 * Canonical level grids from raw model output.
 *
 * The pipeline runs three pure stages in order, each in its own submodule:
 *
 * - `extract`: isolates the generated turn of a chat transcript and picks
 *   the effective separator
 * - `transpose`: rebuilds row-major text from the vertical-bar encoding
 * - `shape`: makes the grid rectangular, optionally to an explicit shape
 *
 * `core` composes the stages, `batch` applies them to many files and
 * `dialect` holds the chat-template marker table.
 */

// Re-export main types for easier usage
pub use self::batch::{BatchProcessor, BatchReport, FileOutcome, FileReport};
pub use self::core::{LayoutOptions, LevelPipeline, Orientation, ProcessedLevel};
pub use self::dialect::{DialectMarkers, ModelDialect};
pub use self::extract::{TranscriptExtractor, detect_separator};
pub use self::shape::{FillSpec, ShapeEnforcement, ShapeNormalizer, ShapeSpec};
pub use self::transpose::{GridWarning, OrientationTransposer, RaggedColumnPolicy, Transposition};

// Submodules
pub mod batch;
pub mod core;
pub mod dialect;
pub mod extract;
pub mod shape;
pub mod transpose;
