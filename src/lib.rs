/*!
 * # levelgrid - canonical game-level grids from model output
 *
 * A Rust library that turns raw, model-generated level text into a
 * rectangular character grid ready for scoring and rendering.
 *
 * ## Features
 *
 * - Strip chat-template framing for known generation dialects:
 *   - Llama 3
 *   - Gemma 3
 *   - Qwen 2.5
 *   - Qwen 3 (including reasoning blocks)
 * - Separator auto-detection (`|` or newline)
 * - Reconstruction of column-major "vertical-bar" levels
 * - Convergent trim/pad normalization and explicit shape enforcement
 * - Concurrent batch processing of sample files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `level`: The grid pipeline:
 *   - `level::extract`: Transcript extraction and separator detection
 *   - `level::transpose`: Vertical-bar to row-major conversion
 *   - `level::shape`: Shape normalization
 *   - `level::core`: Pipeline composition
 *   - `level::batch`: Batch processing of sample files
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod level;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use level::{LevelPipeline, ModelDialect, Orientation, ProcessedLevel};
pub use errors::{AppError, GridError};
