/*!
 * Common test utilities for the levelgrid test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

/// Llama 3 transcript wrapping a three-row level
pub const LLAMA3_TRANSCRIPT: &str = "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n\n\
Generate a level<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n\
---\n-X-\nXXX<|eot_id|>";

/// Qwen 3 transcript with a reasoning block and a vertical-bar level
pub const QWEN3_VERTICAL_TRANSCRIPT: &str = "<|im_start|>user\nGenerate a level<|im_end|>\n\
<|im_start|>assistant\n<think>\nTwo columns, ground first.\n</think>\n\nX-|XQ<|im_end|>";

/// Routes library logs to the test output when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Owned rows from string literals
pub fn rows(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
