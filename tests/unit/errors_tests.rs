/*!
 * Tests for error types and conversions
 */

use levelgrid::errors::{AppError, GridError};

#[test]
fn test_gridError_configuration_shouldDisplayCorrectly() {
    let error = GridError::Configuration("Unsupported model dialect: mistral".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Configuration error"));
    assert!(display.contains("mistral"));
}

#[test]
fn test_gridError_malformedInput_shouldDisplayCorrectly() {
    let error = GridError::MalformedInput("vertical level text is empty".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed input"));
    assert!(display.contains("vertical level text is empty"));
}

#[test]
fn test_gridError_emptyGrid_shouldDisplayCorrectly() {
    assert_eq!(GridError::EmptyGrid.to_string(), "Grid has no rows to normalize");
}

#[test]
fn test_appError_fromGridError_shouldWrapCorrectly() {
    let app_error: AppError = GridError::EmptyGrid.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Grid error"));
    assert!(display.contains("no rows"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("bad sample").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "bad sample"));
}
