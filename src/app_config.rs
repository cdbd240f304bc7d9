use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::level::{LayoutOptions, LevelPipeline, ModelDialect};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Transcript extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Grid layout settings
    #[serde(default)]
    pub layout: LayoutOptions,

    /// File processing settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcript extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ExtractionConfig {
    /// Chat-template dialect of the samples; raw text is used when unset
    #[serde(default)]
    pub dialect: Option<ModelDialect>,
}

/// File processing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Maximum number of files processed concurrently
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,

    /// Extensions of sample files picked up in folder mode
    #[serde(default = "default_input_extensions")]
    pub input_extensions: Vec<String>,

    /// Suffix of written grid files (`<stem>.<suffix>.txt`)
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrent_files: default_concurrent_files(),
            input_extensions: default_input_extensions(),
            output_suffix: default_output_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_files() -> usize {
    4
}

fn default_input_extensions() -> Vec<String> {
    vec!["txt".to_string(), "json".to_string()]
}

fn default_output_suffix() -> String {
    "canonical".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;

        if let Some(shape) = &layout.shape {
            shape.validate()?;
        }

        if layout.fill.fill_char == layout.separator {
            return Err(anyhow!(
                "Fill character {:?} cannot be the row separator",
                layout.fill.fill_char
            ));
        }

        if let Some(ground) = layout.fill.ground_char {
            if ground == layout.separator {
                return Err(anyhow!("Ground character {:?} cannot be the row separator", ground));
            }
        }

        if self.processing.concurrent_files == 0 {
            return Err(anyhow!("concurrent_files must be at least 1"));
        }

        if self.processing.output_suffix.trim().is_empty() {
            return Err(anyhow!("output_suffix cannot be empty"));
        }

        if self.processing.input_extensions.is_empty() {
            return Err(anyhow!("At least one input extension is required"));
        }

        Ok(())
    }

    /// Build the level pipeline described by this configuration
    pub fn pipeline(&self) -> LevelPipeline {
        LevelPipeline::new(self.extraction.dialect, self.layout.clone())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extraction: ExtractionConfig::default(),
            layout: LayoutOptions::default(),
            processing: ProcessingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
