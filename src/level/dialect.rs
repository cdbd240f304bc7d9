/*!
 * Chat-template dialects of the generation backends.
 *
 * Each dialect is a row in a static marker table; extraction code never
 * branches on the dialect itself, it only reads the markers.
 */

use serde::{Deserialize, Serialize};

use crate::errors::GridError;

/// Turn and reasoning markers of one chat-template dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectMarkers {
    /// Marker opening the assistant/model turn
    pub turn_start: &'static str,
    /// Marker closing a turn
    pub turn_end: &'static str,
    /// Optional (start, end) pair wrapping a reasoning block inside the turn
    pub reasoning: Option<(&'static str, &'static str)>,
}

/// Known generation dialects
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ModelDialect {
    #[serde(alias = "llama-3")]
    Llama3,
    #[serde(alias = "gemma-3")]
    Gemma3,
    #[serde(alias = "qwen-2.5")]
    Qwen25,
    #[serde(alias = "qwen-3")]
    Qwen3,
}

const IM_START_ASSISTANT: &str = "<|im_start|>assistant";
const IM_END: &str = "<|im_end|>";

static DIALECT_TABLE: [(ModelDialect, DialectMarkers); 4] = [
    (
        ModelDialect::Llama3,
        DialectMarkers {
            turn_start: "<|start_header_id|>assistant<|end_header_id|>",
            turn_end: "<|eot_id|>",
            reasoning: None,
        },
    ),
    (
        ModelDialect::Gemma3,
        DialectMarkers {
            turn_start: "<start_of_turn>model",
            turn_end: "<end_of_turn>",
            reasoning: None,
        },
    ),
    (
        ModelDialect::Qwen25,
        DialectMarkers {
            turn_start: IM_START_ASSISTANT,
            turn_end: IM_END,
            reasoning: None,
        },
    ),
    (
        ModelDialect::Qwen3,
        DialectMarkers {
            turn_start: IM_START_ASSISTANT,
            turn_end: IM_END,
            reasoning: Some(("<think>", "</think>")),
        },
    ),
];

impl ModelDialect {
    /// All dialects in table order
    pub const ALL: [ModelDialect; 4] = [
        ModelDialect::Llama3,
        ModelDialect::Gemma3,
        ModelDialect::Qwen25,
        ModelDialect::Qwen3,
    ];

    /// Marker table entry for this dialect
    pub fn markers(&self) -> &'static DialectMarkers {
        // Rows are stored in discriminant order
        &DIALECT_TABLE[*self as usize].1
    }

    // @returns: Canonical lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llama3 => "llama3",
            Self::Gemma3 => "gemma3",
            Self::Qwen25 => "qwen25",
            Self::Qwen3 => "qwen3",
        }
    }
}

impl std::fmt::Display for ModelDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelDialect {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "llama3" | "llama-3" => Ok(Self::Llama3),
            "gemma3" | "gemma-3" => Ok(Self::Gemma3),
            "qwen25" | "qwen-2.5" => Ok(Self::Qwen25),
            "qwen3" | "qwen-3" => Ok(Self::Qwen3),
            _ => Err(GridError::Configuration(format!(
                "Unsupported model dialect: {}",
                s
            ))),
        }
    }
}
