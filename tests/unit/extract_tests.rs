/*!
 * Tests for transcript extraction and separator detection
 */

use levelgrid::level::{ModelDialect, TranscriptExtractor, detect_separator};
use levelgrid::level::extract::{NEWLINE, VERTICAL_BAR};

use crate::common::LLAMA3_TRANSCRIPT;

#[test]
fn test_extract_withLlama3Transcript_shouldReturnAssistantTurn() {
    let level = TranscriptExtractor::extract(LLAMA3_TRANSCRIPT, ModelDialect::Llama3);
    assert_eq!(level, "---\n-X-\nXXX");
}

#[test]
fn test_extract_withGemma3Transcript_shouldStopAtEndOfTurn() {
    let raw = "<start_of_turn>user\nlevel please<end_of_turn>\n<start_of_turn>model\n  XX\n--  <end_of_turn>\ntrailing";
    assert_eq!(TranscriptExtractor::extract(raw, ModelDialect::Gemma3), "XX\n--");
}

#[test]
fn test_extract_withQwen25Transcript_shouldKeepThinkTags() {
    let raw = "<|im_start|>assistant\n<think>a</think>\nXX<|im_end|>";
    assert_eq!(
        TranscriptExtractor::extract(raw, ModelDialect::Qwen25),
        "<think>a</think>\nXX"
    );
}

#[test]
fn test_extract_withQwen3Reasoning_shouldKeepTextAfterLastClosingMarker() {
    let raw = "<|im_start|>assistant\n<think>first</think>draft<think>second</think>\n  XX|--  <|im_end|>";
    assert_eq!(TranscriptExtractor::extract(raw, ModelDialect::Qwen3), "XX|--");
}

#[test]
fn test_extract_withQwen3UnclosedReasoning_shouldKeepWholeTurn() {
    let raw = "<|im_start|>assistant\n<think>still thinking\nXX<|im_end|>";
    assert_eq!(
        TranscriptExtractor::extract(raw, ModelDialect::Qwen3),
        "<think>still thinking\nXX"
    );
}

#[test]
fn test_extract_withQwen3ClosingMarkerOnly_shouldKeepWholeTurn() {
    let raw = "<|im_start|>assistant\nnotes</think>XX<|im_end|>";
    assert_eq!(TranscriptExtractor::extract(raw, ModelDialect::Qwen3), "notes</think>XX");
}

#[test]
fn test_extract_withoutTurnStartMarker_shouldReturnTrimmedInput() {
    let raw = "  \n<think>x</think>XX\n--\n ";
    // Reasoning is only stripped inside an extracted turn
    assert_eq!(TranscriptExtractor::extract(raw, ModelDialect::Qwen3), "<think>x</think>XX\n--");
    assert_eq!(TranscriptExtractor::extract("", ModelDialect::Llama3), "");
}

#[test]
fn test_extract_withoutEndMarker_shouldKeepWholeSegment() {
    let raw = "<|start_header_id|>assistant<|end_header_id|>\nXX\n-X\n";
    assert_eq!(TranscriptExtractor::extract(raw, ModelDialect::Llama3), "XX\n-X");
}

#[test]
fn test_extract_withOtherDialectMarkers_shouldTreatAsNoOp() {
    assert_eq!(
        TranscriptExtractor::extract(LLAMA3_TRANSCRIPT, ModelDialect::Gemma3),
        LLAMA3_TRANSCRIPT.trim()
    );
}

#[test]
fn test_detectSeparator_withOnlyVerticalBar_shouldPickBar() {
    assert_eq!(detect_separator("XX|--|X-", NEWLINE), VERTICAL_BAR);
}

#[test]
fn test_detectSeparator_withOnlyNewline_shouldPickNewline() {
    assert_eq!(detect_separator("XX\n--", VERTICAL_BAR), NEWLINE);
}

#[test]
fn test_detectSeparator_withBothCharacters_shouldKeepDefault() {
    assert_eq!(detect_separator("XX|\n--", VERTICAL_BAR), VERTICAL_BAR);
    assert_eq!(detect_separator("XX|\n--", NEWLINE), NEWLINE);
    assert_eq!(detect_separator("XX|\n--", ';'), ';');
}

#[test]
fn test_detectSeparator_withNeitherCharacter_shouldKeepDefault() {
    assert_eq!(detect_separator("XXXX", VERTICAL_BAR), VERTICAL_BAR);
    assert_eq!(detect_separator("", ';'), ';');
}

#[test]
fn test_extract_withRepeatedCalls_shouldBeDeterministic() {
    let first = TranscriptExtractor::extract(LLAMA3_TRANSCRIPT, ModelDialect::Llama3);
    for _ in 0..10 {
        assert_eq!(TranscriptExtractor::extract(LLAMA3_TRANSCRIPT, ModelDialect::Llama3), first);
    }
}
