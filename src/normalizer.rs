//! Turns the free-form text a model returns into an [`AnalysisResult`].
//!
//! Models like to wrap JSON in markdown code fences even when told not to,
//! so the fence markers are stripped before parsing.

use log::debug;
use serde_json::Value;

use crate::model::AnalysisResult;
use crate::MoodflixError;

const OPENING_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Remove markdown JSON fences and surrounding whitespace
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace(OPENING_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Parse raw model output into an [`AnalysisResult`].
///
/// Unknown keys are ignored and missing keys default to empty values.
///
/// # Errors
/// Returns `Parse` if there is no text, the cleaned text is not a JSON
/// object, or a present field has the wrong type
pub fn normalize(raw: Option<&str>) -> Result<AnalysisResult, MoodflixError> {
    let raw = raw.ok_or_else(|| MoodflixError::Parse("model returned no text".to_string()))?;
    let cleaned = strip_code_fences(raw);
    debug!("Normalized model output: {}", cleaned);

    let value: Value =
        serde_json::from_str(&cleaned).map_err(|e| MoodflixError::Parse(e.to_string()))?;
    // Derived structs also accept arrays, filled by position
    if !value.is_object() {
        return Err(MoodflixError::Parse("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| MoodflixError::Parse(e.to_string()))
}
