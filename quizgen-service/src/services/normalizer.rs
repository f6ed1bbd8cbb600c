//! Turns free-form model output into validated questions.
//!
//! Models are asked for a bare JSON array but routinely wrap it in code
//! fences, sprinkle comments, or surround it with prose. Normalization is a
//! single best-effort pass:
//!
//! 1. strip fences and whole-line comments, collapse whitespace;
//! 2. parse the cleaned text as an array, or as `{"questions": [...]}`;
//! 3. if the text is not valid JSON at all, retry on the span between the
//!    first `[` and the last `]`;
//! 4. validate every record and keep only the client-facing fields.
//!
//! Step 3 does not disambiguate nested or multiple arrays in prose. Any
//! failing record fails the whole batch.

use crate::models::{Question, QuestionSet, OPTIONS_PER_QUESTION};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json|```").unwrap());
static SLASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\n\s*//.*$").unwrap());
static HASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)\n\s*#.*$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Wrapper key accepted around the question array.
const WRAPPER_KEY: &str = "questions";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Model returned empty content")]
    EmptyResponse,

    #[error("Invalid model output: {0}")]
    Format(String),

    #[error("Question {index} {reason}")]
    Validation {
        /// 1-based position of the offending record.
        index: usize,
        reason: ValidationFailure,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("must have exactly 4 options (found {found})")]
    OptionCount { found: usize },

    #[error("must have exactly one correct option (found {found})")]
    CorrectCount { found: usize },

    #[error("is malformed: {0}")]
    Malformed(String),
}

/// Strip code fences and line comments, then collapse all whitespace.
///
/// Comments are only recognised on lines after the first, which keeps
/// `//` inside URLs on the opening line intact.
pub fn clean_response(raw: &str) -> String {
    let text = CODE_FENCE.replace_all(raw, "");
    let text = SLASH_COMMENT.replace_all(&text, "");
    let text = HASH_COMMENT.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Span from the first `[` to the last `]`, if any.
pub fn extract_array_fragment(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Normalize raw model output into a validated [`QuestionSet`].
pub fn normalize(raw: &str) -> Result<QuestionSet, NormalizeError> {
    if raw.trim().is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let cleaned = clean_response(raw);

    let records = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => unwrap_records(value)?,
        Err(parse_err) => {
            tracing::debug!(
                error = %parse_err,
                cleaned_len = cleaned.len(),
                "Model output is not valid JSON, scanning for an array"
            );
            recover_array(&cleaned)?
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| validate_record(i + 1, record))
        .collect()
}

fn unwrap_records(value: Value) -> Result<Vec<Value>, NormalizeError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(WRAPPER_KEY) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(not_an_array()),
        },
        _ => Err(not_an_array()),
    }
}

fn not_an_array() -> NormalizeError {
    NormalizeError::Format(format!(
        "not an array or recognized wrapper (expected a JSON array or an object with a '{}' array)",
        WRAPPER_KEY
    ))
}

fn recover_array(cleaned: &str) -> Result<Vec<Value>, NormalizeError> {
    let fragment = extract_array_fragment(cleaned).ok_or_else(|| {
        NormalizeError::Format("no valid JSON array found in model output".to_string())
    })?;

    match serde_json::from_str::<Value>(fragment) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(not_an_array()),
        Err(e) => Err(NormalizeError::Format(format!(
            "recovered array is not valid JSON: {}",
            e
        ))),
    }
}

fn validate_record(index: usize, record: Value) -> Result<Question, NormalizeError> {
    let fail = |reason| NormalizeError::Validation { index, reason };

    let found = record
        .get("options")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if found != OPTIONS_PER_QUESTION {
        return Err(fail(ValidationFailure::OptionCount { found }));
    }

    let question: Question = serde_json::from_value(record)
        .map_err(|e| fail(ValidationFailure::Malformed(e.to_string())))?;

    let correct = question.correct_count();
    if correct != 1 {
        return Err(fail(ValidationFailure::CorrectCount { found: correct }));
    }

    Ok(question)
}
