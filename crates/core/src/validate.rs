//! Structural validation of untyped question bank documents.
//!
//! [`validate`] walks a `serde_json::Value` and either returns the typed
//! [`QuestionBank`] unchanged in content, or the first violation found as a
//! [`SchemaError`] naming the offending path (e.g. `questions[2].choices[0].text`).
//!
//! Correctness is not validated: a question may have zero or several choices
//! marked correct. [`lint`] reports those cases as warnings instead.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::bank::{Choice, Question, QuestionBank};
use crate::extract::MIN_CHOICES;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaError {
    pub path: String,
    pub reason: String,
}

impl SchemaError {
    fn new(path: &str, reason: impl Into<String>) -> Self {
        SchemaError {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid question bank at {0}")]
    Schema(#[from] SchemaError),
}

/// Parse JSON text and validate it.
pub fn validate_str(json: &str) -> Result<QuestionBank, ValidateError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(validate(&value)?)
}

/// Validate an untyped candidate bank.
pub fn validate(candidate: &Value) -> Result<QuestionBank, SchemaError> {
    let root = as_object(candidate, "$")?;

    let version = match root.get("version") {
        Some(value) => positive_integer(value).ok_or_else(|| {
            SchemaError::new(
                "version",
                "must be a positive integer no larger than 2^64 - 1",
            )
        })?,
        None => return Err(SchemaError::new("version", "is required")),
    };

    let source = optional_string(root, "source", "source")?;

    let questions = match root.get("questions") {
        Some(Value::Array(items)) if items.is_empty() => {
            return Err(SchemaError::new("questions", "must contain at least 1 question"))
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_question(item, &format!("questions[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(SchemaError::new("questions", "must be an array")),
        None => return Err(SchemaError::new("questions", "is required")),
    };

    Ok(QuestionBank {
        version,
        source,
        questions,
    })
}

fn validate_question(value: &Value, path: &str) -> Result<Question, SchemaError> {
    let object = as_object(value, path)?;

    let id = required_string(object, "id", path)?;
    let category = required_string(object, "category", path)?;
    let prompt = required_string(object, "prompt", path)?;
    let note = optional_string(object, "note", &format!("{path}.note"))?;

    let choices_path = format!("{path}.choices");
    let choices = match object.get("choices") {
        Some(Value::Array(items)) if items.len() < MIN_CHOICES => {
            return Err(SchemaError::new(
                &choices_path,
                format!(
                    "must contain at least {MIN_CHOICES} choices, found {}",
                    items.len()
                ),
            ))
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| validate_choice(item, &format!("{choices_path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(SchemaError::new(&choices_path, "must be an array")),
        None => return Err(SchemaError::new(&choices_path, "is required")),
    };

    Ok(Question {
        id,
        category,
        prompt,
        note,
        choices,
    })
}

fn validate_choice(value: &Value, path: &str) -> Result<Choice, SchemaError> {
    let object = as_object(value, path)?;

    let text = required_string(object, "text", path)?;
    let correct = match object.get("correct") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(SchemaError::new(
                &format!("{path}.correct"),
                "must be a boolean when present",
            ))
        }
    };

    Ok(Choice { text, correct })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::new(path, format!("must be an object, found {}", kind(value))))
}

fn required_string(
    object: &Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<String, SchemaError> {
    match object.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(SchemaError::new(
            &format!("{parent}.{key}"),
            "must be a non-empty string",
        )),
    }
}

fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, SchemaError> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::new(
            path,
            format!("must be a string when present, found {}", kind(other)),
        )),
    }
}

/// Integral JSON numbers, including float spellings such as `1.0`.
fn positive_integer(value: &Value) -> Option<u64> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f >= u64::MAX as f64 {
                return None;
            }
            f as u64
        }
    };
    (n > 0).then_some(n)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Non-fatal finding about an otherwise valid bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// More than one choice has `correct: true`.
    MultipleCorrect { id: String, count: usize },
    /// No choice has `correct: true`; the question can never be scored.
    NoCorrect { id: String },
    DuplicateId { id: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MultipleCorrect { id, count } => {
                write!(f, "question {id} has {count} choices marked correct")
            }
            Warning::NoCorrect { id } => write!(f, "question {id} has no choice marked correct"),
            Warning::DuplicateId { id } => write!(f, "question id {id} is used more than once"),
        }
    }
}

/// Report correctness and id anomalies without rejecting the bank.
pub fn lint(bank: &QuestionBank) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for question in &bank.questions {
        if !seen.insert(question.id.as_str()) {
            warnings.push(Warning::DuplicateId {
                id: question.id.clone(),
            });
        }

        match question.choices.iter().filter(|c| c.is_correct()).count() {
            0 => warnings.push(Warning::NoCorrect {
                id: question.id.clone(),
            }),
            1 => {}
            count => warnings.push(Warning::MultipleCorrect {
                id: question.id.clone(),
                count,
            }),
        }
    }

    warnings
}
