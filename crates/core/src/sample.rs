use crate::bank::{Choice, Question, QuestionBank};

/// Prefix of the message shown when the sample bank replaces a bank that
/// failed to load.
pub const FALLBACK_NOTICE: &str = "Using built-in sample questions.";

/// The built-in bank used when the real one cannot be loaded.
pub fn sample_bank() -> QuestionBank {
    QuestionBank::new(
        Some("sample".to_string()),
        vec![Question {
            id: "sample-1".to_string(),
            category: "general".to_string(),
            prompt: "Sample question: What is 2 + 2?".to_string(),
            note: None,
            choices: vec![
                Choice::new("3"),
                Choice::correct("4"),
                Choice::new("5"),
                Choice::new("22"),
            ],
        }],
    )
}

/// Message surfaced to the user after falling back to [`sample_bank`].
pub fn fallback_message(reason: &str) -> String {
    format!("{FALLBACK_NOTICE} {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{lint, validate};

    #[test]
    fn test_sample_bank_is_valid() {
        let value = serde_json::to_value(sample_bank()).unwrap();
        assert_eq!(validate(&value).unwrap(), sample_bank());
        assert!(lint(&sample_bank()).is_empty());
    }

    #[test]
    fn test_fallback_message() {
        assert_eq!(
            fallback_message("Failed to load questions.json (404)"),
            "Using built-in sample questions. Failed to load questions.json (404)"
        );
    }
}
