use serde::{Deserialize, Serialize};

/// Schema version written by the extractor.
pub const BANK_VERSION: u64 = 1;

/// Category assigned to extracted questions. Text carries no category
/// information, so real categories are filled in by hand afterwards.
pub const DEFAULT_CATEGORY: &str = "default";

/// A single answer option.
///
/// `correct` has three observable states: `Some(true)`, `Some(false)` and
/// `None`. Only `Some(true)` counts as the right answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl Choice {
    pub fn new(text: impl Into<String>) -> Self {
        Choice {
            text: text.into(),
            correct: None,
        }
    }

    pub fn correct(text: impl Into<String>) -> Self {
        Choice {
            text: text.into(),
            correct: Some(true),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.correct == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Index of the first choice explicitly marked correct.
    pub fn answer_index(&self) -> Option<usize> {
        self.choices.iter().position(Choice::is_correct)
    }
}

/// The persisted question bank document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(source: Option<String>, questions: Vec<Question>) -> Self {
        QuestionBank {
            version: BANK_VERSION,
            source,
            questions,
        }
    }

    /// Serialize with two-space indentation and declaration field order.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> QuestionBank {
        QuestionBank::new(
            Some("notes.pdf".to_string()),
            vec![Question {
                id: "q1".to_string(),
                category: DEFAULT_CATEGORY.to_string(),
                prompt: "What is 2+2?".to_string(),
                note: None,
                choices: vec![Choice::new("3"), Choice::correct("4")],
            }],
        )
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let json = fixture().to_json_pretty().unwrap();
        assert!(!json.contains("note"));
        assert!(!json.contains("null"));
        // "3" has no correctness, "4" does.
        assert_eq!(json.matches("\"correct\"").count(), 1);
    }

    #[test]
    fn test_field_order_is_stable() {
        let json = fixture().to_json_pretty().unwrap();
        let version = json.find("\"version\"").unwrap();
        let source = json.find("\"source\"").unwrap();
        let questions = json.find("\"questions\"").unwrap();
        assert!(version < source && source < questions);

        let id = json.find("\"id\"").unwrap();
        let category = json.find("\"category\"").unwrap();
        let prompt = json.find("\"prompt\"").unwrap();
        let choices = json.find("\"choices\"").unwrap();
        assert!(id < category && category < prompt && prompt < choices);
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let json = fixture().to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"version\": 1,"));
    }

    #[test]
    fn test_answer_index() {
        let bank = fixture();
        assert_eq!(bank.questions[0].answer_index(), Some(1));
    }

    #[test]
    fn test_explicit_false_is_not_correct() {
        let choice = Choice {
            text: "x".to_string(),
            correct: Some(false),
        };
        assert!(!choice.is_correct());
        assert!(!Choice::new("y").is_correct());
    }
}
