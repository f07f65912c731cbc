//! Best-effort question extraction from plain text.
//!
//! The text is split into trimmed, non-empty lines and scanned once. Each
//! line is classified (see [`classify`]) and folded into an [`Accumulator`]
//! that holds at most one open question. A question is committed only once
//! it has at least two choices; anything less is dropped without a trace.
//!
//! Only the line that opens a question contributes to its prompt. Prompts
//! that wrap onto following lines lose their continuation.

pub mod classify;
pub mod markers;

use thiserror::Error;

use crate::bank::{Choice, Question, QuestionBank, DEFAULT_CATEGORY};

pub use classify::{answer_index, Classifier, Handler, LineKind, LineMatcher};
pub use markers::strip_markers;

/// Minimum number of choices a question needs to be committed.
pub const MIN_CHOICES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No questions parsed from {lines_scanned} non-empty lines. Please review the parser rules for your source format.")]
    NothingExtracted { lines_scanned: usize },
}

/// Split on any newline variant, trim, and drop empty lines.
pub fn clean_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(&['\n', '\r'][..])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Extract questions with the standard rules and the default category.
pub fn extract(text: &str) -> Result<Vec<Question>, ExtractError> {
    extract_with(text, &Classifier::standard(), DEFAULT_CATEGORY)
}

/// Extract questions using a custom classifier and category.
pub fn extract_with(
    text: &str,
    classifier: &Classifier,
    category: &str,
) -> Result<Vec<Question>, ExtractError> {
    let acc = clean_lines(text).fold(Accumulator::new(category), |acc, line| {
        acc.feed(classifier.classify(line))
    });

    let lines_scanned = acc.lines_scanned;
    let questions = acc.finish();

    if questions.is_empty() {
        return Err(ExtractError::NothingExtracted { lines_scanned });
    }

    Ok(questions)
}

/// Extract questions and wrap them in a version 1 bank.
pub fn build_bank(text: &str, source: Option<String>) -> Result<QuestionBank, ExtractError> {
    Ok(QuestionBank::new(source, extract(text)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Draft {
    prompt: String,
    choices: Vec<Choice>,
}

/// Scan state threaded through the fold.
#[derive(Debug, Clone)]
pub struct Accumulator {
    category: String,
    open: Option<Draft>,
    committed: Vec<Question>,
    lines_scanned: usize,
}

impl Accumulator {
    pub fn new(category: &str) -> Self {
        Accumulator {
            category: category.to_string(),
            open: None,
            committed: Vec::new(),
            lines_scanned: 0,
        }
    }

    pub fn feed(mut self, kind: LineKind<'_>) -> Self {
        self.lines_scanned += 1;

        match kind {
            LineKind::QuestionStart { prompt } => {
                self.close_open();
                self.open = Some(Draft {
                    prompt: prompt.to_string(),
                    choices: Vec::new(),
                });
            }
            LineKind::Choice { text } => {
                if let Some(draft) = self.open.as_mut() {
                    let (text, marked) = strip_markers(text);
                    if text.is_empty() {
                        log::debug!("ignoring choice with no text besides markers");
                    } else {
                        draft.choices.push(Choice {
                            text,
                            correct: marked.then_some(true),
                        });
                    }
                }
            }
            LineKind::AnswerDeclaration { index } => {
                if let Some(draft) = self.open.as_mut() {
                    if draft.choices.len() >= MIN_CHOICES {
                        if index < draft.choices.len() {
                            for (i, choice) in draft.choices.iter_mut().enumerate() {
                                choice.correct = Some(i == index);
                            }
                        } else {
                            log::debug!(
                                "ignoring answer {} for a question with {} choices",
                                index + 1,
                                draft.choices.len()
                            );
                        }
                    }
                }
            }
            LineKind::Unrecognized => {}
        }

        self
    }

    pub fn finish(mut self) -> Vec<Question> {
        self.close_open();
        self.committed
    }

    fn close_open(&mut self) {
        let Some(draft) = self.open.take() else {
            return;
        };

        if draft.choices.len() < MIN_CHOICES {
            log::debug!(
                "discarding question {:?} with {} choice(s)",
                draft.prompt,
                draft.choices.len()
            );
            return;
        }

        let id = format!("q{}", self.committed.len() + 1);
        self.committed.push(Question {
            id,
            category: self.category.clone(),
            prompt: draft.prompt,
            note: None,
            choices: draft.choices,
        });
    }
}
