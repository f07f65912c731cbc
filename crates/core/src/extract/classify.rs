//! Line classification for the extractor.
//!
//! Every cleaned line is classified into exactly one [`LineKind`] by trying
//! an ordered list of [`LineMatcher`]s and keeping the first one whose handler
//! accepts the match. Classification looks at the line alone; whether a
//! question is currently open is decided by the caller.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Result of classifying one cleaned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Q1 ...`, `q 12 ...` or `3. ...`; carries the prompt text.
    QuestionStart { prompt: &'a str },
    /// `A) ...`, `b. ...`, `(2) ...`; carries the raw choice text, markers included.
    Choice { text: &'a str },
    /// `Answer: C`, `(correct answer = 2)`; carries the zero-based choice index.
    AnswerDeclaration { index: usize },
    Unrecognized,
}

/// Turns the captures of a matching pattern into a [`LineKind`].
///
/// Returning `None` lets the next matcher in the list try the line.
pub type Handler = for<'h> fn(&Captures<'h>) -> Option<LineKind<'h>>;

#[derive(Clone)]
pub struct LineMatcher {
    pub name: &'static str,
    pub pattern: Regex,
    pub handler: Handler,
}

impl std::fmt::Debug for LineMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineMatcher")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl LineMatcher {
    pub fn new(name: &'static str, pattern: &str, handler: Handler) -> Result<Self, regex::Error> {
        Ok(LineMatcher {
            name,
            pattern: Regex::new(pattern)?,
            handler,
        })
    }
}

/// Ordered set of line matchers. First match wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    matchers: Vec<LineMatcher>,
}

impl Classifier {
    /// The question-start, choice and answer-declaration rules, in priority order.
    pub fn standard() -> Self {
        static STANDARD: OnceLock<Classifier> = OnceLock::new();
        STANDARD
            .get_or_init(|| Classifier {
                matchers: vec![
                    LineMatcher {
                        name: "question-start",
                        pattern: Regex::new(r"^(?i:Q\s*\d+|\d+\.)\s+(.*)$").unwrap(),
                        handler: question_start,
                    },
                    LineMatcher {
                        name: "choice",
                        pattern: Regex::new(r"^(?:[A-Da-d][).]|\(?[1-4][).])\s+(.*)$").unwrap(),
                        handler: choice,
                    },
                    LineMatcher {
                        name: "answer-declaration",
                        pattern: Regex::new(
                            r"^(?i)\(?(?:answer|correct answer)\s*[:=]\s*([A-D1-4])\)?",
                        )
                        .unwrap(),
                        handler: answer_declaration,
                    },
                ],
            })
            .clone()
    }

    /// A classifier with no rules; every line is `Unrecognized`.
    pub fn empty() -> Self {
        Classifier {
            matchers: Vec::new(),
        }
    }

    /// Append a matcher with the lowest priority so far.
    pub fn with_matcher(mut self, matcher: LineMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name).collect()
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        self.matchers
            .iter()
            .find_map(|m| {
                m.pattern
                    .captures(line)
                    .and_then(|caps| (m.handler)(&caps))
            })
            .unwrap_or(LineKind::Unrecognized)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::standard()
    }
}

fn question_start<'h>(caps: &Captures<'h>) -> Option<LineKind<'h>> {
    caps.get(1).map(|m| LineKind::QuestionStart {
        prompt: m.as_str().trim(),
    })
}

fn choice<'h>(caps: &Captures<'h>) -> Option<LineKind<'h>> {
    caps.get(1).map(|m| LineKind::Choice {
        text: m.as_str().trim(),
    })
}

fn answer_declaration<'h>(caps: &Captures<'h>) -> Option<LineKind<'h>> {
    let marker = caps.get(1)?.as_str().chars().next()?;
    answer_index(marker).map(|index| LineKind::AnswerDeclaration { index })
}

/// Map an answer marker to a zero-based index: `A`/`1` → 0 … `D`/`4` → 3.
pub fn answer_index(marker: char) -> Option<usize> {
    match marker.to_ascii_uppercase() {
        c @ 'A'..='D' => Some(c as usize - 'A' as usize),
        c @ '1'..='4' => Some(c as usize - '1' as usize),
        _ => None,
    }
}
