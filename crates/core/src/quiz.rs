//! Quiz session state: category filtering, shuffling and scoring.
//!
//! The session never touches a terminal or a clock; the caller drives it
//! with [`QuizSession::submit`], [`QuizSession::next`] and
//! [`QuizSession::restart`] and renders whatever it likes.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::bank::{Question, QuestionBank};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    Unanswered,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("No question to answer")]
    NoQuestion,
    #[error("Choice {index} is out of range (question has {count} choices)")]
    ChoiceOutOfRange { index: usize, count: usize },
}

/// Distinct categories in first-seen order.
pub fn categories(bank: &QuestionBank) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for question in &bank.questions {
        if !seen.iter().any(|c| c == &question.category) {
            seen.push(question.category.clone());
        }
    }
    seen
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    state: AnswerState,
    selected: Option<usize>,
    score: usize,
}

impl QuizSession {
    /// Build a session over the questions of `category` (all when `None`),
    /// with each question's choices shuffled and then the questions shuffled.
    pub fn new<R: Rng + ?Sized>(bank: &QuestionBank, category: Option<&str>, rng: &mut R) -> Self {
        let mut questions: Vec<Question> = bank
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .cloned()
            .collect();

        for question in questions.iter_mut() {
            question.choices.shuffle(rng);
        }
        questions.shuffle(rng);

        QuizSession {
            questions,
            index: 0,
            state: AnswerState::Unanswered,
            selected: None,
            score: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// 1-based position and total, e.g. `(3, 10)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn state(&self) -> AnswerState {
        self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Answer the current question. A second submission is a no-op that
    /// returns the existing state.
    pub fn submit(&mut self, choice: usize) -> Result<AnswerState, QuizError> {
        let question = self.current().ok_or(QuizError::NoQuestion)?;

        if self.state != AnswerState::Unanswered {
            return Ok(self.state);
        }

        let picked = question
            .choices
            .get(choice)
            .ok_or(QuizError::ChoiceOutOfRange {
                index: choice,
                count: question.choices.len(),
            })?;

        let correct = picked.is_correct();
        self.selected = Some(choice);
        if correct {
            self.state = AnswerState::Correct;
            self.score += 1;
        } else {
            self.state = AnswerState::Incorrect;
        }

        Ok(self.state)
    }

    /// Move to the next question once the current one is answered.
    pub fn next(&mut self) -> bool {
        if self.state == AnswerState::Unanswered || self.is_last() {
            return false;
        }

        self.index += 1;
        self.state = AnswerState::Unanswered;
        self.selected = None;
        true
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.state = AnswerState::Unanswered;
        self.selected = None;
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::Choice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: &str, category: &str) -> Question {
        Question {
            id: id.to_string(),
            category: category.to_string(),
            prompt: format!("Prompt {id}"),
            note: None,
            choices: vec![Choice::new("wrong"), Choice::correct("right"), Choice::new("nope")],
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(
            None,
            vec![
                question("1", "math"),
                question("2", "history"),
                question("3", "math"),
            ],
        )
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn right_index(session: &QuizSession) -> usize {
        session.current().unwrap().answer_index().unwrap()
    }

    fn wrong_index(session: &QuizSession) -> usize {
        session
            .current()
            .unwrap()
            .choices
            .iter()
            .position(|c| !c.is_correct())
            .unwrap()
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(categories(&bank()), vec!["math", "history"]);
    }

    #[test]
    fn test_category_filter() {
        let session = QuizSession::new(&bank(), Some("math"), &mut rng());
        assert_eq!(session.progress(), (1, 2));
        assert!(session.current().unwrap().category == "math");

        let all = QuizSession::new(&bank(), None, &mut rng());
        assert_eq!(all.progress(), (1, 3));
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let mut session = QuizSession::new(&bank(), Some("art"), &mut rng());
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert_eq!(session.submit(0), Err(QuizError::NoQuestion));
    }

    #[test]
    fn test_shuffle_keeps_every_question_and_choice() {
        let session = QuizSession::new(&bank(), None, &mut rng());
        let mut ids: Vec<_> = session.questions.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3"]);

        for q in &session.questions {
            let mut texts: Vec<_> = q.choices.iter().map(|c| c.text.as_str()).collect();
            texts.sort();
            assert_eq!(texts, vec!["nope", "right", "wrong"]);
            assert_eq!(q.choices.iter().filter(|c| c.is_correct()).count(), 1);
        }
    }

    #[test]
    fn test_correct_answer_scores() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        let idx = right_index(&session);
        assert_eq!(session.submit(idx), Ok(AnswerState::Correct));
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected(), Some(idx));
    }

    #[test]
    fn test_incorrect_answer_does_not_score() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        let idx = wrong_index(&session);
        assert_eq!(session.submit(idx), Ok(AnswerState::Incorrect));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_second_submit_is_ignored() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        let wrong = wrong_index(&session);
        let right = right_index(&session);
        session.submit(wrong).unwrap();
        assert_eq!(session.submit(right), Ok(AnswerState::Incorrect));
        assert_eq!(session.score(), 0);
        assert_eq!(session.selected(), Some(wrong));
    }

    #[test]
    fn test_out_of_range_choice() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        assert_eq!(
            session.submit(9),
            Err(QuizError::ChoiceOutOfRange { index: 9, count: 3 })
        );
        assert_eq!(session.state(), AnswerState::Unanswered);
    }

    #[test]
    fn test_next_requires_answer_and_stops_at_end() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        assert!(!session.next());

        for expected in 1..=3 {
            assert_eq!(session.progress(), (expected, 3));
            let idx = right_index(&session);
            session.submit(idx).unwrap();
            let moved = session.next();
            assert_eq!(moved, expected < 3);
        }

        assert!(session.is_last());
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_restart_resets_progress_and_score() {
        let mut session = QuizSession::new(&bank(), None, &mut rng());
        let first_id = session.current().unwrap().id.clone();
        let idx = right_index(&session);
        session.submit(idx).unwrap();
        session.next();

        session.restart();
        assert_eq!(session.progress(), (1, 3));
        assert_eq!(session.score(), 0);
        assert_eq!(session.state(), AnswerState::Unanswered);
        assert_eq!(session.current().unwrap().id, first_id);
    }

    #[test]
    fn test_unset_correctness_never_scores() {
        let mut bank = bank();
        for q in bank.questions.iter_mut() {
            for c in q.choices.iter_mut() {
                c.correct = None;
            }
        }
        let mut session = QuizSession::new(&bank, None, &mut rng());
        assert_eq!(session.submit(0), Ok(AnswerState::Incorrect));
    }
}
