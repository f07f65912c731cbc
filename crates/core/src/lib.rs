//! Core library for quizbank
//!
//! This crate implements the **Functional Core** of the quizbank application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The quizbank project uses a three-crate architecture:
//!
//! - **`quizbank_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: PDF bytes to plain text
//! - **`quizbank`**: File and network I/O, the CLI, and the terminal quiz (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! Randomness is the one input that varies; [`quiz::QuizSession::new`] takes
//! the RNG as an argument so tests can seed it.
//!
//! # Module Organization
//!
//! - [`bank`]: The question bank data model and its JSON shape
//! - [`extract`]: Line-pattern extraction of questions from plain text
//! - [`validate`]: Structural validation of untyped bank documents, plus lints
//! - [`sample`]: The built-in fallback bank
//! - [`quiz`]: Quiz session state (filter, shuffle, score)
//!
//! # Example Usage
//!
//! ```rust
//! use quizbank_core::extract::build_bank;
//! use quizbank_core::validate::validate_str;
//!
//! let text = "Q1 What is 2+2?\nA) 3\nB) 4*\nC) 5";
//! let bank = build_bank(text, Some("notes.txt".to_string())).unwrap();
//! assert_eq!(bank.questions[0].choices[1].correct, Some(true));
//!
//! let json = bank.to_json_pretty().unwrap();
//! assert_eq!(validate_str(&json).unwrap(), bank);
//! ```

pub mod bank;
pub mod extract;
pub mod quiz;
pub mod sample;
pub mod validate;

pub use bank::{Choice, Question, QuestionBank, BANK_VERSION, DEFAULT_CATEGORY};
