use std::io::{BufRead, Write};

use crate::prelude::{eprintln, println, *};
use crate::source::{load_bank_or_sample, BankLocation, DEFAULT_BANK};
use colored::Colorize;
use quizbank_core::quiz::{AnswerState, QuizSession};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, clap::Parser)]
#[command(name = "play")]
#[command(about = "Take a quiz in the terminal")]
pub struct App {
    /// Path or http(s) URL of the bank
    #[arg(long, env = "QUIZBANK_BANK", default_value = DEFAULT_BANK)]
    pub bank: String,

    /// Only ask questions from this category
    #[arg(long)]
    pub category: Option<String>,

    /// Seed for the shuffle, for a repeatable question order
    #[arg(long)]
    pub seed: Option<u64>,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: usize,
    pub answered: usize,
    pub total: usize,
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Answer(usize),
    Restart,
    Quit,
    Invalid,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let location = BankLocation::parse(&app.bank);
    let (bank, notice) = load_bank_or_sample(&location).await;

    if let Some(notice) = notice {
        eprintln!("{}", notice.yellow());
    }

    let mut rng = match app.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session = QuizSession::new(&bank, app.category.as_deref(), &mut rng);

    if session.is_empty() {
        println!("No questions available.");
        return Ok(());
    }

    if global.verbose {
        println!("Loaded {} question(s) from {}", bank.questions.len(), location);
    }

    let summary = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        run_session(session, stdin.lock(), stdout.lock())
    })
    .await??;

    log::info!(
        "session ended: {} correct, {} answered of {} (finished: {})",
        summary.score,
        summary.answered,
        summary.total,
        summary.finished
    );

    Ok(())
}

/// Drive a session from line-based input until the last question is answered,
/// the user quits, or input runs out.
pub fn run_session<R: BufRead, W: Write>(
    mut session: QuizSession,
    mut input: R,
    mut out: W,
) -> Result<SessionSummary> {
    let mut answered = 0;
    let mut finished = false;

    'questions: while let Some(question) = session.current().cloned() {
        let (position, total) = session.progress();

        writeln!(out)?;
        writeln!(
            out,
            "Question {} / {}   Score: {}",
            position,
            total,
            session.score()
        )?;
        writeln!(out, "[{}] {}", question.category, question.prompt)?;
        if let Some(note) = &question.note {
            writeln!(out, "  {}", note.dimmed())?;
        }
        for (index, choice) in question.choices.iter().enumerate() {
            writeln!(out, "  {}) {}", choice_label(index), choice.text)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }

            match parse_command(&line, question.choices.len()) {
                Command::Quit => break 'questions,
                Command::Restart => {
                    session.restart();
                    answered = 0;
                    writeln!(out, "Restarting.")?;
                    continue 'questions;
                }
                Command::Invalid => {
                    writeln!(
                        out,
                        "Enter A-{} or 1-{}, 'restart' or 'quit'.",
                        choice_label(question.choices.len().saturating_sub(1)),
                        question.choices.len()
                    )?;
                }
                Command::Answer(index) => {
                    let state = session.submit(index)?;
                    answered += 1;
                    match state {
                        AnswerState::Correct => writeln!(out, "{}", "Correct!".green().bold())?,
                        _ => match question.answer_index() {
                            Some(right) => writeln!(
                                out,
                                "{} The answer is {}) {}",
                                "Incorrect.".red().bold(),
                                choice_label(right),
                                question.choices[right].text
                            )?,
                            None => writeln!(
                                out,
                                "{} This question has no marked answer.",
                                "Incorrect.".red().bold()
                            )?,
                        },
                    }
                    break;
                }
            }
        }

        if !session.next() {
            finished = true;
            break;
        }
    }

    let total = session.progress().1;
    writeln!(out)?;
    writeln!(out, "Final score: {} / {}", session.score(), total)?;

    Ok(SessionSummary {
        score: session.score(),
        answered,
        total,
        finished,
    })
}

/// `A`, `B`, ... for choice indices past `Z` fall back to numbers.
fn choice_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// A letter (`a`, `B`) or 1-based number selects a choice.
fn parse_command(line: &str, choice_count: usize) -> Command {
    let line = line.trim();

    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
        return Command::Quit;
    }
    if line.eq_ignore_ascii_case("restart") {
        return Command::Restart;
    }

    let index = if let Ok(number) = line.parse::<usize>() {
        number.checked_sub(1)
    } else {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
            }
            _ => None,
        }
    };

    match index {
        Some(i) if i < choice_count => Command::Answer(i),
        _ => Command::Invalid,
    }
}
