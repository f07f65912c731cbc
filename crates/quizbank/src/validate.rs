use crate::prelude::{println, *};
use crate::source::{load_bank, BankLocation, DEFAULT_BANK};
use colored::Colorize;
use quizbank_core::quiz::categories;
use quizbank_core::validate::{lint, Warning};
use quizbank_core::QuestionBank;

#[derive(Debug, clap::Parser)]
#[command(name = "validate")]
#[command(about = "Validate a question bank file or URL")]
pub struct App {
    /// Path or http(s) URL of the bank
    #[clap(env = "QUIZBANK_BANK", default_value = DEFAULT_BANK)]
    pub location: String,

    /// Print the validated bank as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let location = BankLocation::parse(&app.location);

    if global.verbose {
        println!("Validating {}", location);
    }

    let bank = load_bank(&location).await?;
    let warnings = lint(&bank);

    if app.json {
        println!("{}", bank.to_json_pretty()?);
        return Ok(());
    }

    println!("\n{} {}\n", "Valid question bank:".green().bold(), location);

    let mut table = new_table();
    for (label, value) in summary_rows(&bank) {
        table.add_row(prettytable::row![label, value]);
    }
    table.printstd();

    print_warnings(&warnings);

    Ok(())
}

/// Label/value pairs describing a bank, in display order.
pub fn summary_rows(bank: &QuestionBank) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Version".to_string(), bank.version.to_string()),
        (
            "Source".to_string(),
            bank.source.clone().unwrap_or_else(|| "-".to_string()),
        ),
        ("Questions".to_string(), bank.questions.len().to_string()),
    ];

    for category in categories(bank) {
        let count = bank
            .questions
            .iter()
            .filter(|q| q.category == category)
            .count();
        rows.push((f!("Category {}", category), count.to_string()));
    }

    rows
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }

    println!("\n{} ({})", "Warnings".yellow().bold(), warnings.len());
    for warning in warnings {
        println!("  - {}", warning);
    }
}
