use std::path::{Path, PathBuf};

use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use quizbank_core::extract::{extract_with, Classifier, ExtractError};
use quizbank_core::validate::{lint, validate};
use quizbank_core::{QuestionBank, DEFAULT_CATEGORY};

#[derive(Debug, clap::Parser)]
#[command(name = "extract")]
#[command(about = "Extract questions from a PDF or text file into a JSON question bank")]
pub struct App {
    /// Path to the source document (.pdf, or already-extracted plain text)
    pub input: PathBuf,

    /// Where to write the question bank
    #[clap(env = "QUIZBANK_OUTPUT", default_value = crate::source::DEFAULT_BANK)]
    pub output: PathBuf,

    /// Category assigned to every extracted question
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,
}

/// Decoded input text, plus document metadata when the input was a PDF.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub text: String,
    pub pdf: Option<pdf::DocumentMetadata>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let SourceText {
        text,
        pdf: metadata,
    } = read_source_text(&app.input)?;

    if global.verbose {
        if let Some(metadata) = &metadata {
            print_pdf_metadata(metadata);
        }
        eprintln!(
            "Read {} characters from {}",
            text.chars().count(),
            app.input.display()
        );
    }

    let source = app
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let bank = extract_bank(&text, source, &app.category).map_err(|err| match err {
        ExtractError::NothingExtracted { lines_scanned } => Error::NothingExtracted {
            path: app.input.display().to_string(),
            lines_scanned,
        },
    })?;

    // Same check any consumer of the file will apply.
    let value = serde_json::to_value(&bank)?;
    let bank = validate(&value).context("Extracted question bank failed validation")?;

    for warning in lint(&bank) {
        log::warn!("{}", warning);
        if global.verbose {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
    }

    write_bank(&bank, &app.output)?;

    println!(
        "Wrote {} questions to {}",
        bank.questions.len(),
        app.output.display()
    );

    Ok(())
}

/// Read the input as PDF (by extension or `%PDF` magic) or as UTF-8 text.
pub fn read_source_text(path: &Path) -> Result<SourceText> {
    let bytes = std::fs::read(path).with_context(|| f!("Failed to read {}", path.display()))?;

    let has_pdf_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if has_pdf_extension || pdf::is_pdf(&bytes) {
        let decode_error = |e: pdf::PdfError| Error::Decode {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        let metadata = pdf::info(&bytes).map_err(decode_error)?;
        let text = pdf::extract_text(&bytes).map_err(decode_error)?;
        log::info!(
            "decoded {} as PDF: {} page(s), title {:?}",
            path.display(),
            metadata.page_count,
            metadata.title
        );
        return Ok(SourceText {
            text,
            pdf: Some(metadata),
        });
    }

    let text = String::from_utf8(bytes).map_err(|e| Error::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(SourceText { text, pdf: None })
}

fn print_pdf_metadata(metadata: &pdf::DocumentMetadata) {
    let mut table = new_table();
    table.add_row(prettytable::row!["Pages", metadata.page_count]);
    if let Some(title) = &metadata.title {
        table.add_row(prettytable::row!["Title", title]);
    }
    if let Some(author) = &metadata.author {
        table.add_row(prettytable::row!["Author", author]);
    }
    if let Some(creator) = &metadata.creator {
        table.add_row(prettytable::row!["Creator", creator]);
    }
    table.printstd();
}

/// Run the extractor and wrap the result in a version 1 bank.
pub fn extract_bank(
    text: &str,
    source: Option<String>,
    category: &str,
) -> std::result::Result<QuestionBank, ExtractError> {
    let questions = extract_with(text, &Classifier::standard(), category)?;
    Ok(QuestionBank::new(source, questions))
}

/// Write the bank as indented JSON, creating parent directories.
pub fn write_bank(bank: &QuestionBank, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| f!("Failed to create directory {}", parent.display()))?;
    }

    let json = bank.to_json_pretty()?;
    std::fs::write(output, json).with_context(|| f!("Failed to write {}", output.display()))?;

    Ok(())
}
