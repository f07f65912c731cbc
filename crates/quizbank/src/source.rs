use std::path::PathBuf;

use crate::prelude::*;
use quizbank_core::sample::{fallback_message, sample_bank};
use quizbank_core::validate::validate_str;
use quizbank_core::QuestionBank;

/// Where `play` and `validate` look for a bank when none is given.
pub const DEFAULT_BANK: &str = "public/questions/questions.json";

/// A question bank location: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankLocation {
    Url(String),
    Path(PathBuf),
}

impl BankLocation {
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            BankLocation::Url(input.to_string())
        } else {
            BankLocation::Path(PathBuf::from(input))
        }
    }
}

impl std::fmt::Display for BankLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BankLocation::Url(url) => write!(f, "{}", url),
            BankLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load and validate a bank. Any failure is returned to the caller.
pub async fn load_bank(location: &BankLocation) -> Result<QuestionBank> {
    let json = match location {
        BankLocation::Url(url) => fetch_text(url).await?,
        BankLocation::Path(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| f!("Failed to read {}", path.display()))?,
    };

    let bank = validate_str(&json).with_context(|| f!("Failed to validate {}", location))?;
    log::info!(
        "loaded {} question(s) from {}",
        bank.questions.len(),
        location
    );

    Ok(bank)
}

/// Load a bank, substituting the built-in sample on any failure.
///
/// The second value carries the message to show the user when the sample
/// was substituted.
pub async fn load_bank_or_sample(location: &BankLocation) -> (QuestionBank, Option<String>) {
    match load_bank(location).await {
        Ok(bank) => (bank, None),
        Err(err) => {
            log::warn!("falling back to sample bank: {:#}", err);
            (sample_bank(), Some(fallback_message(&f!("{:#}", err))))
        }
    }
}

/// GET a URL with caching disabled.
async fn fetch_text(url: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-cache")
        .header(reqwest::header::PRAGMA, "no-cache")
        .send()
        .await
        .with_context(|| f!("Failed to fetch {}", url))?;

    if !response.status().is_success() {
        return Err(Error::BadStatus {
            location: url.to_string(),
            status: response.status().as_u16(),
        }
        .into());
    }

    response
        .text()
        .await
        .with_context(|| f!("Failed to read response body from {}", url))
}
