#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No questions parsed from {path} ({lines_scanned} non-empty lines). Please review the parser rules for your source format.")]
    NothingExtracted { path: String, lines_scanned: usize },

    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Failed to load {location} ({status})")]
    BadStatus { location: String, status: u16 },
}
