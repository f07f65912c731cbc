use std::collections::BTreeMap;

use thiserror::Error;

use parser::backend::PdfBackend;

pub mod cleanup;
pub mod parser;
pub mod types;

pub use types::*;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The plain text of a PDF, page by page.
///
/// Constructed via [`TextDocument::from_bytes`]. Layout is not analysed:
/// each page's text comes out in content-stream order, which is good enough
/// for single-column documents.
#[derive(Debug, Clone)]
pub struct TextDocument {
    pub metadata: DocumentMetadata,
    pub pages: Vec<PageText>,
}

impl TextDocument {
    /// Parse PDF bytes and extract the text of every page.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let backend = parser::backend::LopdfBackend::load_bytes(bytes)?;
        Self::from_backend(&backend)
    }

    /// Extract every page through any [`PdfBackend`]. A page that fails to
    /// decode fails the whole document.
    pub fn from_backend<B: PdfBackend>(backend: &B) -> Result<Self, PdfError> {
        let page_map = backend.pages();

        let pages = page_map
            .keys()
            .map(|&number| {
                let text = cleanup::cleanup_text(&backend.page_text(number)?);
                Ok(PageText { number, text })
            })
            .collect::<Result<Vec<_>, PdfError>>()?;

        log::debug!("extracted text from {} page(s)", pages.len());

        let metadata = extract_metadata(&backend.metadata(), page_map.len());

        Ok(TextDocument { metadata, pages })
    }

    /// All page texts joined with newlines, empty pages skipped.
    pub fn text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Convenience free functions (stateless, re-parse each call)
// ---------------------------------------------------------------------------

/// Extract the plain text of a PDF.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    Ok(TextDocument::from_bytes(bytes)?.text())
}

/// Get document metadata without extracting any text.
pub fn info(bytes: &[u8]) -> Result<DocumentMetadata, PdfError> {
    let backend = parser::backend::LopdfBackend::load_bytes(bytes)?;
    Ok(extract_metadata(&backend.metadata(), backend.page_count()))
}

/// Whether the bytes start with the `%PDF` magic.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn extract_metadata(raw: &BTreeMap<String, String>, page_count: usize) -> DocumentMetadata {
    DocumentMetadata {
        title: raw.get("Title").cloned(),
        author: raw.get("Author").cloned(),
        page_count,
        creator: raw.get("Creator").cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::backend::PageId;

    struct MockBackend {
        pages: Vec<Result<&'static str, &'static str>>,
        meta: BTreeMap<String, String>,
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            (1..=self.pages.len() as u32)
                .map(|n| (n, (n + 10, 0)))
                .collect()
        }

        fn page_text(&self, page_number: u32) -> Result<String, PdfError> {
            match self.pages[page_number as usize - 1] {
                Ok(text) => Ok(text.to_string()),
                Err(msg) => Err(PdfError::Parse(msg.to_string())),
            }
        }

        fn metadata(&self) -> BTreeMap<String, String> {
            self.meta.clone()
        }
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let backend = MockBackend {
            pages: vec![Ok("Q1 First?\nA) a\n"), Ok(""), Ok("B) b\n")],
            meta: BTreeMap::new(),
        };

        let doc = TextDocument::from_backend(&backend).unwrap();
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(doc.pages[2].number, 3);
        assert_eq!(doc.text(), "Q1 First?\nA) a\nB) b");
    }

    #[test]
    fn test_page_text_is_cleaned() {
        let backend = MockBackend {
            pages: vec![Ok("A) \u{FB01}nal   answer")],
            meta: BTreeMap::new(),
        };

        let doc = TextDocument::from_backend(&backend).unwrap();
        assert_eq!(doc.text(), "A) final  answer");
    }

    #[test]
    fn test_page_failure_fails_document() {
        let backend = MockBackend {
            pages: vec![Ok("fine"), Err("bad font")],
            meta: BTreeMap::new(),
        };

        assert!(matches!(
            TextDocument::from_backend(&backend),
            Err(PdfError::Parse(msg)) if msg == "bad font"
        ));
    }

    #[test]
    fn test_metadata() {
        let mut meta = BTreeMap::new();
        meta.insert("Title".to_string(), "Exam".to_string());
        meta.insert("Producer".to_string(), "ignored".to_string());
        let backend = MockBackend {
            pages: vec![Ok("x"), Ok("y")],
            meta,
        };

        let doc = TextDocument::from_backend(&backend).unwrap();
        assert_eq!(doc.metadata.title.as_deref(), Some("Exam"));
        assert_eq!(doc.metadata.author, None);
        assert_eq!(doc.metadata.page_count, 2);
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"Q1 plain text"));
    }

    fn sample_pdf(pages: usize, title: &str) -> Vec<u8> {
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let kids: Vec<Object> = (0..pages)
            .map(|_| {
                let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id
                })
                .into()
            })
            .collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title)
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_info_reads_page_count_and_title() {
        let bytes = sample_pdf(2, "Midterm");
        assert!(is_pdf(&bytes));

        let meta = info(&bytes).unwrap();
        assert_eq!(meta.page_count, 2);
        assert_eq!(meta.title.as_deref(), Some("Midterm"));
        assert_eq!(meta.author, None);
    }

    #[test]
    fn test_info_rejects_empty_bytes() {
        assert!(info(&[]).is_err());
    }

    #[test]
    fn test_extract_text_rejects_plain_text() {
        assert!(matches!(
            extract_text(b"Q1 not a pdf\nA) x"),
            Err(PdfError::Parse(_))
        ));
    }
}
