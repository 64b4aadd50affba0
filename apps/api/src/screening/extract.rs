//! Text Extractor — turns PDF bytes into one lowercase string.
//!
//! Pages are concatenated in page order with no separator. A page without a
//! text layer (scanned images) contributes an empty string.
//!
//! `pdf-extract` is the primary path. When it rejects or panics on a document
//! that `lopdf` can still load, pages are extracted one at a time and any page
//! that fails to decode contributes an empty string instead of failing the file.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a valid PDF document: {0}")]
    Parse(String),
}

/// Extracts the lowercase text of every page of a PDF.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let primary =
        panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem_by_pages(bytes)));

    let pages = match primary {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            debug!("pdf-extract failed ({e}), retrying page by page");
            extract_pages_lenient(bytes)?
        }
        Err(_) => {
            debug!("pdf-extract panicked, retrying page by page");
            extract_pages_lenient(bytes)?
        }
    };

    Ok(join_pages(&pages))
}

/// Per-page extraction with `lopdf`. Only an unloadable container is an error.
fn extract_pages_lenient(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let doc = lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let pages = doc
        .get_pages()
        .keys()
        .map(|&page| match doc.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                debug!(page, "no extractable text on page: {e}");
                String::new()
            }
        })
        .collect();

    Ok(pages)
}

fn join_pages(pages: &[String]) -> String {
    pages.concat().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::test_support::pdf_with_pages;

    #[test]
    fn test_extracts_lowercase_text() {
        let pdf = pdf_with_pages(&["I know Python and Java"]);
        let text = extract_text(&pdf).unwrap();
        assert!(text.contains("python"), "got {text:?}");
        assert!(text.contains("java"), "got {text:?}");
        assert_eq!(text, text.to_lowercase());
    }

    #[test]
    fn test_pages_are_joined_in_order() {
        let pdf = pdf_with_pages(&["Alpha", "Omega"]);
        let text = extract_text(&pdf).unwrap();
        let alpha = text.find("alpha").expect("first page missing");
        let omega = text.find("omega").expect("second page missing");
        assert!(alpha < omega);
    }

    #[test]
    fn test_page_without_text_contributes_nothing() {
        let pdf = pdf_with_pages(&["", "Rust"]);
        let text = extract_text(&pdf).unwrap();
        assert_eq!(text.trim(), "rust");
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let err = extract_text(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn test_truncated_pdf_is_a_parse_error() {
        assert!(extract_text(b"%PDF-1.5\n").is_err());
    }

    #[test]
    fn test_join_pages_inserts_no_separator() {
        let pages = vec!["Foo".to_string(), String::new(), "Bar".to_string()];
        assert_eq!(join_pages(&pages), "foobar");
    }
}
