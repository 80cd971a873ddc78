//! Text extraction adapter — turns raw PDF bytes into one concatenated
//! string of page text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable PDF document: {0}")]
    Unreadable(String),
}

/// Extracts the text layer of every page, in page order, and concatenates
/// the page texts with a single separating space before each page.
///
/// Image-only pages have no text layer and contribute an empty segment.
/// There is no OCR fallback.
pub fn extract_document_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push(' ');
        text.push_str(page.trim());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_separates_pages_with_single_space() {
        let pages = vec![
            "Alice Engineer".to_string(),
            "5 years experience".to_string(),
        ];
        assert_eq!(join_pages(&pages), " Alice Engineer 5 years experience");
    }

    #[test]
    fn test_join_pages_empty_document_yields_empty_string() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_join_pages_image_only_page_contributes_empty_segment() {
        let pages = vec!["intro".to_string(), String::new(), "outro".to_string()];
        assert_eq!(join_pages(&pages), " intro  outro");
    }

    #[test]
    fn test_extract_rejects_non_pdf_bytes() {
        let result = extract_document_text(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Unreadable(_))));
    }
}
