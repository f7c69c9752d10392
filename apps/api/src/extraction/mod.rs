//! Document text extraction.
//!
//! Uploaded bytes are classified into a [`DocumentKind`] and dispatched to the
//! matching extractor. Parsing is CPU-bound and runs on the blocking pool; a
//! panic inside a parsing library surfaces as a parse error of that kind.

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod text;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

/// Number of characters shown in the upload preview.
pub const PREVIEW_CHARS: usize = 1000;

const MIME_PDF: &str = "application/pdf";
const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_TEXT: &str = "text/plain";
const MIME_OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to process PDF file. Please ensure the file is not corrupted. ({0})")]
    Pdf(String),

    #[error("Failed to process DOCX file. Please ensure the file is not corrupted. ({0})")]
    Docx(String),

    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),

    #[error("No text could be extracted from the document")]
    Empty,
}

/// The closed set of document formats the upload step understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    /// Both `.docx` and legacy `.doc` uploads are routed to the DOCX parser.
    Docx,
    PlainText,
    Unsupported(String),
}

impl DocumentKind {
    /// Classifies a declared MIME type. Parameters (`; charset=...`) and case are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF => DocumentKind::Pdf,
            MIME_DOC | MIME_DOCX => DocumentKind::Docx,
            MIME_TEXT => DocumentKind::PlainText,
            _ => DocumentKind::Unsupported(essence),
        }
    }

    /// Classifies by file extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Uses the declared type when there is a meaningful one; otherwise falls
    /// back to the filename extension.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Self {
        let declared = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(MIME_OCTET_STREAM));

        match declared {
            Some(ct) => Self::from_mime(ct),
            None => filename
                .and_then(Self::from_filename)
                .unwrap_or_else(|| {
                    DocumentKind::Unsupported(
                        content_type.unwrap_or(MIME_OCTET_STREAM).to_string(),
                    )
                }),
        }
    }
}

/// Extracts plain text from `bytes` on the current thread.
pub fn extract_text(kind: &DocumentKind, bytes: &[u8]) -> Result<String, ExtractError> {
    let text = match kind {
        DocumentKind::Pdf => pdf::extract(bytes)?,
        DocumentKind::Docx => docx::extract(bytes)?,
        DocumentKind::PlainText => text::extract(bytes)?,
        DocumentKind::Unsupported(mime) => return Err(ExtractError::Unsupported(mime.clone())),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(text)
}

/// Extracts plain text on the blocking pool.
pub async fn extract_document(kind: DocumentKind, bytes: Bytes) -> Result<String, ExtractError> {
    if let DocumentKind::Unsupported(mime) = kind {
        return Err(ExtractError::Unsupported(mime));
    }

    let parse_kind = kind.clone();
    match tokio::task::spawn_blocking(move || extract_text(&parse_kind, &bytes)).await {
        Ok(result) => result,
        Err(join_error) => {
            let reason = format!("parser aborted: {join_error}");
            Err(match kind {
                DocumentKind::Docx => ExtractError::Docx(reason),
                _ => ExtractError::Pdf(reason),
            })
        }
    }
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` appended when truncated.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime_covers_supported_types() {
        assert_eq!(DocumentKind::from_mime("application/pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(MIME_DOCX), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_mime("application/msword"), DocumentKind::Docx);
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            DocumentKind::PlainText
        );
        assert_eq!(DocumentKind::from_mime("Application/PDF"), DocumentKind::Pdf);
    }

    #[test]
    fn test_from_mime_unsupported_keeps_type() {
        assert_eq!(
            DocumentKind::from_mime("image/png"),
            DocumentKind::Unsupported("image/png".to_string())
        );
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(
            DocumentKind::detect(Some("application/octet-stream"), Some("deal.DOCX")),
            DocumentKind::Docx
        );
        assert_eq!(DocumentKind::detect(None, Some("terms.txt")), DocumentKind::PlainText);
        assert_eq!(
            DocumentKind::detect(None, Some("photo.png")),
            DocumentKind::Unsupported("application/octet-stream".to_string())
        );
    }

    #[test]
    fn test_detect_prefers_declared_type() {
        assert_eq!(
            DocumentKind::detect(Some("text/plain"), Some("contract.pdf")),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_extract_text_unsupported() {
        let err = extract_text(&DocumentKind::Unsupported("image/png".into()), b"\x89PNG").unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(ref m) if m == "image/png"));
    }

    #[test]
    fn test_extract_text_whitespace_only_is_empty() {
        let err = extract_text(&DocumentKind::PlainText, b"  \n\t ").unwrap_err();
        assert!(matches!(err, ExtractError::Empty));
    }

    #[tokio::test]
    async fn test_extract_document_plain_text() {
        let text = extract_document(
            DocumentKind::PlainText,
            Bytes::from_static(b"Seller: Acme\nBuyer: Globex"),
        )
        .await
        .unwrap();
        assert_eq!(text, "Seller: Acme\nBuyer: Globex");
    }

    #[tokio::test]
    async fn test_extract_document_corrupt_pdf_is_parse_error() {
        let err = extract_document(DocumentKind::Pdf, Bytes::from_static(b"not a pdf at all"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[tokio::test]
    async fn test_extract_document_corrupt_docx_is_parse_error() {
        let err = extract_document(DocumentKind::Docx, Bytes::from_static(b"PK\x03\x04garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Docx(_)));
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("short"), "short");
        let exact = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(PREVIEW_CHARS + 5);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }
}
