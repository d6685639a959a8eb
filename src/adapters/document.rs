//! Uploaded document text extraction
//!
//! Plain text is decoded as UTF-8; PDFs are read page by page with lopdf.
//! A page that yields no text contributes nothing instead of failing the
//! whole document.

use crate::domain::{DocumentKind, UploadedDocument};
use crate::error::{AppError, Result};
use lopdf::Document;
use std::path::Path;

/// Extracts the text of uploaded files
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Text content of `file`, or empty text when no file was supplied
    pub fn load(&self, file: Option<&[u8]>, kind: DocumentKind) -> Result<String> {
        let Some(bytes) = file else {
            return Ok(String::new());
        };

        match kind {
            DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
                .map_err(|e| AppError::Document(format!("File is not valid UTF-8: {}", e))),
            DocumentKind::Pdf => Self::extract_pdf_text(bytes),
        }
    }

    /// Accept, read and extract a file from disk
    ///
    /// Rejects anything other than `.txt` and `.pdf` before reading it.
    pub fn load_path(&self, path: &Path) -> Result<UploadedDocument> {
        let kind = DocumentKind::from_path(path)?;
        let bytes = std::fs::read(path)?;
        let text = self.load(Some(bytes.as_slice()), kind)?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::info!(
            "Loaded {} ({:?}, {} characters)",
            file_name,
            kind,
            text.len()
        );

        Ok(UploadedDocument::new(file_name, kind, text))
    }

    fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
        let document = Document::load_mem(bytes)
            .map_err(|e| AppError::Document(format!("Failed to parse PDF: {}", e)))?;

        let mut text = String::new();
        for page_number in document.get_pages().keys() {
            match document.extract_text(&[*page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => log::warn!("No text extracted from page {}: {}", page_number, e),
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::io::Write;

    fn text_page_ops(line: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(line)]),
            Operation::new("ET", vec![]),
        ]
    }

    /// Build a PDF with one page per entry; `None` makes a blank page
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = page.map(text_page_ops).unwrap_or_default();
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_missing_file_is_empty() {
        let loader = DocumentLoader::new();
        assert_eq!(loader.load(None, DocumentKind::Pdf).unwrap(), "");
        assert_eq!(loader.load(None, DocumentKind::PlainText).unwrap(), "");
    }

    #[test]
    fn test_plain_text_decoding() {
        let loader = DocumentLoader::new();
        let text = loader
            .load(Some("Sales rose 10%.".as_bytes()), DocumentKind::PlainText)
            .unwrap();
        assert_eq!(text, "Sales rose 10%.");

        let invalid = loader.load(Some(&[0xff, 0xfe, 0xfd][..]), DocumentKind::PlainText);
        assert!(matches!(invalid, Err(AppError::Document(_))));
    }

    #[test]
    fn test_pdf_pages_are_concatenated() {
        let pdf = build_pdf(&[Some("Quarterly report"), None, Some("Sales rose 10%.")]);
        let text = DocumentLoader::new()
            .load(Some(pdf.as_slice()), DocumentKind::Pdf)
            .unwrap();

        let first = text.find("Quarterly report").unwrap();
        let second = text.find("Sales rose 10%.").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_unparseable_pdf_is_an_error() {
        let result = DocumentLoader::new().load(Some(&b"%PDF-garbage"[..]), DocumentKind::Pdf);
        assert!(matches!(result, Err(AppError::Document(_))));
    }

    #[test]
    fn test_load_path_accepts_text_files() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "My experience section").unwrap();

        let document = DocumentLoader::new().load_path(file.path()).unwrap();
        assert_eq!(document.kind, DocumentKind::PlainText);
        assert_eq!(document.text, "My experience section");
        assert!(document.file_name.ends_with(".txt"));
    }

    #[test]
    fn test_load_path_rejects_other_kinds() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let result = DocumentLoader::new().load_path(file.path());
        assert!(matches!(result, Err(AppError::UnsupportedDocument(_))));
    }
}
