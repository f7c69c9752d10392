use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::extraction::ExtractError;

/// Extracts the text of every top-level paragraph, joined with newlines.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let document = read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = document
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for node in &run.children {
                match node {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
