use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::reader::{DocumentReader, Extracted};
use docx_rust::document::{BodyContent, Paragraph, ParagraphContent, Run, RunContent};
use docx_rust::DocxFile;
use std::path::Path;

pub struct DocxData {
    /// Raw package; `extract` borrows a parsed `Docx` from it.
    file: DocxFile,
}

impl DocxData {
    pub fn open(path: &Path) -> Result<Self> {
        let file = DocxFile::from_file(path).map_err(|e| {
            ParseError::extraction(Format::Docx, "failed to open Word (.docx) file", e.to_string())
        })?;
        Ok(Self { file })
    }
}

impl DocumentReader for DocxData {
    fn extract(&self) -> Result<Extracted> {
        let docx = self.file.parse().map_err(|e| {
            ParseError::extraction(Format::Docx, "failed to parse Word (.docx) file", e.to_string())
        })?;

        let mut paragraphs = Vec::new();
        for content in &docx.document.body.content {
            collect_paragraphs(content, &mut paragraphs);
        }

        Ok(Extracted::FlatText(paragraphs.join("\n")))
    }
}

/// Top-level body paragraphs in document order; table cells are not included
fn collect_paragraphs(content: &BodyContent, out: &mut Vec<String>) {
    match content {
        BodyContent::Paragraph(para) => out.push(paragraph_text(para)),
        BodyContent::Sdt(sdt) => {
            // SDT has content: Option<SDTContent> which has content: Vec<BodyContent>
            if let Some(ref sdt_content) = sdt.content {
                for item in &sdt_content.content {
                    collect_paragraphs(item, out);
                }
            }
        }
        _ => {}
    }
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();

    for pc in &para.content {
        match pc {
            ParagraphContent::Run(run) => push_run_text(run, &mut text),
            ParagraphContent::Link(link) => {
                if let Some(ref run) = link.content {
                    push_run_text(run, &mut text);
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(run: &Run, text: &mut String) {
    for rc in &run.content {
        match rc {
            RunContent::Text(t) => text.push_str(&t.text),
            RunContent::Break(_) => text.push('\n'),
            RunContent::Tab(_) => text.push('\t'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn non_zip_file_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        fs::write(&path, b"plain text pretending to be docx").unwrap();

        let err = DocxData::open(&path)
            .and_then(|d| d.extract())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ExtractionFailure { format: Format::Docx, .. }
        ));
    }
}
