use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::reader::{DocumentReader, Extracted};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::warn;

/// PDF documents, flattened to a single text stream by `pdf-extract`
pub struct PdfData {
    path: PathBuf,
}

impl PdfData {
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DocumentReader for PdfData {
    fn extract(&self) -> Result<Extracted> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text(&self.path)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(Extracted::FlatText(text)),
            Ok(Err(e)) => Err(ParseError::extraction(
                Format::Pdf,
                "failed to parse PDF file",
                e.to_string(),
            )),
            Err(_) => {
                warn!(path = %self.path.display(), "PDF backend panicked");
                Err(ParseError::extraction_msg(
                    Format::Pdf,
                    "failed to parse PDF file: malformed document",
                ))
            }
        }
    }
}
