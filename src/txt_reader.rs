use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::reader::{DocumentReader, Extracted};
use crate::text;
use std::fs;
use std::path::{Path, PathBuf};

/// Plain-text files, decoded as UTF-8 with invalid bytes dropped
pub struct TxtData {
    path: PathBuf,
}

impl TxtData {
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DocumentReader for TxtData {
    fn extract(&self) -> Result<Extracted> {
        let bytes = fs::read(&self.path)
            .map_err(|e| ParseError::extraction(Format::Txt, "failed to read text file", e))?;

        Ok(Extracted::FlatText(text::decode_utf8_lossy(&bytes)))
    }
}
