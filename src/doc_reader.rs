//! Legacy binary Word (`.doc`) documents.
//!
//! There is no pure-Rust reader for the format, so text extraction is
//! delegated to a [`LegacyDocBackend`]. The default backend shells out to a
//! converter program such as `antiword` and captures its standard output.

use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::reader::{DocumentReader, Extracted};
use crate::text;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tracing::{debug, info};

/// Default converter program for `.doc` files
pub const DEFAULT_DOC_PROGRAM: &str = "antiword";

/// Why a backend could not produce text
#[derive(Debug)]
pub enum BackendError {
    /// The backend is not installed in this deployment
    Unavailable(String),
    /// The backend ran and failed on this document
    Failed(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "backend unavailable: {reason}"),
            Self::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Something that turns a `.doc` file into raw text bytes
pub trait LegacyDocBackend: Send + Sync {
    fn extract_bytes(&self, path: &Path) -> std::result::Result<Vec<u8>, BackendError>;
}

/// Runs an external program with the document path as its only argument
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: String,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandBackend {
    fn default() -> Self {
        Self::new(DEFAULT_DOC_PROGRAM)
    }
}

impl LegacyDocBackend for CommandBackend {
    fn extract_bytes(&self, path: &Path) -> std::result::Result<Vec<u8>, BackendError> {
        info!(program = %self.program, path = %path.display(), "Converting .doc with external program");

        let output = Command::new(&self.program).arg(path).output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BackendError::Unavailable(format!("`{}` is not installed", self.program))
            } else {
                BackendError::Failed(Box::new(e))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BackendError::Failed(
                format!("`{}` exited with {}: {}", self.program, output.status, stderr.trim()).into(),
            ));
        }

        Ok(output.stdout)
    }
}

pub struct DocData {
    path: PathBuf,
    backend: Option<Arc<dyn LegacyDocBackend>>,
}

impl DocData {
    pub fn open(path: &Path, backend: Option<Arc<dyn LegacyDocBackend>>) -> Self {
        Self {
            path: path.to_path_buf(),
            backend,
        }
    }
}

impl DocumentReader for DocData {
    fn extract(&self) -> Result<Extracted> {
        let Some(backend) = &self.backend else {
            return Err(ParseError::MissingOptionalBackend {
                format: Format::Doc,
                message: "parsing .doc files requires a text extraction backend, none is configured"
                    .into(),
            });
        };

        let bytes = backend.extract_bytes(&self.path).map_err(|e| match e {
            BackendError::Unavailable(reason) => ParseError::MissingOptionalBackend {
                format: Format::Doc,
                message: format!("parsing .doc files requires a text extraction backend: {reason}"),
            },
            BackendError::Failed(source) => {
                ParseError::extraction(Format::Doc, "failed to parse Word (.doc) file", source)
            }
        })?;

        debug!(bytes = bytes.len(), "Decoding .doc backend output");
        Ok(Extracted::FlatText(text::decode_utf8_or_gb18030(&bytes)))
    }
}
