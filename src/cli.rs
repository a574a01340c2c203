use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Split a PDF, TXT, DOC, DOCX, EPUB or MOBI document into chapters
#[derive(Parser, Debug)]
#[command(name = "chapterize", version, about)]
pub struct Cli {
    /// Path to the input document; its extension selects the format
    pub input: PathBuf,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Characters per chapter when no headings are found
    #[arg(long, default_value_t = chapterize::segmenter::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Program used to extract text from legacy .doc files
    #[arg(long, default_value = chapterize::doc_reader::DEFAULT_DOC_PROGRAM)]
    pub doc_backend: String,

    /// Treat .doc files as unsupported instead of running a converter
    #[arg(long, default_value_t = false, conflicts_with = "doc_backend")]
    pub no_doc_backend: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["chapterize", "book.epub"]);
        assert_eq!(cli.chunk_size, 1200);
        assert_eq!(cli.doc_backend, "antiword");
        assert!(!cli.no_doc_backend);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn flags() {
        let cli = Cli::parse_from([
            "chapterize",
            "a.doc",
            "--no-doc-backend",
            "--chunk-size",
            "500",
            "-vv",
            "-o",
            "out.json",
        ]);
        assert!(cli.no_doc_backend);
        assert_eq!(cli.chunk_size, 500);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }
}
