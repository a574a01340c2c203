mod cli;

use anyhow::{anyhow, Context, Result};
use chapterize::{Chapter, CommandBackend, DocumentParser, ParseError};
use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Exit status for documents that could not be parsed
const EXIT_BAD_INPUT: u8 = 2;
/// Exit status when a required backend is not installed
const EXIT_MISSING_BACKEND: u8 = 3;

#[derive(Serialize)]
struct ChaptersResponse<'a> {
    chapters: &'a [Chapter],
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&cli, &err),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn build_parser(cli: &cli::Cli) -> DocumentParser {
    let builder = DocumentParser::builder().chunk_size(cli.chunk_size);
    if cli.no_doc_backend {
        builder.without_doc_backend().build()
    } else {
        builder.doc_backend(CommandBackend::new(&cli.doc_backend)).build()
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let parser = build_parser(cli);

    let chapters = panic::catch_unwind(AssertUnwindSafe(|| parser.parse(&cli.input)))
        .map_err(|_| anyhow!("parser panicked on {}", cli.input.display()))??;

    write_json(cli, &ChaptersResponse { chapters: &chapters })
}

fn write_json<T: Serialize>(cli: &cli::Cli, value: &T) -> Result<()> {
    let mut writer: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if cli.pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush().context("Failed to write output")?;
    Ok(())
}

fn report(cli: &cli::Cli, err: &anyhow::Error) -> ExitCode {
    let (message, code) = match err.downcast_ref::<ParseError>() {
        Some(parse_err) => {
            warn!(error = ?parse_err, "Could not parse document");
            let code = if parse_err.is_input_error() {
                EXIT_BAD_INPUT
            } else {
                EXIT_MISSING_BACKEND
            };
            (parse_err.to_string(), code)
        }
        None => {
            error!("{err:#}");
            ("internal error while parsing the document".to_string(), 1)
        }
    };

    if let Err(write_err) = write_json(cli, &ErrorResponse { error: &message }) {
        error!("{write_err:#}");
    }
    ExitCode::from(code)
}
