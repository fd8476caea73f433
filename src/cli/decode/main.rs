use clap::Parser;
use m68k_trace::{
    logger::setup_logger,
    m68k::trace::{
        assembler::{decode_trace_with, split_lines, Trace},
        error::TraceError,
        DecodeOptions,
    },
};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Debug, Parser)]
#[clap(author, version, about = "A tool to decode 68000 execution traces.", long_about = None)]
struct Args {
    #[clap(long, help = "The trace file to decode. Use - to read from stdin.")]
    trace: PathBuf,
    #[clap(long, help = "Reject operands and registers the decoder does not recognize.")]
    strict: bool,
    #[clap(long, help = "Pretty-print each decoded line.")]
    pretty: bool,
    #[clap(long, help = "Write the decoded lines to this file instead of stdout.")]
    output: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error(transparent)]
    Io(std::io::Error),
    #[error(transparent)]
    Json(serde_json::Error),
    #[error(transparent)]
    Trace(TraceError),
}

fn main() -> Result<(), Error> {
    setup_logger();

    let args = Args::parse();

    let contents = load_trace(&args.trace)?;
    let raw_lines = split_lines(&contents);

    let options = DecodeOptions {
        strict: args.strict,
    };
    let trace = decode_trace_with(&raw_lines, options)?;
    info!(lines = trace.len(), "decoded {}", args.trace.display());

    match &args.output {
        Some(path) => write_trace(&trace, BufWriter::new(File::create(path)?), args.pretty),
        None => write_trace(&trace, std::io::stdout().lock(), args.pretty),
    }
}

fn load_trace(trace: &Path) -> Result<String, Error> {
    let mut contents = String::new();
    if trace == Path::new("-") {
        std::io::stdin().read_to_string(&mut contents)?;
    } else {
        File::open(trace)?.read_to_string(&mut contents)?;
    }
    Ok(contents)
}

/// Writes one JSON document per decoded line.
fn write_trace<W: Write>(trace: &Trace, mut writer: W, pretty: bool) -> Result<(), Error> {
    for line in trace {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, line)?;
        } else {
            serde_json::to_writer(&mut writer, line)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<TraceError> for Error {
    fn from(value: TraceError) -> Self {
        Self::Trace(value)
    }
}
