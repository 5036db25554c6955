//! binbump command line
//!
//! Converts a text mode screen dump into an HTML fragment.
//!
//! # Usage
//!
//! ```bash
//! # Convert a file, write to stdout
//! binbump screen.bin
//!
//! # 80 column dump, revised palette, into a file
//! binbump -w 80 -p revised screen.bin -o screen.html
//!
//! # Dump the decoded rows as JSON
//! binbump --json < screen.bin
//! ```

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binbump::{decode_document, write_document, CodePage, DecodeOptions, Error, PaletteKind, Result};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "binbump")]
#[command(version)]
#[command(about = "Convert IBM PC text mode screen dumps to HTML", long_about = None)]
struct CliArgs {
    /// Screen dump to read (stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML file with decode options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Columns per row
    #[arg(short, long, value_name = "COLS")]
    width: Option<usize>,

    /// Stop after this many rows (0 = no limit)
    #[arg(short, long, value_name = "ROWS")]
    max_rows: Option<usize>,

    /// Color palette (standard, revised)
    #[arg(short, long, value_name = "PALETTE")]
    palette: Option<PaletteKind>,

    /// Code page of the character bytes (cp437, cp865)
    #[arg(long, value_name = "CODEPAGE")]
    code_page: Option<CodePage>,

    /// Wrap each character in its own span with a data-xy attribute
    #[arg(long)]
    debug: bool,

    /// Print the decoded rows as JSON instead of HTML
    #[arg(long)]
    json: bool,
}

impl CliArgs {
    /// Merge with defaults and the options file; arguments win
    fn options(&self) -> Result<DecodeOptions> {
        let mut opts = match &self.config {
            Some(path) => DecodeOptions::load(path)?,
            None => DecodeOptions::default(),
        };
        if let Some(width) = self.width {
            opts.width = width;
        }
        if let Some(max_rows) = self.max_rows {
            opts.max_rows = max_rows;
        }
        if let Some(palette) = self.palette {
            opts.palette = palette;
        }
        if let Some(code_page) = &self.code_page {
            opts.code_page = code_page.clone();
        }
        if self.debug {
            opts.debug = true;
        }
        Ok(opts.normalized())
    }

    /// Open FILE, or stdin when it is piped. An interactive stdin is no input.
    fn open_input(&self, stdin_is_terminal: bool) -> Result<Box<dyn Read>> {
        match &self.input {
            Some(path) => {
                let file = File::open(path).map_err(Error::Read)?;
                Ok(Box::new(file))
            }
            None if stdin_is_terminal => Err(Error::MissingInput),
            None => Ok(Box::new(io::stdin().lock())),
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path).map_err(Error::Write)?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(written) => {
            tracing::debug!(written, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("binbump: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<u64> {
    let options = args.options()?;
    let input = args.open_input(io::stdin().is_terminal())?;
    let doc = decode_document(input, &options)?;

    let mut out = args.open_output()?;
    if args.json {
        let json = serde_json::to_string_pretty(&doc).map_err(|e| Error::Write(e.into()))?;
        out.write_all(json.as_bytes()).map_err(Error::Write)?;
        out.write_all(b"\n").map_err(Error::Write)?;
        out.flush().map_err(Error::Write)?;
        return Ok(json.len() as u64 + 1);
    }
    write_document(&doc, &mut out)
}
