//! mf2 - microformats2 extractor

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mf2::{Microformats, ParseOptions};

#[derive(Parser)]
#[command(name = "mf2")]
#[command(version, about = "Extract microformats2 as JSON", long_about = None)]
#[command(after_help = "EXAMPLES:
    mf2 page.html                              Print items found in page.html
    mf2 --base-url https://example.com/ -      Read stdin, resolve relative URLs
    mf2 -vv page.html                          Trace property resolution")]
struct Cli {
    /// Input HTML file, or `-` for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Base URL for resolving relative links
    #[arg(short, long, value_name = "URL")]
    base_url: Option<String>,

    /// Print compact JSON
    #[arg(short, long)]
    compact: bool,

    /// More diagnostics on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "mf2=warn",
        1 => "mf2=debug",
        _ => "mf2=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut options = ParseOptions::new();
    if let Some(url) = &cli.base_url {
        options = options.with_base_url(url).map_err(|e| e.to_string())?;
    }

    let result = if cli.input == "-" {
        mf2::parse_reader(io::stdin().lock(), &options)
    } else {
        let file = File::open(&cli.input).map_err(|e| format!("{}: {e}", cli.input))?;
        mf2::parse_reader(file, &options)
    }
    .map_err(|e| e.to_string())?;

    tracing::info!(types = result.len(), "extraction finished");
    write_json(&result, cli.compact).map_err(|e| e.to_string())
}

fn write_json(result: &Microformats, compact: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if compact {
        serde_json::to_writer(&mut out, result)?;
    } else {
        serde_json::to_writer_pretty(&mut out, result)?;
    }
    writeln!(out)
}
