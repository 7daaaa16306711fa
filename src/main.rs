use std::{io, path::Path, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use nordnet_gains::{
    app::{Pipeline, input::Encoding, input::read_input},
    config::Config,
};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// FIFO realized-gain report for a brokerage transaction export.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Transaction export to read; standard input when omitted
    input: Option<String>,

    /// JSON file overriding column names, transaction types and date formats
    #[arg(long)]
    config: Option<String>,

    #[arg(long, value_enum, default_value_t = Encoding::Auto)]
    encoding: Encoding,

    /// Field delimiter; detected from the header line when omitted
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ if value.len() == 1 && value.is_ascii() => Ok(value.as_bytes()[0]),
        _ => Err("delimiter must be a single ASCII character or 'tab'".to_string()),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(Path::new(&*shellexpand::tilde(path)))?,
        None => Config::default(),
    };

    let bytes = read_input(cli.input.as_deref())?;
    let report = Pipeline::new(config)
        .with_encoding(cli.encoding)
        .with_delimiter(cli.delimiter)
        .run_bytes(&bytes)?;

    for diagnostic in report.diagnostics() {
        warn!("{}", diagnostic);
    }

    report.write_csv(io::stdout().lock())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
