//! Command-line interface for the TPS decoder.
//!
//! This module defines the CLI with the clap derive API and the commands
//! behind it: decoding an export to JSON, listing raw rows by tag, and
//! serving the HTTP API.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use crate::api::{AppState, create_router};
use crate::config::{ConfigLoader, DecoderConfig, ErrorPolicy, FinalPeriod, HeaderStrictness};
use crate::decoding::{decode_lines, group_rows, select_rows};
use crate::models::{RawLine, RecordTag};
use crate::source::{SourceInput, read_input};

/// CLI arguments for the TPS decoder.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tps-decoder",
    version,
    about = "Decode colon-delimited TPS attendance exports into JSON",
    long_about = "Decodes TPS attendance exports (A1 header lines and A2-A4 day-block lines) \
                  into per-employee records keyed by composite key, and prints them as JSON."
)]
pub struct Args {
    /// Path to a YAML configuration file
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Use the slim dataset instead of the full one
    #[arg(long = "slim", global = true, conflicts_with = "file")]
    pub slim: bool,

    /// Decode a custom export file
    #[arg(short = 'f', long = "file", value_name = "PATH", global = true)]
    pub file: Option<PathBuf>,

    /// Encoding of exports that are not UTF-8, e.g. windows-31j
    #[arg(short = 'e', long = "encoding", value_name = "LABEL", global = true)]
    pub encoding: Option<String>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode an export and print the result set as JSON
    Decode(DecodeArgs),
    /// Print undecoded rows for the given tags
    Rows(RowsArgs),
    /// Serve the decode API over HTTP
    Serve(ServeArgs),
}

/// Arguments for the decode command.
#[derive(Debug, Clone, Parser)]
pub struct DecodeArgs {
    /// Reject header lines with more tokens than the header schema
    #[arg(long = "strict")]
    pub strict: bool,

    /// Label used for the final third of the month
    #[arg(long = "final-period", value_enum)]
    pub final_period: Option<FinalPeriodArg>,

    /// Stop at the first line that fails to decode
    #[arg(long = "abort-on-error")]
    pub abort_on_error: bool,

    /// Comma-separated record tags to decode, e.g. A1,A2
    #[arg(short = 't', long = "tags", value_name = "LIST", value_delimiter = ',')]
    pub tags: Vec<RecordTag>,

    /// Print the full report (errors and counts) instead of the records only
    #[arg(long = "report")]
    pub report: bool,

    /// Write the JSON to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the rows command.
#[derive(Debug, Clone, Parser)]
pub struct RowsArgs {
    /// Comma-separated record tags to list, e.g. A1,A2
    #[arg(
        short = 't',
        long = "tags",
        value_name = "LIST",
        value_delimiter = ',',
        required = true
    )]
    pub tags: Vec<RecordTag>,
}

/// Arguments for the serve command.
#[derive(Debug, Clone, Parser)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long = "addr", value_name = "ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,
}

/// Final-third label policy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FinalPeriodArg {
    /// Always "21_30"
    Thirty,
    /// Always "21_31"
    ThirtyOne,
    /// From the header's target month
    Calendar,
}

impl From<FinalPeriodArg> for FinalPeriod {
    fn from(arg: FinalPeriodArg) -> Self {
        match arg {
            FinalPeriodArg::Thirty => FinalPeriod::Thirty,
            FinalPeriodArg::ThirtyOne => FinalPeriod::ThirtyOne,
            FinalPeriodArg::Calendar => FinalPeriod::Calendar,
        }
    }
}

/// Which input file a run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// The configured slim dataset
    Slim,
    /// The configured full dataset
    Full,
    /// A file given on the command line
    Custom,
}

impl DatasetKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Slim => "slim",
            DatasetKind::Full => "full",
            DatasetKind::Custom => "custom",
        }
    }
}

impl Args {
    /// Returns the log level implied by `--quiet` and `--verbose`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Resolves the input file against the configured dataset paths.
    pub fn dataset(&self, config: &DecoderConfig) -> (DatasetKind, PathBuf) {
        match (&self.file, self.slim) {
            (Some(path), _) => (DatasetKind::Custom, path.clone()),
            (None, true) => (DatasetKind::Slim, config.datasets.slim.clone()),
            (None, false) => (DatasetKind::Full, config.datasets.full.clone()),
        }
    }
}

impl DecodeArgs {
    /// Applies the command-line overrides to `config`.
    pub fn apply(&self, mut config: DecoderConfig) -> DecoderConfig {
        if self.strict {
            config.header_strictness = HeaderStrictness::Strict;
        }
        if let Some(final_period) = self.final_period {
            config.final_period = final_period.into();
        }
        if self.abort_on_error {
            config.error_policy = ErrorPolicy::Abort;
        }
        if !self.tags.is_empty() {
            config.record_tags = self.tags.clone();
        }
        config
    }
}

/// Runs the command selected by `args`.
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);

    let config = load_configuration(&args)?;

    match &args.command {
        Commands::Decode(decode_args) => run_decode(&args, decode_args, config),
        Commands::Rows(rows_args) => run_rows(&args, rows_args, &config),
        Commands::Serve(serve_args) => run_serve(serve_args, config),
    }
}

/// Set up structured logging on stderr so stdout carries only JSON.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tps_decoder={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

fn load_configuration(args: &Args) -> Result<DecoderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let loader = ConfigLoader::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            info!(path = %loader.path().display(), "Loaded configuration");
            loader.into_config()
        }
        None => DecoderConfig::default(),
    };

    if let Some(encoding) = &args.encoding {
        config.encoding = encoding.clone();
    }
    Ok(config)
}

/// Reads the selected dataset and prints the banner.
fn read_dataset(args: &Args, config: &DecoderConfig) -> Result<(PathBuf, Vec<RawLine>)> {
    let (kind, path) = args.dataset(config);
    let input = read_input(&path, &config.encoding)
        .with_context(|| format!("reading {}", path.display()))?;
    print_banner(kind, &path, &input);
    Ok((path, input.lines))
}

fn print_banner(kind: DatasetKind, path: &Path, input: &SourceInput) {
    let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    eprintln!();
    eprintln!("TPS decoder");
    eprintln!("Dataset: {} ({})", kind.as_str(), shown.display());
    if input.had_errors {
        eprintln!("Encoding: {} (malformed bytes replaced)", input.encoding);
    } else {
        eprintln!("Encoding: {}", input.encoding);
    }
    eprintln!();
}

fn run_decode(args: &Args, decode_args: &DecodeArgs, config: DecoderConfig) -> Result<()> {
    let config = decode_args.apply(config);
    let (path, lines) = read_dataset(args, &config)?;
    let report = decode_lines(lines, &config)
        .with_context(|| format!("decoding {}", path.display()))?;

    let json = if decode_args.report {
        to_json(&report)?
    } else {
        to_json(&report.records)?
    };

    match &decode_args.output {
        Some(output) => {
            std::fs::write(output, json)
                .with_context(|| format!("writing {}", output.display()))?;
            info!(path = %output.display(), "Wrote decoded records");
        }
        None => write_stdout(&json)?,
    }
    Ok(())
}

fn run_rows(args: &Args, rows_args: &RowsArgs, config: &DecoderConfig) -> Result<()> {
    let (_, lines) = read_dataset(args, config)?;

    if let [tag] = rows_args.tags.as_slice() {
        let mut out = String::new();
        for line in select_rows(&lines, &[*tag]) {
            out.push_str(&format!("line: {}\ndata: {}\n\n", line.line_number, line.text));
        }
        write_stdout(out.as_bytes())
    } else {
        let index = group_rows(&lines, &rows_args.tags);
        write_stdout(&to_json(&index)?)
    }
}

fn run_serve(serve_args: &ServeArgs, config: DecoderConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("creating async runtime")?;

    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&serve_args.addr)
            .await
            .with_context(|| format!("binding {}", serve_args.addr))?;
        info!(addr = %serve_args.addr, "Listening");

        axum::serve(listener, create_router(AppState::new(config)))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("serving HTTP")
    })
}

/// Serializes `value` as JSON with four-space indentation.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn write_stdout(bytes: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()?;
    Ok(())
}
