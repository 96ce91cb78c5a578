use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use bgplens_core::{AnalysisOptions, AnomalyThresholds, Entry, InputFormat, analyze};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const STDIN_INPUT: &str = "-";

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("BGPLENS_BUILD_COMMIT"),
    "\nbuilt: ",
    env!("BGPLENS_BUILD_DATE"),
);

const EXAMPLES: &str = "Examples:\n  bgplens summary show-bgp.json -o entries.jsonl\n  bgplens summary 'captures/*.txt' --stdout --pretty\n  ssh switch 'show bgp all summary | json' | bgplens summary - --stdout --strict";

#[derive(Parser, Debug)]
#[command(name = "bgplens")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Normalizes `show bgp all summary` output and flags unhealthy BGP sessions.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Log filter (e.g. `debug`, `bgplens_core=trace`); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a BGP summary and write one JSON entry per VRF (JSON Lines).
    #[command(alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Input file, a glob matching exactly one file, or `-` for stdin
    input: PathBuf,

    /// Output path (JSON Lines)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write entries to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Input encoding
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Timestamp to stamp on every entry (RFC 3339); defaults to now
    #[arg(long, value_name = "RFC3339")]
    at: Option<String>,

    /// Percent of an address family's networks above which one peer is flagged
    #[arg(long, value_name = "PCT", default_value_t = 50.0)]
    dependency_threshold: f64,

    /// Pretty-print each entry
    #[arg(long)]
    pretty: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any anomaly is found
    #[arg(long)]
    strict: bool,

    /// List anomalies after analysis
    #[arg(long)]
    list_anomalies: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Auto,
    Json,
    Text,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Json => InputFormat::Json,
            FormatArg::Text => InputFormat::Text,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_tracing(cli.log_level.as_deref()).and_then(|()| match cli.command {
        Commands::Summary(args) => cmd_summary(args),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn init_tracing(level: Option<&str>) -> Result<(), CliError> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).map_err(|err| {
            CliError::new(
                format!("invalid log level '{}'", level),
                Some(format!("filter error: {}", err)),
            )
        })?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| CliError::new(format!("failed to install logger: {}", err), None))
}

fn cmd_summary(args: SummaryArgs) -> Result<(), CliError> {
    let at = resolve_timestamp(args.at.as_deref())?;
    let thresholds = resolve_thresholds(args.dependency_threshold)?;
    let options = AnalysisOptions {
        format: args.format.into(),
        thresholds,
    };

    let input = if args.input.as_os_str() == STDIN_INPUT {
        None
    } else {
        let resolved = resolve_input_path(&args.input)?;
        validate_input_file(&resolved)?;
        Some(resolved)
    };

    let output = if args.stdout {
        None
    } else {
        Some(args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?)
    };

    if let (Some(input), Some(output)) = (input.as_ref(), output.as_ref()) {
        ensure_distinct_paths(input, output)?;
    }

    let raw = read_input(input.as_deref())?;
    debug!(bytes = raw.len(), "input loaded");
    let entries = analyze(&raw, &options, at).map_err(|err| {
        CliError::new(
            format!("BGP summary analysis failed: {}", err),
            Some("pass --format json or --format text if detection picked wrong".to_string()),
        )
    })?;
    let lines = serialize_entries(&entries, args.pretty)?;

    match output {
        None => print!("{}", lines),
        Some(output) => {
            write_output(&output, &lines)?;
            if !args.quiet {
                eprintln!(
                    "OK: {} entries written -> {}",
                    entries.len(),
                    output.display()
                );
            }
        }
    }

    if args.list_anomalies && !args.quiet {
        print_anomalies(&entries);
    }
    if args.strict && has_anomalies(&entries) {
        return Err(CliError::new(
            "anomalies detected",
            Some("use --list-anomalies to inspect".to_string()),
        ));
    }
    Ok(())
}

fn resolve_timestamp(at: Option<&str>) -> Result<OffsetDateTime, CliError> {
    match at {
        None => Ok(OffsetDateTime::now_utc()),
        Some(text) => OffsetDateTime::parse(text, &Rfc3339).map_err(|err| {
            CliError::new(
                format!("invalid --at timestamp '{}'", text),
                Some(format!("expected RFC 3339, e.g. 2024-05-01T12:00:00Z ({})", err)),
            )
        }),
    }
}

fn resolve_thresholds(dependency_pct: f64) -> Result<AnomalyThresholds, CliError> {
    if !dependency_pct.is_finite() || !(0.0..=100.0).contains(&dependency_pct) {
        return Err(CliError::new(
            format!("invalid --dependency-threshold {}", dependency_pct),
            Some("use a percentage between 0 and 100".to_string()),
        ));
    }
    Ok(AnomalyThresholds {
        peer_dependency_pct: dependency_pct,
    })
}

fn read_input(input: Option<&Path>) -> Result<Vec<u8>, CliError> {
    match input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))
            .map_err(Into::into),
        None => {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read standard input")?;
            Ok(raw)
        }
    }
}

fn ensure_distinct_paths(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
        _ => fs::canonicalize(".").ok(),
    };
    let Some(output_dir) = output_dir else {
        // Parent does not exist yet, so it cannot be the input.
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn write_output(output: &Path, lines: &str) -> Result<(), CliError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(output, lines)
        .with_context(|| format!("Failed to write output: {}", output.display()))?;
    Ok(())
}

/// One entry per line, each line newline-terminated.
fn serialize_entries(entries: &[Entry], pretty: bool) -> Result<String, CliError> {
    let mut out = String::new();
    for entry in entries {
        let encoded = if pretty {
            serde_json::to_string_pretty(entry)
        } else {
            serde_json::to_string(entry)
        };
        let line = encoded.context("JSON serialization failed")?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn has_anomalies(entries: &[Entry]) -> bool {
    entries.iter().any(|entry| !entry.anomalies.is_empty())
}

fn print_anomalies(entries: &[Entry]) {
    eprintln!("Anomalies:");
    for entry in entries {
        for anomaly in &entry.anomalies {
            eprintln!("  {} {}", entry.message.vrf_name, anomaly);
        }
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a saved `show bgp all summary` output, or `-` for stdin".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a single file, or `-` for stdin".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single summary file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str("; matches: ");
        message.push_str(&listed);
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
