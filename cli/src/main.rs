use std::path::{Path, PathBuf};
use std::process::ExitCode;

use argschema_core::{ParseOutcome, render_failure, render_usage, tokenize};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::SchemaFile;

/// Exit code when the arguments under test fail validation.
const EXIT_INVALID_ARGS: u8 = 2;
/// Exit code for unreadable or malformed schema files.
const EXIT_CONFIG_ERROR: u8 = 1;

/// Output format for validated results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argschema")]
#[command(about = "Validate command-line arguments against a schema file")]
struct Cli {
    /// Log parser decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate arguments and print the resolved flags and positionals.
    Check(CheckArgs),
    /// Print the usage text of a schema.
    Usage(UsageArgs),
    /// Print the tokens of a command string as JSON.
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Schema file (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Command string to tokenize and validate instead of the trailing arguments.
    #[arg(long)]
    line: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to validate, given after `--`.
    #[arg(last = true, allow_hyphen_values = true, conflicts_with = "line")]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema file (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct TokenizeArgs {
    /// Command string to split.
    input: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::Usage(args) => run_usage(args),
        Command::Tokenize(args) => run_tokenize(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn load_schema_file(path: &Path) -> Result<SchemaFile, String> {
    let file = SchemaFile::load(path)
        .map_err(|err| format!("Failed to load schema '{}': {err}", path.display()))?;
    debug!(path = %path.display(), flags = file.flags.len(), "Loaded schema file");
    Ok(file)
}

fn run_check(args: CheckArgs) -> Result<ExitCode, String> {
    let file = load_schema_file(&args.schema)?;
    let schema = file.to_schema().map_err(|err| err.to_string())?;
    let program = file.program_or("program");

    let outcome = match &args.line {
        Some(line) => schema.parse_str(line),
        None => schema.parse_tokens(&args.args),
    };

    match outcome {
        Ok(ParseOutcome::Parsed(result)) => {
            let raw = match args.format {
                CliOutputFormat::Json => serde_json::to_string_pretty(&result)
                    .map_err(|e| format!("JSON serialization failed: {e}"))?,
                CliOutputFormat::Yaml => serde_yaml::to_string(&result)
                    .map_err(|e| format!("YAML serialization failed: {e}"))?,
            };
            println!("{}", raw.trim_end());
            Ok(ExitCode::SUCCESS)
        }
        Ok(ParseOutcome::HelpRequested) => {
            print!("{}", render_usage(&schema, program));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(error = ?err, "Argument validation failed");
            eprint!("{}", render_failure(&schema, program, &err));
            Ok(ExitCode::from(EXIT_INVALID_ARGS))
        }
    }
}

fn run_usage(args: UsageArgs) -> Result<ExitCode, String> {
    let file = load_schema_file(&args.schema)?;
    let schema = file.to_schema().map_err(|err| err.to_string())?;
    print!("{}", render_usage(&schema, file.program_or("program")));
    Ok(ExitCode::SUCCESS)
}

fn run_tokenize(args: TokenizeArgs) -> Result<ExitCode, String> {
    match tokenize(&args.input) {
        Ok(tokens) => {
            let raw = serde_json::to_string(&tokens)
                .map_err(|e| format!("JSON serialization failed: {e}"))?;
            println!("{raw}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::from(EXIT_INVALID_ARGS))
        }
    }
}
