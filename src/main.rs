//! YAVIQ CLI - optimize text and convert structured data through the YAVIQ service

use anyhow::{bail, Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use yaviq::{
    api::{DecodeRequest, EncodeRequest, OptimizeRequest},
    commands::{self, Operation},
    spinner::RequestSpinner,
    Config, EnvelopeClient, HttpTransport, Mode, Route,
};

#[derive(Parser)]
#[command(name = "yaviq")]
#[command(about = "Reduce LLM token usage with the YAVIQ optimization service")]
#[command(version)]
#[command(after_help = commands::render_help())]
struct Cli {
    /// Command to run (see the list below)
    command: Option<String>,

    /// API key
    #[arg(long)]
    key: Option<String>,

    /// Input text
    #[arg(long, conflicts_with = "input_file")]
    input: Option<String>,

    /// Read input from a file instead
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Optimization mode: safe|balanced|aggressive (or low|medium|high)
    #[arg(long)]
    mode: Option<String>,

    /// Input format hint: auto|text|json|yaml|csv
    #[arg(long)]
    format: Option<String>,

    /// Service base URL (default: YAVIQ_ENDPOINT, TOKENOPT_ENDPOINT, config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Verbosity level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; stdout carries only the JSON result
fn init_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "error" => "error",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(cli: Cli) -> Result<String> {
    let Some(command) = cli.command.as_deref() else {
        eprintln!("{}", Cli::command().render_help());
        bail!("Missing command");
    };
    let operation = Operation::from_name(command)?;

    let key = cli
        .key
        .filter(|k| !k.is_empty())
        .context("Missing required argument --key")?;
    let input = read_input(cli.input, cli.input_file).await?;

    // The CLI takes its key from --key only, so the file is read without env overrides.
    // It only supplies defaults, so a broken file is skipped rather than fatal.
    let config = Config::read_file_or_default(Config::default_path());
    let endpoint = config.cli_endpoint(cli.endpoint.as_deref(), |name| std::env::var(name).ok());
    let mode = Mode::normalize(cli.mode.as_deref().unwrap_or(&config.mode));
    let format = cli.format.unwrap_or_else(|| config.format.clone());

    let (route, body, message) = match operation {
        Operation::Optimize => (
            Route::Optimize,
            serde_json::to_value(OptimizeRequest {
                input,
                format,
                mode,
                model: None,
            })?,
            "Optimizing...",
        ),
        Operation::EncodeStructured => (
            Route::ConvertToToon,
            serde_json::to_value(EncodeRequest { input, format })?,
            "Encoding...",
        ),
        Operation::DecodeStructured => (
            Route::ConvertFromToon,
            serde_json::to_value(DecodeRequest { toon: input })?,
            "Decoding...",
        ),
    };
    debug!(command, %route, %endpoint, "Dispatching");

    let client = EnvelopeClient::new(HttpTransport::new());
    let mut spinner = RequestSpinner::new();
    spinner.start(message);
    let result = client.post(route, &body, &key, &endpoint).await;
    spinner.stop();

    let payload: Value = result?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

async fn read_input(input: Option<String>, input_file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = input.filter(|t| !t.is_empty()) {
        return Ok(text);
    }

    match input_file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => bail!("Missing --input or --input-file"),
    }
}
