//! Generate one learning path from the command line and print it as JSON.
//!
//! Reads the API key from the `OPENROUTER_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! learnpath --goal "Learn CSS" --level beginner
//!
//! # Plain (v1) document with a different model
//! learnpath --goal "Learn SQL" --schema-version v1 --model openai/gpt-4o-mini
//!
//! # Show pipeline logs
//! RUST_LOG=learnpath=debug learnpath --goal "Learn Rust"
//! ```

use std::process;
use std::time::Duration;

use clap::Parser;
use learnpath::client::DEFAULT_MODEL;
use learnpath::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Generate a learning path and print it as JSON.
///
/// Reads the API key from the OPENROUTER_KEY environment variable.
#[derive(Parser)]
#[command(name = "learnpath")]
struct Cli {
    /// What the learner wants to learn
    #[arg(long)]
    goal: String,

    /// Beginner, Intermediate or Advanced
    #[arg(long)]
    level: Option<String>,

    /// Document shape: v1 (plain), v2 (hybrid) or v3 (specialized)
    #[arg(long, env = "LEARNPATH_SCHEMA_VERSION", default_value = "v2")]
    schema_version: SchemaVersion,

    // ── Model ──────────────────────────────────────────────────
    /// Model to use
    #[arg(long, env = "LEARNPATH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Maximum tokens in the reply
    #[arg(long, default_value_t = 8192)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.4)]
    temperature: f32,

    /// Seconds to wait for the model before giving up
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

async fn run(cli: Cli) -> Result<String, String> {
    let model = ModelConfig::from_env()?
        .with_model(cli.model)
        .with_max_tokens(cli.max_tokens)
        .with_temperature(cli.temperature);
    let client = OpenRouterClient::new(model)?;

    let generator = PathGenerator::new(
        client,
        GeneratorConfig::default()
            .with_schema_version(cli.schema_version)
            .with_timeout(Duration::from_secs(cli.timeout_secs)),
    );

    let mut request = RawPathRequest::new(cli.goal);
    request.level = cli.level;

    let doc = generator
        .generate(request)
        .await
        .map_err(|e| format!("{}: {}", e.category(), e.user_message()))?;
    serde_json::to_string_pretty(&doc).map_err(|e| format!("failed to render document: {e}"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()).await {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
