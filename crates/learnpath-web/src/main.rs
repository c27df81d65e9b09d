//! Learning-path web server.
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_KEY=sk-... cargo run -p learnpath-web
//! OPENROUTER_KEY=sk-... cargo run -p learnpath-web -- --model openai/gpt-4o-mini
//! OPENROUTER_KEY=sk-... cargo run -p learnpath-web -- --port 8080 --schema-version v3
//! ```
//!
//! Then open the printed URL in a browser, or:
//!
//! ```bash
//! curl -s localhost:5000/generate-path \
//!   -H 'content-type: application/json' \
//!   -d '{"goal": "Learn CSS", "level": "Beginner"}'
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use learnpath::client::DEFAULT_MODEL;
use learnpath::prelude::*;
use learnpath_web::{WebConfig, serve_web};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Learning-path web server.
///
/// Reads the API key from the OPENROUTER_KEY environment variable.
#[derive(Parser)]
#[command(about = "Serve the learning-path generator over HTTP")]
struct Args {
    /// LLM model to use.
    #[arg(long, env = "LEARNPATH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Address to bind to.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    bind: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Default document shape: v1 (plain), v2 (hybrid) or v3 (specialized).
    #[arg(long, env = "LEARNPATH_SCHEMA_VERSION", default_value = "v2")]
    schema_version: SchemaVersion,

    /// Seconds to wait for the model before giving up.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Maximum tokens in the model's reply.
    #[arg(long, default_value_t = 8192)]
    max_tokens: u32,

    /// Directory of extra static assets.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // The credential is checked before anything binds.
    let model = ModelConfig::from_env()?
        .with_model(args.model)
        .with_max_tokens(args.max_tokens);
    let client = OpenRouterClient::new(model)?;

    let generator = PathGenerator::new(
        client,
        GeneratorConfig::default()
            .with_schema_version(args.schema_version)
            .with_timeout(Duration::from_secs(args.timeout_secs)),
    );
    info!(
        "default schema {} ({}), timeout {}s",
        args.schema_version,
        args.schema_version.alias(),
        args.timeout_secs
    );

    let config = WebConfig {
        bind_addr: SocketAddr::new(args.bind, args.port),
        static_dir: args.static_dir,
    };
    serve_web(Arc::new(generator), config)
        .await
        .map_err(|e| format!("web server failed: {e}"))
}
