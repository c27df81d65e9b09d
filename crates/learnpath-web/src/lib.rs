//! HTTP front end for `learnpath`.
//!
//! `learnpath-web` serves a single JSON endpoint, `POST /generate-path`,
//! plus an embedded entry page at `/` that calls it and renders the result.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use learnpath::prelude::*;
//! use learnpath_web::{WebConfig, spawn_web};
//!
//! let client = OpenRouterClient::new(ModelConfig::from_env()?)?;
//! let generator = Arc::new(PathGenerator::new(client, GeneratorConfig::default()));
//!
//! let addr = spawn_web(generator, WebConfig::default()).await?;
//! println!("Web UI: http://{addr}");
//! ```
//!
//! # Responses
//!
//! ```text
//! POST /generate-path {goal, level?, schemaVersion?}
//!   200  Document               x-schema-version: v1 | v2 | v3
//!   400  {"error": "..."}       request rejected before any model call
//!   500  {"error": "..."}       generic message; details only in the logs
//! ```

mod api;
mod server;

pub use api::{ApiError, AppState, BODY_INVALID, SCHEMA_VERSION_HEADER};
pub use server::build_router;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use learnpath::PathGenerator;
use tracing::{error, info};

/// Configuration for the web server.
pub struct WebConfig {
    /// Address to bind to. Default: `127.0.0.1:5000`.
    pub bind_addr: SocketAddr,
    /// Extra static assets served for paths no route matches.
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            static_dir: None,
        }
    }
}

/// Bind and spawn the web server on a Tokio task.
///
/// Returns the bound address, which differs from `config.bind_addr` when
/// binding to port 0. The server runs until the Tokio runtime shuts down.
pub async fn spawn_web(
    generator: Arc<PathGenerator>,
    config: WebConfig,
) -> io::Result<SocketAddr> {
    let router = build_router(generator, config.static_dir);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("web server stopped: {e}");
        }
    });

    Ok(addr)
}

/// Bind and serve in the foreground until the server fails.
pub async fn serve_web(generator: Arc<PathGenerator>, config: WebConfig) -> io::Result<()> {
    let router = build_router(generator, config.static_dir);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await
}
