//! One request, end to end.
//!
//! [`PathGenerator`] runs the full pipeline for a single request:
//!
//! ```text
//! guard ─▶ build_prompt ─▶ ModelInvoker ─▶ normalize ─▶ decode ─▶ validate ─▶ Document
//! ```
//!
//! The guard runs before the model is called, so an invalid request costs
//! nothing. The model is invoked exactly once; there is no retry. Every
//! failure is logged here with the request id and handed back as a
//! classified [`PathError`].

use std::time::{Duration, Instant};

use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::decode::decode;
use crate::document::{Document, SchemaVersion, validate};
use crate::error::PathError;
use crate::ids::RequestId;
use crate::invoker::ModelInvoker;
use crate::normalize::normalize;
use crate::prompt::build_prompt;
use crate::request::{LearningPathRequest, RawPathRequest};

/// Default deadline for the model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Characters of a bad reply shown in error logs. The full reply is logged
/// at debug level.
const REPLY_PREVIEW_CHARS: usize = 200;

/// Per-process pipeline settings.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Schema version used when a request does not pick one. Default: V2.
    pub schema_version: SchemaVersion,
    /// Deadline for the model call. Default: [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            schema_version: SchemaVersion::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorConfig {
    pub fn with_schema_version(mut self, version: SchemaVersion) -> Self {
        self.schema_version = version;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Turns learning-path requests into validated documents.
///
/// Holds no per-request state; share it behind an `Arc` to serve
/// concurrent requests.
pub struct PathGenerator {
    invoker: Box<dyn ModelInvoker>,
    config: GeneratorConfig,
}

impl PathGenerator {
    pub fn new(invoker: impl ModelInvoker + 'static, config: GeneratorConfig) -> Self {
        Self {
            invoker: Box::new(invoker),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Vet `raw` and, if it passes, generate a document for it.
    pub async fn generate(&self, raw: RawPathRequest) -> Result<Document, PathError> {
        let span = info_span!("generate", request_id = %RequestId::next());

        async move {
            let start = Instant::now();
            let result = match LearningPathRequest::from_raw(raw) {
                Ok(request) => self.run(&request).await,
                Err(err) => Err(err),
            };
            match &result {
                Ok(doc) => info!(
                    "generated {} path \"{}\" with {} phase(s) in {:.1}s",
                    doc.schema_version(),
                    doc.title(),
                    doc.phase_count(),
                    start.elapsed().as_secs_f64(),
                ),
                Err(err) => log_failure(err),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Generate a document for an already-vetted request.
    pub async fn run(&self, request: &LearningPathRequest) -> Result<Document, PathError> {
        let version = request
            .schema_version()
            .unwrap_or(self.config.schema_version);
        let prompt = build_prompt(request, version);
        let timeout = self.config.timeout;
        debug!(
            "invoking {} for a {version} path ({} byte prompt, timeout {:?})",
            self.invoker.model_label(),
            prompt.len(),
            timeout,
        );

        let reply = match tokio::time::timeout(timeout, self.invoker.invoke(&prompt, timeout)).await
        {
            Ok(reply) => reply?,
            Err(_) => return Err(PathError::UpstreamTimeout(timeout)),
        };

        let text = normalize(&reply);
        let value = decode(&text)?;
        let document = validate(value, version)?;

        if !document.within_bounds() {
            let bounds = version.bounds();
            warn!(
                "{version} path outside intended bounds: {} phase(s) (want {:?}), steps {:?} (want {:?})",
                document.phase_count(),
                bounds.phases,
                document.step_counts(),
                bounds.steps,
            );
        }
        Ok(document)
    }
}

fn log_failure(err: &PathError) {
    let category = err.category();
    match err {
        PathError::InvalidRequest(_) => info!(%category, "rejected: {err}"),
        PathError::MalformedResponse { raw, .. } => {
            let preview: String = raw.chars().take(REPLY_PREVIEW_CHARS).collect();
            let ellipsis = if raw.chars().count() > REPLY_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            error!(%category, "{err}; reply: {preview}{ellipsis}");
            debug!("full reply ({} bytes): {raw}", raw.len());
        }
        _ => error!(%category, "{err}"),
    }
}
