//! The generative-model capability the pipeline delegates to.
//!
//! [`ModelInvoker`] is the seam between the pipeline and whatever produces
//! text. [`OpenRouterClient`](crate::client::OpenRouterClient) is the
//! production implementation; tests plug in canned or failing invokers.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by [`ModelInvoker::invoke`].
pub type InvokeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, InvokeError>> + Send + 'a>>;

/// Ways a model call can fail before any text comes back.
///
/// An empty or nonsensical reply is *not* an invoke error: it is returned
/// as text and classified by the decoder and validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("model API HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// The service answered 2xx but the envelope was unusable.
    #[error("unexpected model API response: {0}")]
    Protocol(String),
}

/// Something that turns a prompt into raw model text.
///
/// Uses a boxed future so that the trait is dyn-compatible.
pub trait ModelInvoker: Send + Sync {
    /// Send `prompt` and return the model's raw text reply.
    ///
    /// Implementations should give up after `timeout`; the pipeline also
    /// bounds the call with the same deadline.
    fn invoke<'a>(&'a self, prompt: &'a str, timeout: Duration) -> InvokeFuture<'a>;

    /// Model identifier used in log lines.
    fn model_label(&self) -> &str {
        "unknown"
    }
}
