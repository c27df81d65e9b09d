//! Convenience re-exports for common `learnpath` types.
//!
//! ```ignore
//! use learnpath::prelude::*;
//! ```

// ── Pipeline ────────────────────────────────────────────────────────
pub use crate::pipeline::{GeneratorConfig, PathGenerator};
pub use crate::request::{LearningPathRequest, Level, RawPathRequest};

// ── Model access ────────────────────────────────────────────────────
pub use crate::client::{ModelConfig, OpenRouterClient};
pub use crate::invoker::{InvokeError, InvokeFuture, ModelInvoker};

// ── Documents and errors ────────────────────────────────────────────
pub use crate::document::{Document, Platform, SchemaVersion};
pub use crate::error::{ErrorCategory, PathError};
