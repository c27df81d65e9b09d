//! Learning-path generation on top of the
//! [OpenRouter](https://openrouter.ai/) chat completions API.
//!
//! `learnpath` turns a learner's goal (and optionally their level) into a
//! structured, phase-by-phase curriculum with links to free resources. The
//! model is asked for JSON in one of three document shapes; the reply is
//! cleaned, decoded and validated before anything reaches the caller.
//!
//! # Getting started
//!
//! ```ignore
//! use learnpath::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), String> {
//!     let client = OpenRouterClient::new(ModelConfig::from_env()?)?;
//!     let generator = PathGenerator::new(client, GeneratorConfig::default());
//!
//!     let request = RawPathRequest::new("Learn CSS").with_level("Beginner");
//!     match generator.generate(request).await {
//!         Ok(doc) => println!("{}", serde_json::to_string_pretty(&doc).unwrap()),
//!         Err(e) => eprintln!("{}: {}", e.category(), e.user_message()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Where to find things
//!
//! - **Run a request end to end:** [`PathGenerator`](pipeline::PathGenerator).
//! - **Talk to a model:** the [`ModelInvoker`](invoker::ModelInvoker) trait
//!   and its OpenRouter implementation,
//!   [`OpenRouterClient`](client::OpenRouterClient). Tests plug in their own
//!   invokers.
//! - **Document shapes:** [`SchemaVersion`](document::SchemaVersion) and the
//!   typed documents in [`document`]; [`validate`](document::validate) turns
//!   a decoded value into a [`Document`](document::Document).
//! - **Errors:** [`PathError`](error::PathError) and its
//!   [`ErrorCategory`](error::ErrorCategory), which carries the HTTP status
//!   and the message safe to show a user.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Request body, learner [`Level`](request::Level), guard |
//! | [`prompt`] | Prompt text for a request and schema version |
//! | [`invoker`] | Model seam: [`ModelInvoker`](invoker::ModelInvoker), [`InvokeError`](invoker::InvokeError) |
//! | [`client`] | OpenRouter chat completions client |
//! | [`normalize`] | Strips markdown code fences from a reply |
//! | [`decode`] | Reply text to JSON value |
//! | [`document`] | Schema versions, typed documents, validation |
//! | [`error`] | Error type and classification |
//! | [`pipeline`] | The request pipeline |

pub mod client;
pub mod decode;
pub mod document;
pub mod error;
pub mod ids;
pub mod invoker;
pub mod normalize;
pub mod pipeline;
pub mod prelude;
pub mod prompt;
pub mod request;

pub use client::{ModelConfig, OpenRouterClient};
pub use document::{Document, SchemaVersion};
pub use error::{ErrorCategory, PathError};
pub use pipeline::{GeneratorConfig, PathGenerator};
pub use request::{LearningPathRequest, Level, RawPathRequest};

// Re-export schemars for downstream crates.
pub use schemars;
