//! Shared helpers for the learnpath-web integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use learnpath::invoker::{InvokeError, InvokeFuture, ModelInvoker};
use learnpath::{GeneratorConfig, PathGenerator};
use learnpath_web::{WebConfig, spawn_web};
use serde_json::{Value, json};

/// A model stand-in with a fixed reply, an optional delay, and a record of
/// every prompt it received.
#[derive(Clone)]
pub struct StubModel {
    reply: Result<String, InvokeError>,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl StubModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(err: InvokeError) -> Self {
        Self {
            reply: Err(err),
            ..Self::replying("")
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ModelInvoker for StubModel {
    fn invoke<'a>(&'a self, prompt: &'a str, _timeout: Duration) -> InvokeFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone()
        })
    }

    fn model_label(&self) -> &str {
        "stub"
    }
}

/// A model stand-in that panics mid-call.
pub struct PanickingModel;

impl ModelInvoker for PanickingModel {
    fn invoke<'a>(&'a self, _prompt: &'a str, _timeout: Duration) -> InvokeFuture<'a> {
        Box::pin(async move { panic!("model adapter bug") })
    }
}

/// Spawn the server on port 0 around `model` and return its base URL.
pub async fn spawn_test_server(
    model: impl ModelInvoker + 'static,
    config: GeneratorConfig,
) -> String {
    let generator = Arc::new(PathGenerator::new(model, config));
    let web = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        ..Default::default()
    };
    let addr = spawn_web(generator, web).await.unwrap();
    format!("http://{addr}")
}

pub async fn post_json(base: &str, body: &Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/generate-path"))
        .json(body)
        .send()
        .await
        .unwrap()
}

// ── Fixtures ─────────────────────────────────────────────────────────

fn hybrid_step(topic: &str, n: usize) -> Value {
    json!({
        "title": format!("{topic} step {n}"),
        "description": format!("What {topic} step {n} covers and why it matters."),
        "resources": {
            "primaryResource": {
                "title": format!("MDN: {topic} {n}"),
                "url": "https://developer.mozilla.org/en-US/docs/Web/CSS"
            },
            "alternatives": [
                {"platform": "YouTube", "query": format!("{topic} step {n} tutorial")},
                {"platform": "Google", "query": format!("{topic} step {n} guide")}
            ]
        }
    })
}

fn hybrid_phase(name: &str, steps: usize) -> Value {
    json!({
        "phaseName": name,
        "steps": (1..=steps).map(|n| hybrid_step(name, n)).collect::<Vec<_>>()
    })
}

/// A V2 document with `phases` phases of `steps` steps each.
pub fn hybrid_document(title: &str, phases: usize, steps: usize) -> Value {
    json!({
        "title": title,
        "phases": (1..=phases)
            .map(|p| hybrid_phase(&format!("Phase {p}"), steps))
            .collect::<Vec<_>>()
    })
}

/// A V1 document with `phases` phases of `steps` steps each.
pub fn plain_document(title: &str, phases: usize, steps: usize) -> Value {
    let phases: Vec<Value> = (1..=phases)
        .map(|p| {
            json!({
                "phaseName": format!("Phase {p}"),
                "steps": (1..=steps).map(|n| json!({
                    "title": format!("Step {n}"),
                    "description": "Read the reference.",
                    "resourceUrl": "https://www.postgresql.org/docs/current/"
                })).collect::<Vec<_>>()
            })
        })
        .collect();
    json!({"title": title, "phases": phases})
}

/// A V3 document with a core topic and `specializations` branches.
pub fn specialized_document(title: &str, specializations: usize, steps: usize) -> Value {
    json!({
        "title": title,
        "coreTopic": hybrid_phase("Fundamentals", steps),
        "specializations": (1..=specializations)
            .map(|s| hybrid_phase(&format!("Branch {s}"), steps))
            .collect::<Vec<_>>()
    })
}

/// Wrap a document the way models usually reply: in a tagged code fence.
pub fn fenced(doc: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(doc).unwrap())
}
