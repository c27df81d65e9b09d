//! OpenRouter chat-completions client.
//!
//! The only production [`ModelInvoker`]. Each generation is a single
//! user message; the reply's text content is handed back untouched.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::invoker::{InvokeError, InvokeFuture, ModelInvoker};

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for generation.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENROUTER_KEY";

// ── Configuration ──────────────────────────────────────────────────

/// Model client configuration. Built once at startup and moved into the
/// client; never read from the environment after that.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Maximum tokens in the reply. Default: `8192`.
    pub max_tokens: u32,
    /// Sampling temperature. Default: `0.4`.
    pub temperature: f32,
    /// Ask the API for a JSON object reply. Default: `true`.
    pub json_mode: bool,
    /// Chat completions endpoint. Default: [`OPENROUTER_URL`].
    pub endpoint: String,
    pub referer: String,
    pub title: String,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 8192,
            temperature: 0.4,
            json_mode: true,
            endpoint: OPENROUTER_URL.to_string(),
            referer: "https://github.com/learnpath".to_string(),
            title: "learnpath".to_string(),
        }
    }

    /// Read the credential from [`API_KEY_ENV`].
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| format!("Set {API_KEY_ENV} env var to your OpenRouter API key"))?;
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("json_mode", &self.json_mode)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body. Only the fields generation needs.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

/// JSON output mode.
#[derive(Serialize, Debug)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub fmt_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            fmt_type: "json_object".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Response types ─────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Token usage statistics.
#[derive(Deserialize, Debug, Clone)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Clean return type from [`OpenRouterClient::chat`].
#[derive(Debug)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the OpenRouter chat completions API.
pub struct OpenRouterClient {
    client: reqwest::Client,
    config: ModelConfig,
}

impl OpenRouterClient {
    /// Create a client that owns `config` for its whole lifetime.
    pub fn new(config: ModelConfig) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("learnpath/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Build the request body for a single generation prompt.
    pub fn request_for(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: self.config.json_mode.then(ResponseFormat::json_object),
        }
    }

    /// Send a chat completion request, giving up after `timeout`.
    pub async fn chat(
        &self,
        body: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatCompletion, InvokeError> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport(e, timeout))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| classify_transport(e, timeout))?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(InvokeError::Service {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: RawChatResponse = serde_json::from_str(&text)
            .map_err(|e| InvokeError::Protocol(format!("failed to parse response: {e}")))?;

        if let Some(err) = parsed.error {
            let code = err.code.map_or(String::new(), |c| format!(" ({c})"));
            return Err(InvokeError::Protocol(format!(
                "API error{code}: {}",
                err.message
            )));
        }

        if let Some(ref usage) = parsed.usage {
            debug!(
                "Token usage: prompt={}, completion={}, total={}",
                usage.prompt_tokens.unwrap_or(0),
                usage.completion_tokens.unwrap_or(0),
                usage.total_tokens.unwrap_or(0),
            );
        }

        let choice = parsed.choices.and_then(|c| c.into_iter().next());
        match choice {
            Some(c) => {
                debug!(
                    "LLM output: {} chars, finish_reason={}",
                    c.message.content.as_ref().map_or(0, |s| s.len()),
                    c.finish_reason.as_deref().unwrap_or("none"),
                );
                Ok(ChatCompletion {
                    content: c.message.content,
                    usage: parsed.usage,
                    finish_reason: c.finish_reason,
                })
            }
            None => {
                debug!("LLM output: empty (no choices)");
                Ok(ChatCompletion {
                    content: None,
                    usage: parsed.usage,
                    finish_reason: None,
                })
            }
        }
    }
}

impl ModelInvoker for OpenRouterClient {
    fn invoke<'a>(&'a self, prompt: &'a str, timeout: Duration) -> InvokeFuture<'a> {
        Box::pin(async move {
            let body = self.request_for(prompt);
            let completion = self.chat(&body, timeout).await?;
            Ok(completion.content.unwrap_or_default())
        })
    }

    fn model_label(&self) -> &str {
        &self.config.model
    }
}

fn classify_transport(err: reqwest::Error, timeout: Duration) -> InvokeError {
    if err.is_timeout() {
        InvokeError::Timeout(timeout)
    } else {
        InvokeError::Transport(err.to_string())
    }
}
