use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use crate::config::GeneratorConfig;
use crate::perf::PerfTimer;

/// Returned verbatim when no API key is configured.
pub const MISSING_KEY_MESSAGE: &str = "OPENAI_API_KEY is not set.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("model returned no text")]
    Empty,
}

/// Anything that turns a prompt into text.
pub trait TextBackend {
    fn name(&self) -> &str;
    fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Concatenate every `output_text` part of a Responses API payload.
fn output_text(body: &str) -> Result<String, GenerationError> {
    let parsed: ResponsesResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Decode(e.to_string()))?;

    let text: String = parsed
        .output
        .iter()
        .flat_map(|item| item.content.iter())
        .filter(|part| part.kind == "output_text")
        .map(|part| part.text.as_str())
        .collect();

    if text.trim().is_empty() {
        return Err(GenerationError::Empty);
    }
    Ok(text)
}

/// OpenAI-compatible Responses endpoint, one blocking POST, no retry.
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &GeneratorConfig, api_key: String) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Client(e.to_string()))?;

        Ok(OpenAiBackend {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

impl TextBackend for OpenAiBackend {
    fn name(&self) -> &str {
        &self.model
    }

    fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let _perf = PerfTimer::new("generation_call");
        let url = format!("{}/responses", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ResponsesRequest { model: &self.model, input: prompt })
            .send()
            .map_err(|e| GenerationError::Transport { url: url.clone(), message: e.to_string() })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| GenerationError::Transport { url: url.clone(), message: e.to_string() })?;

        if !status.is_success() {
            // keep the error body short, it is shown to the user
            let body: String = body.chars().take(300).collect();
            return Err(GenerationError::Status { status: status.as_u16(), body });
        }

        output_text(&body)
    }
}

pub fn build_prompt(difficulty: u32, topic: &str, context: &str, language: &str) -> String {
    format!(
        r#"You are a tutor generating spatial transcriptomics coding problems.
Difficulty: {difficulty}
Topic: {topic}
Context: {context}

Create one {language} coding problem (no solution), about 30 minutes difficulty.
"#
    )
}

/// Authors new problem statements. The call is best-effort: every outcome is a string.
pub struct ProblemGenerator {
    backend: Option<Box<dyn TextBackend>>,
    language: String,
    setup_error: Option<String>,
}

impl ProblemGenerator {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let language = config.language.clone();
        let Some(api_key) = config.api_key() else {
            tracing::debug!(env = %config.api_key_env, "No API key, generator disabled");
            return ProblemGenerator { backend: None, language, setup_error: None };
        };

        match OpenAiBackend::new(config, api_key) {
            Ok(backend) => ProblemGenerator::with_backend(Box::new(backend), language),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to set up generator backend");
                ProblemGenerator { backend: None, language, setup_error: Some(e.to_string()) }
            }
        }
    }

    pub fn with_backend<S: Into<String>>(backend: Box<dyn TextBackend>, language: S) -> Self {
        ProblemGenerator { backend: Some(backend), language: language.into(), setup_error: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    #[tracing::instrument(level = "info", skip(self, context), fields(backend = tracing::field::Empty))]
    pub fn generate(&self, difficulty: u32, topic: &str, context: &str) -> String {
        if let Some(ref reason) = self.setup_error {
            return format!("Problem generation failed: {}", reason);
        }
        let Some(ref backend) = self.backend else {
            return MISSING_KEY_MESSAGE.to_string();
        };
        tracing::Span::current().record("backend", backend.name());

        let prompt = build_prompt(difficulty, topic, context, &self.language);
        match backend.complete(&prompt) {
            Ok(text) => {
                tracing::info!(chars = text.len(), "Generated problem");
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "Problem generation failed");
                format!("Problem generation failed: {}", e)
            }
        }
    }
}
