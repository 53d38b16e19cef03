//! Note generation through the Gemini REST API.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";

/// Base URL of the generative language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for a single generation request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Failure reported by a note generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("generation service returned HTTP {0}")]
    Status(u16),

    #[error("generation was blocked: {0}")]
    Blocked(String),

    #[error("generation returned no text")]
    Empty,
}

/// Service turning a prompt into generated text.
pub trait NoteGenerator {
    /// Generates a response for the prompt.
    ///
    /// # Errors
    ///
    /// Returns error when the service fails or produces no text
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

impl<G: NoteGenerator + ?Sized> NoteGenerator for &G {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        (**self).generate(prompt)
    }
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Model resource path, always prefixed with `models/`.
    pub fn model_path(&self) -> String {
        let model = self.model.trim().trim_start_matches('/');
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        }
    }

    fn base(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", self.base(), self.model_path())
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base())
    }
}

/// Model advertised by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    /// True when the model can be used with `generateContent`.
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response body of `generateContent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Blocked`] when the prompt or candidate was
    /// stopped by the service, [`GenerationError::Empty`] when no text came back
    pub fn into_text(self) -> Result<String, GenerationError> {
        let blocked = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(blocked.map_or(GenerationError::Empty, GenerationError::Blocked));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason {
            Some(reason) if reason != "STOP" => Err(GenerationError::Blocked(reason)),
            _ => Err(GenerationError::Empty),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

/// Blocking Gemini API client.
pub struct GeminiClient {
    agent: Agent,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a client using the platform TLS stack.
    pub fn new(config: GeminiConfig) -> Self {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        let agent = Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(config.timeout))
            .build()
            .into();

        Self { agent, config }
    }

    /// Lists models available to the configured API key.
    ///
    /// # Errors
    ///
    /// Returns error if a request fails or a page cannot be decoded
    pub fn list_models(&self) -> Result<Vec<ModelInfo>, GenerationError> {
        let url = self.config.models_url();
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .agent
                .get(&url)
                .header(API_KEY_HEADER, self.config.api_key.as_str());
            if let Some(token) = &page_token {
                request = request.query("pageToken", token);
            }

            let mut response = request.call().map_err(status_error)?;
            let page: ListModelsResponse =
                response.body_mut().read_json().map_err(status_error)?;

            models.extend(page.models);
            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = models.len(), "Listed models");
        Ok(models)
    }
}

impl NoteGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        info!(
            model = %self.config.model_path(),
            prompt_bytes = prompt.len(),
            "Requesting generation"
        );

        let mut response = self
            .agent
            .post(&self.config.generate_url())
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .send_json(&request)
            .map_err(status_error)?;

        let body: GenerateContentResponse =
            response.body_mut().read_json().map_err(status_error)?;
        let text = body.into_text()?;

        debug!(response_bytes = text.len(), "Generation complete");
        Ok(text)
    }
}

fn status_error(err: ureq::Error) -> GenerationError {
    match err {
        ureq::Error::StatusCode(code) => GenerationError::Status(code),
        other => GenerationError::Http(other),
    }
}
