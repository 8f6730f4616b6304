//! GeminiResponder - Direct REST API responder for Gemini.
//!
//! Each assistant gets its own chat context: the persona system instruction
//! plus the running list of user/model turns. Contexts are created lazily on
//! the first prompt to an assistant and live as long as the responder.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use botdesk_core::assistant::Assistant;
use botdesk_core::config::GeminiSettings;
use botdesk_core::error::Result;
use botdesk_core::responder::{Responder, ResponderError};
use botdesk_core::secret::SecretService;
use botdesk_core::DeskError;
use reqwest::{Client, StatusCode, header::HeaderValue};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::personas::system_instruction_for;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const USER_ROLE: &str = "user";
const MODEL_ROLE: &str = "model";

/// Conversation state the backend needs for one assistant.
#[derive(Debug, Clone)]
struct ChatContext {
    system_instruction: String,
    turns: Vec<Content>,
}

/// Responder that talks to the Gemini HTTP API.
pub struct GeminiResponder {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    contexts: Mutex<HashMap<String, ChatContext>>,
}

impl GeminiResponder {
    /// Creates a responder with the provided API key and settings.
    pub fn new(api_key: impl Into<String>, settings: &GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| DeskError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: settings.model.clone(),
            base_url: BASE_URL.to_string(),
            contexts: Mutex::new(HashMap::new()),
        })
    }

    /// Loads the API key from the secret service.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Config` when no Gemini key is configured.
    pub async fn from_secrets(
        secrets: &dyn SecretService,
        settings: &GeminiSettings,
    ) -> Result<Self> {
        let secret_config = secrets.load_secrets().await?;
        let gemini = secret_config.gemini.ok_or_else(|| {
            DeskError::config("Gemini API key not found (set GEMINI_API_KEY or secret.json)")
        })?;
        Self::new(gemini.api_key, settings)
    }

    /// Overrides the API base URL (e.g. for a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of recorded turns for an assistant (user and model).
    pub async fn turn_count(&self, assistant_id: &str) -> usize {
        let contexts = self.contexts.lock().await;
        contexts.get(assistant_id).map_or(0, |c| c.turns.len())
    }

    async fn build_request(&self, assistant: &Assistant, prompt: &str) -> GenerateContentRequest {
        let mut contexts = self.contexts.lock().await;
        let context = contexts
            .entry(assistant.id.clone())
            .or_insert_with(|| {
                tracing::debug!(assistant = %assistant.id, "creating chat context");
                ChatContext {
                    system_instruction: system_instruction_for(assistant),
                    turns: Vec::new(),
                }
            });

        let mut contents = context.turns.clone();
        contents.push(Content::text(USER_ROLE, prompt));

        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::text("system", &context.system_instruction)),
        }
    }

    async fn record_turn(&self, assistant_id: &str, prompt: &str, reply: &str) {
        let mut contexts = self.contexts.lock().await;
        if let Some(context) = contexts.get_mut(assistant_id) {
            context.turns.push(Content::text(USER_ROLE, prompt));
            context.turns.push(Content::text(MODEL_ROLE, reply));
        }
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> std::result::Result<String, ResponderError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                let is_retryable = err.is_connect() || err.is_timeout();
                // without_url keeps the API key out of the message
                ResponderError::Transport {
                    message: format!("Gemini API request failed: {}", err.without_url()),
                    is_retryable,
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| {
                ResponderError::Other(format!(
                    "Failed to parse Gemini response: {}",
                    err.without_url()
                ))
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    async fn respond(
        &self,
        assistant: &Assistant,
        prompt: &str,
    ) -> std::result::Result<String, ResponderError> {
        let request = self.build_request(assistant, prompt).await;
        tracing::debug!(
            assistant = %assistant.id,
            model = %self.model,
            turns = request.contents.len(),
            "sending Gemini request"
        );

        let reply = self.send_request(&request).await?;
        // Failed calls are not recorded, so a retry starts from the same context.
        self.record_turn(&assistant.id, prompt, &reply).await;
        Ok(reply)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(
    response: GenerateContentResponse,
) -> std::result::Result<String, ResponderError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(ResponderError::EmptyResponse)
}

fn map_http_error(
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> ResponderError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    ResponderError::Status {
        status_code: status.as_u16(),
        message,
        is_retryable,
        retry_after,
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not supported.
    value.parse::<u64>().ok().map(Duration::from_secs)
}
