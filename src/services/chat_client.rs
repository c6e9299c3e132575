use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    core::responder::CompletionBackend,
    error::ChatError,
    types::{Credential, GenerationOptions},
};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/together/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat-completion endpoint.
///
/// Each call to [`ChatClient::chat_completion`] performs exactly one HTTP request.
#[derive(Clone, Debug)]
pub struct ChatClient {
    base_url: String,
    timeout: Duration,
}

impl Default for ChatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send `prompt` as the only user message and return the first choice's text
    pub async fn chat_completion(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        credential: &Credential,
    ) -> Result<String, ChatError> {
        let body = ChatCompletionRequest::new(
            options.model.clone(),
            vec![json!({ "role": "user", "content": prompt })],
        )
        .with_max_tokens(Some(options.max_tokens))
        .with_temperature(options.temperature)
        .into_value();

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| ChatError::NetworkError(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_chat_url(&self.base_url);
        debug!(
            target: "trip_planner::http",
            url = %request_url,
            model = %options.model,
            max_tokens = options.max_tokens,
            "sending chat completion request"
        );

        let exchange = async {
            let response = client
                .post(&request_url)
                .bearer_auth(credential.expose())
                .json(&body)
                .send()
                .await
                .map_err(|err| ChatError::NetworkError(format!("HTTP request failed: {err}")))?;

            let status = response.status();
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            let response_text = response
                .text()
                .await
                .map_err(|err| ChatError::NetworkError(format!("Failed to read response: {err}")))?;

            Ok::<_, ChatError>((status, retry_after, response_text))
        };

        let (status, retry_after, response_text) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                ChatError::NetworkError(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs_f64()
                ))
            })??;

        debug!(target: "trip_planner::http", status = status.as_u16(), "chat completion response received");

        if !status.is_success() {
            return Err(classify_status(status, retry_after, &response_text));
        }

        let response_json: Value = serde_json::from_str(&response_text)
            .map_err(|err| ChatError::MalformedResponse(format!("Failed to parse JSON: {err}")))?;

        extract_text(&response_json)
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        credential: &Credential,
    ) -> Result<String, ChatError> {
        self.chat_completion(prompt, options, credential).await
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

fn api_error_message(response_text: &str) -> String {
    serde_json::from_str::<Value>(response_text)
        .ok()
        .and_then(|json| {
            let error = json.get("error")?;
            error
                .get("message")
                .and_then(|value| value.as_str())
                .or_else(|| error.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| response_text.trim().to_string())
}

/// Map a non-success HTTP status onto the error taxonomy
pub(crate) fn classify_status(
    status: StatusCode,
    retry_after: Option<u64>,
    response_text: &str,
) -> ChatError {
    let message = api_error_message(response_text);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChatError::Unauthorized { message },
        StatusCode::TOO_MANY_REQUESTS => ChatError::RateLimited { retry_after },
        _ => ChatError::ModelUnavailable {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull `choices[0].message.content` out of a completion payload.
///
/// A non-null `error` object, a missing choice, or content that is absent or only
/// whitespace all count as malformed: the caller has no usable text to show.
pub(crate) fn extract_text(response: &Value) -> Result<String, ChatError> {
    if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
        let error_message = error
            .get("message")
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string());
        return Err(ChatError::MalformedResponse(format!(
            "API error in success response: {}",
            error_message
        )));
    }

    let first_choice = response
        .get("choices")
        .and_then(|value| value.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| {
            ChatError::MalformedResponse("Completion response contained no choices".to_string())
        })?;

    let content = first_choice
        .get("message")
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or_else(|| {
            ChatError::MalformedResponse(
                "Completion response missing assistant message content".to_string(),
            )
        })?;

    if content.trim().is_empty() {
        return Err(ChatError::MalformedResponse(
            "Completion response content was empty".to_string(),
        ));
    }

    Ok(content.to_string())
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}
