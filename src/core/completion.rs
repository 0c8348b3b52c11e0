//! The completion call: one blocking request/response per user turn.
//!
//! There is no streaming, no retry, and no timeout beyond what reqwest
//! applies by default.

use std::fmt;

use reqwest::StatusCode;
use tracing::debug;

use crate::api::{ChatMessage, ChatRequest, ChatResponse};
use crate::core::credentials::ApiKey;
use crate::utils::url::construct_api_url;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";

const MAX_DETAIL_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Failure of a single completion call. Every variant is recoverable: the
/// user may simply send another message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    Network(String),
    /// 401/403: the key was rejected.
    Unauthorized(String),
    /// 429: rate limit or quota exhausted.
    RateLimited(String),
    /// Any other non-success status.
    Api { status: u16, detail: String },
    /// A success status whose body could not be interpreted.
    Malformed(String),
}

impl CompletionError {
    pub fn is_auth(&self) -> bool {
        matches!(self, CompletionError::Unauthorized(_))
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Network(detail) => write!(f, "network error: {detail}"),
            CompletionError::Unauthorized(detail) => {
                write!(f, "invalid API key: {detail}")
            }
            CompletionError::RateLimited(detail) => {
                write!(f, "rate limit or quota exceeded: {detail}")
            }
            CompletionError::Api { status, detail } => {
                write!(f, "API request failed with status {status}: {detail}")
            }
            CompletionError::Malformed(detail) => write!(f, "malformed response: {detail}"),
        }
    }
}

impl std::error::Error for CompletionError {}

#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: CompletionRequest,
    ) -> Result<String, CompletionError>;
}

/// `chat/completions` over reqwest against Groq's OpenAI-compatible API.
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Resolve the API root: `GROQ_BASE_URL`, then the config value, then
    /// the public endpoint.
    pub fn resolve_base_url(config_base_url: Option<&str>) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| config_base_url.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl CompletionClient for GroqClient {
    async fn complete(
        &self,
        api_key: &ApiKey,
        request: CompletionRequest,
    ) -> Result<String, CompletionError> {
        let chat_url = construct_api_url(&self.base_url, "chat/completions");
        debug!(
            url = %chat_url,
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        let body = ChatRequest {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(chat_url)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| CompletionError::Network(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| CompletionError::Network(err.to_string()))?;
        debug!(status = status.as_u16(), bytes = text.len(), "completion response received");

        interpret_response(status, &text)
    }
}

/// Map an HTTP status and body onto the reply text or a [`CompletionError`].
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, CompletionError> {
    if !status.is_success() {
        let detail = extract_error_detail(body);
        return Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CompletionError::Unauthorized(detail)
            }
            StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(detail),
            other => CompletionError::Api {
                status: other.as_u16(),
                detail,
            },
        });
    }

    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|err| CompletionError::Malformed(format!("invalid JSON ({err})")))?;

    if let Some(usage) = &parsed.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "token usage"
        );
    }

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Malformed("response contained no choices".to_string()))?;

    if let Some(reason) = choice.finish_reason.as_deref() {
        debug!(finish_reason = reason, "completion finished");
    }

    choice
        .message
        .content
        .ok_or_else(|| CompletionError::Malformed("response contained no message content".to_string()))
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
}

/// One-line summary of an error body, suitable for inline display.
fn extract_error_detail(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty response body>".to_string();
    }

    let summary = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| extract_error_summary(&value))
        .unwrap_or_else(|| trimmed.to_string());

    let collapsed = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_DETAIL_CHARS {
        let truncated: String = collapsed.chars().take(MAX_DETAIL_CHARS).collect();
        format!("{truncated}…")
    } else {
        collapsed
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{CompletionClient, CompletionError, CompletionRequest};
    use crate::core::credentials::ApiKey;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned results in order and records every request.
    #[derive(Default)]
    pub struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, CompletionError>>>,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<CompletionRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait::async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            _api_key: &ApiKey,
            request: CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CompletionError::Network("no scripted reply".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_returns_first_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"},"finish_reason":"stop"}],"usage":{"prompt_tokens":3,"completion_tokens":2}}"#;
        assert_eq!(
            interpret_response(StatusCode::OK, body),
            Ok("Hi there".to_string())
        );
    }

    #[test]
    fn unauthorized_extracts_api_message() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = interpret_response(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert_eq!(err, CompletionError::Unauthorized("Invalid API Key".to_string()));
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "invalid API key: Invalid API Key");
    }

    #[test]
    fn rate_limits_are_classified() {
        let body = r#"{"error":{"message":"Rate limit reached for model"}}"#;
        let err = interpret_response(StatusCode::TOO_MANY_REQUESTS, body).unwrap_err();
        assert!(matches!(err, CompletionError::RateLimited(_)));
    }

    #[test]
    fn other_statuses_keep_code_and_plain_text() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, "upstream\n   unavailable").unwrap_err();
        assert_eq!(
            err,
            CompletionError::Api {
                status: 502,
                detail: "upstream unavailable".to_string()
            }
        );
    }

    #[test]
    fn empty_error_body_is_described() {
        let err = interpret_response(StatusCode::INTERNAL_SERVER_ERROR, "  ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "API request failed with status 500: <empty response body>"
        );
    }

    #[test]
    fn malformed_bodies_are_reported() {
        assert!(matches!(
            interpret_response(StatusCode::OK, "<html>oops</html>"),
            Err(CompletionError::Malformed(_))
        ));
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"choices":[]}"#),
            Err(CompletionError::Malformed(
                "response contained no choices".to_string()
            ))
        );
        assert_eq!(
            interpret_response(StatusCode::OK, r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(CompletionError::Malformed(
                "response contained no message content".to_string()
            ))
        );
    }

    #[test]
    fn long_details_are_truncated() {
        let body = "x".repeat(1_000);
        let err = interpret_response(StatusCode::BAD_REQUEST, &body).unwrap_err();
        match err {
            CompletionError::Api { detail, .. } => {
                assert_eq!(detail.chars().count(), MAX_DETAIL_CHARS + 1);
                assert!(detail.ends_with('…'));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_url_defaults_to_groq() {
        if std::env::var(BASE_URL_ENV).is_err() {
            assert_eq!(GroqClient::resolve_base_url(None), DEFAULT_BASE_URL);
            assert_eq!(
                GroqClient::resolve_base_url(Some("https://proxy.local/v1")),
                "https://proxy.local/v1"
            );
        }
    }
}
