//! OpenAI-compatible chat completions gateway.

use async_trait::async_trait;
use relay_application::{GatewayError, GenerateRequest, GenerateResponse, ModelGateway, TokenUsage};
use relay_domain::{ConversationTurn, Role, ThinkingDepth};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gateway speaking the `/chat/completions` protocol over HTTP
pub struct OpenAiCompatGateway {
    http_client: reqwest::Client,
    base_url: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl OpenAiCompatGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<&str>,
        max_tokens: u32,
    ) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| GatewayError::Other("invalid API key format".into()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_body<'a>(&self, request: &'a GenerateRequest) -> ChatCompletionBody<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &request.system_prompt,
            });
        }
        messages.extend(request.history.iter().map(history_message));
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        // reasoning models reject temperature and use max_completion_tokens
        let reasoning = is_reasoning_model(&request.model);
        ChatCompletionBody {
            model: &request.model,
            messages,
            temperature: (!reasoning).then_some(request.temperature),
            max_tokens: (!reasoning).then_some(self.max_tokens),
            max_completion_tokens: reasoning.then_some(self.max_tokens),
            reasoning_effort: if reasoning {
                request.thinking_depth.map(reasoning_effort)
            } else {
                None
            },
        }
    }
}

fn history_message(turn: &ConversationTurn) -> ChatMessage<'_> {
    ChatMessage {
        role: match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        },
        content: &turn.content,
    }
}

fn is_reasoning_model(model: &str) -> bool {
    ["o1", "o3", "o4", "gpt-5"]
        .iter()
        .any(|prefix| model.starts_with(prefix))
}

fn reasoning_effort(depth: ThinkingDepth) -> &'static str {
    match depth {
        ThinkingDepth::Minimal | ThinkingDepth::Low => "low",
        ThinkingDepth::Medium => "medium",
        ThinkingDepth::High | ThinkingDepth::Max => "high",
    }
}

#[async_trait]
impl ModelGateway for OpenAiCompatGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        let body = self.build_body(&request);
        debug!(model = %request.model, messages = body.messages.len(), "Sending chat completion");

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(request.model.clone()));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                detail
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("invalid response body: {e}")))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::RequestFailed("response had no choices".into()))?;

        let tokens_used = completion
            .usage
            .map(|u| TokenUsage {
                input: u.prompt_tokens,
                output: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(GenerateResponse {
            content: choice.message.content.unwrap_or_default(),
            tokens_used,
            finish_reason: choice.finish_reason,
        })
    }
}
