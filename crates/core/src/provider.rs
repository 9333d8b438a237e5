use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{Result, SmashcutError},
    settings::Settings,
};

pub const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const MODELS_URL: &str = "https://openrouter.ai/api/v1/models";
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

const APP_REFERER: &str = "https://github.com/smashcut/smashcut-rs";
const APP_TITLE: &str = "SmashCut Video Analyzer";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    pub url_citation: Option<UrlCitation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlCitation {
    pub url: String,
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Pick the API key from settings, falling back to the environment.
pub fn resolve_api_key(settings: &Settings) -> Result<String> {
    if !settings.api_key.trim().is_empty() {
        return Ok(settings.api_key.trim().to_string());
    }
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(SmashcutError::MissingApiKey)
}

/// Map a non-success status to the matching error.
pub fn api_error(status: StatusCode, body: &serde_json::Value) -> SmashcutError {
    match status {
        StatusCode::UNAUTHORIZED => SmashcutError::InvalidApiKey,
        StatusCode::PAYMENT_REQUIRED => SmashcutError::InsufficientCredits,
        StatusCode::TOO_MANY_REQUESTS => SmashcutError::RateLimited,
        _ => SmashcutError::ApiFailed {
            status: status.as_u16(),
            message: body["error"]["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
        },
    }
}

#[derive(Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(resolve_api_key(settings)?))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    pub async fn chat(&self, body: &serde_json::Value) -> Result<ChatResponse> {
        info!(model = %body["model"], "sending chat completion request");
        let response = self
            .authorized(self.http.post(CHAT_COMPLETIONS_URL))
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(body)
            .send()
            .await?;

        Ok(checked(response).await?.json::<ChatResponse>().await?)
    }

    pub(crate) async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.authorized(self.http.get(url)).send().await?;
        Ok(checked(response).await?.json::<serde_json::Value>().await?)
    }
}

async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);
    Err(api_error(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_known_statuses() {
        let body = json!({});
        assert!(matches!(
            api_error(StatusCode::UNAUTHORIZED, &body),
            SmashcutError::InvalidApiKey
        ));
        assert!(matches!(
            api_error(StatusCode::PAYMENT_REQUIRED, &body),
            SmashcutError::InsufficientCredits
        ));
        assert!(matches!(
            api_error(StatusCode::TOO_MANY_REQUESTS, &body),
            SmashcutError::RateLimited
        ));
    }

    #[test]
    fn prefers_api_error_message() {
        let body = json!({"error": {"message": "model not found"}});
        let err = api_error(StatusCode::BAD_REQUEST, &body);
        assert_eq!(err.to_string(), "API request failed (400): model not found");
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = api_error(StatusCode::BAD_GATEWAY, &serde_json::Value::Null);
        assert_eq!(err.to_string(), "API request failed (502): Bad Gateway");
    }

    #[test]
    fn settings_key_wins_over_environment() {
        let settings = Settings {
            api_key: "  sk-from-settings ".to_string(),
            ..Settings::default()
        };
        assert_eq!(resolve_api_key(&settings).unwrap(), "sk-from-settings");
    }

    #[test]
    fn deserializes_chat_response_with_citations() {
        let raw = json!({
            "id": "gen-1",
            "model": "openai/gpt-4o",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "hi",
                    "annotations": [{
                        "type": "url_citation",
                        "url_citation": {"url": "https://a.example", "title": "A", "start_index": 0, "end_index": 2}
                    }]
                },
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });
        let response: ChatResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.choices[0].message.annotations.len(), 1);
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }
}
