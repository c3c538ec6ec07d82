use anyhow::{Result, anyhow};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use super::{GenerativeClient, ImagePrompt, Message, Role};

/// A client that calls the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn text_request(text: &str) -> ApiRequest {
        ApiRequest {
            contents: vec![Content {
                role: Role::User.as_str(),
                parts: vec![Part::Text {
                    text: text.to_string(),
                }],
            }],
        }
    }

    fn image_request(prompt: &ImagePrompt) -> ApiRequest {
        ApiRequest {
            contents: vec![Content {
                role: Role::User.as_str(),
                parts: vec![
                    Part::Text {
                        text: prompt.instruction.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: prompt.mime_type.as_str(),
                            data: STANDARD.encode(&prompt.image_bytes),
                        },
                    },
                ],
            }],
        }
    }

    fn conversation_request(turns: &[Message]) -> ApiRequest {
        ApiRequest {
            contents: turns
                .iter()
                .map(|msg| Content {
                    role: msg.role.as_str(),
                    parts: vec![Part::Text {
                        text: msg.content.clone(),
                    }],
                })
                .collect(),
        }
    }

    /// Join the text parts of the first candidate. `None` when there is
    /// nothing to show.
    fn extract_text(response: &ApiResponse) -> Option<String> {
        let text: String = response
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() { None } else { Some(text) }
    }

    /// Error for a non-success HTTP status, carrying the response body.
    fn api_error(status: StatusCode, body: &str) -> anyhow::Error {
        anyhow!("Gemini API error ({}): {}", status, body)
    }

    async fn generate(&self, body: &ApiRequest) -> Result<Option<String>> {
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &text));
        }

        let api_resp: ApiResponse = resp.json().await?;

        if let Some(usage) = &api_resp.usage_metadata {
            tracing::debug!(
                input = usage.prompt_token_count,
                output = usage.candidates_token_count,
                "gemini token usage"
            );
        }

        Ok(Self::extract_text(&api_resp))
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn submit_text(&self, text: &str) -> Result<Option<String>> {
        self.generate(&Self::text_request(text)).await
    }

    async fn submit_image(&self, prompt: &ImagePrompt) -> Result<Option<String>> {
        self.generate(&Self::image_request(prompt)).await
    }

    async fn submit_conversation(&self, turns: &[Message]) -> Result<Option<String>> {
        self.generate(&Self::conversation_request(turns)).await
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}
