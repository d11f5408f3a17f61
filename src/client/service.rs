use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// One entry of the model listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Gemini API only; Vertex publisher models leave this empty.
    #[serde(default, rename = "supportedGenerationMethods")]
    pub supported_actions: Vec<String>,
}

impl ModelDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageInfo {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Result of a `generateContent` call.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Concatenated text parts of the first candidate; `None` when there are none or all are empty.
    pub text: Option<String>,
    pub finish_reason: Option<String>,
    pub model_version: Option<String>,
    pub usage: Option<UsageInfo>,
    pub raw: Value,
}

impl GenerateResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Parses a Gemini `generateContent` body:
    /// `{ candidates: [{ content: { parts: [{text}] }, finishReason }], usageMetadata, modelVersion }`.
    pub fn from_body(body: Value) -> Self {
        let text: String = body
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                    .collect()
            })
            .unwrap_or_default();

        let finish_reason = body
            .pointer("/candidates/0/finishReason")
            .and_then(|v| v.as_str())
            .map(String::from);

        let model_version = body
            .get("modelVersion")
            .and_then(|v| v.as_str())
            .map(String::from);

        let usage = body.get("usageMetadata").map(|u| UsageInfo {
            prompt_tokens: u["promptTokenCount"].as_u64().unwrap_or(0),
            completion_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0),
            total_tokens: u["totalTokenCount"].as_u64().unwrap_or(0),
        });

        Self {
            text: if text.is_empty() { None } else { Some(text) },
            finish_reason,
            model_version,
            usage,
            raw: body,
        }
    }
}

/// The two calls the probes make against the service.
#[async_trait]
pub trait ModelService: Send + Sync {
    /// Every model the service exposes, all pages drained.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>>;

    /// One text generation request.
    async fn generate_content(&self, model: &str, prompt: &str) -> Result<GenerateResponse>;
}
