use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{ports::LLMClient, prompt::AnalysisEnvelope},
    common::{LLMConfig, entities::app_errors::CoreError},
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CoreError::CollaboratorUnavailable(format!("Failed to build LLM client: {}", e))
            })?;

        Ok(Self {
            api_key: config.gemini_api_key,
            model_name: config.gemini_model,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_request(envelope: AnalysisEnvelope) -> GeminiRequest {
        let mut parts = Vec::with_capacity(envelope.media.len() + 1);
        parts.push(Part::Text {
            text: envelope.instructions,
        });
        parts.extend(envelope.media.into_iter().map(|media| Part::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type,
                data: general_purpose::STANDARD.encode(&media.data),
            },
        }));

        GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::CollaboratorUnavailable(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::CollaboratorUnavailable(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode Gemini envelope: {}", e);
            CoreError::CollaboratorUnavailable(format!("Failed to decode LLM response: {}", e))
        })?;

        extract_text(gemini_response)
            .ok_or_else(|| CoreError::CollaboratorUnavailable("No response from LLM".to_string()))
    }
}

fn extract_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty())
}

impl LLMClient for GeminiLLMClient {
    async fn generate_content(&self, envelope: AnalysisEnvelope) -> Result<String, CoreError> {
        let request = Self::build_request(envelope);
        self.call_gemini_api(request).await
    }
}
