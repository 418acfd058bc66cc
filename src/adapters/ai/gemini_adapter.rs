//! Google Gemini adapter for the clinical assistant.
//!
//! Implements `AiPort` over the REST `generateContent` endpoint. One request per
//! prompt; no retries, no streaming.

use crate::domain::DomainError;
use crate::ports::AiPort;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Fallback text when the API answers without any candidate text.
pub const EMPTY_RESPONSE: &str = "No response generated.";

const TEMPERATURE: f32 = 0.4;
const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Gemini `generateContent` client.
pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiAdapter {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://generativelanguage.googleapis.com/v1beta"
    /// * `api_key` - Gemini API key; empty means every call fails with `MissingApiKey`
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn system_instruction() -> &'static str {
        r#"
You are MedCore AI, an advanced medical assistant for hospital staff.
Your goal is to assist doctors and nurses with:
1. Symptom Triage: Analyze symptoms and suggest a triage level (Green, Yellow, Red) and potential diagnoses.
2. Documentation: Help draft discharge summaries or clinical notes based on raw input.
3. Information: Provide quick references for drug interactions or medical guidelines.

DISCLAIMER: Always start or end strictly medical advice with a disclaimer that you are an AI and this is not a substitute for professional medical judgement.
Keep responses professional, concise, and structured (use lists or bold text for readability).
"#
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    fn build_request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(Self::system_instruction().to_string()),
                }],
            },
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: &GenerateResponse) -> Option<String> {
        let content = response.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[async_trait::async_trait]
impl AiPort for GeminiAdapter {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, DomainError> {
        if self.api_key.is_empty() {
            return Err(DomainError::MissingApiKey);
        }

        info!(model, prompt_len = prompt.len(), "sending prompt to Gemini");

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| DomainError::Ai(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Gemini API returned error");
            return Err(DomainError::Ai(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Ai(format!("Failed to parse API response: {}", e)))?;

        let text = Self::extract_text(&body).unwrap_or_else(|| EMPTY_RESPONSE.to_string());
        debug!(model, reply_len = text.len(), "received Gemini response");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = GeminiAdapter::build_request("Hello");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert!(json["systemInstruction"].get("role").is_none());
        assert!(
            json["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("You are MedCore AI")
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1000);
        let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let adapter = GeminiAdapter::new("https://example.test/v1beta/".into(), "k".into());
        assert_eq!(
            adapter.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"**Triage:** "},{"text":"Red"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(
            GeminiAdapter::extract_text(&body).as_deref(),
            Some("**Triage:** Red")
        );
    }

    #[test]
    fn test_extract_text_empty() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(GeminiAdapter::extract_text(&body).is_none());
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let adapter = GeminiAdapter::new("http://127.0.0.1:9".into(), String::new());
        let err = adapter.generate("hi", "gemini-2.5-flash").await.unwrap_err();
        assert_eq!(err, DomainError::MissingApiKey);
    }
}
