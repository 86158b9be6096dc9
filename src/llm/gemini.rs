//! Google Gemini extraction backend.
//!
//! Calls `generateContent` with a constrained JSON response schema so the
//! model can only answer with an array of interaction records.

use crate::config::GeminiConfig;
use crate::errors::{AppError, Result};
use crate::llm::Extractor;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

const MODEL_DESCRIPTION: &str = "Google Gemini, constrained-JSON biomedical extraction";

pub struct GeminiExtractor {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiExtractor {
    pub fn new(config: GeminiConfig) -> Self {
        // failing to build a client here would lose the bounded timeout
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl Extractor for GeminiExtractor {
    async fn extract(&self, abstract_text: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, self.config.api_key
        );

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(abstract_text) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "candidateCount": 1,
                "thinkingConfig": { "thinkingBudget": 0 }
            }
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Extraction(format!("request failed: {e}")))?;

        let status = resp.status();
        let payload: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Extraction(format!("unreadable response: {e}")))?;

        if !status.is_success() {
            let message = payload["error"]["message"]
                .as_str()
                .unwrap_or("unknown API error");
            return Err(AppError::Extraction(format!("API error [{status}]: {message}")));
        }

        match response_text(&payload) {
            Some(text) => Ok(text),
            None => Err(AppError::Extraction("model returned no text".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn model_description(&self) -> &str {
        MODEL_DESCRIPTION
    }
}

/// Declared response schema: array of {plant, compound, effects[], part[]?}.
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "required": ["plant", "compound", "effects"],
            "properties": {
                "plant": { "type": "STRING" },
                "compound": { "type": "STRING" },
                "effects": { "type": "ARRAY", "items": { "type": "STRING" } },
                "part": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }
    })
}

fn build_prompt(abstract_text: &str) -> String {
    format!(
        r#"You are an expert biomedical text miner.
Analyze the following scientific abstract and extract structured information about plant-derived bioactive compounds.

For each relationship you find, output an object with the following fields:
- "plant": the plant species or genus mentioned.
- "compound": the bioactive chemical or molecule derived from the plant.
- "effects": an array of biological or pharmacological effects, mechanisms of action, or interactions mentioned (for example: "anti-inflammatory", "reduces oxidative stress", "activates CB1 receptor", "inhibits COX-2").
- "part": (optional) an array of plant parts mentioned (e.g., "root", "leaf", "seed").

Each item should describe a specific relationship between a plant, its compound, and one or more effects.

Return only valid JSON according to the schema.
Do not include any text outside the JSON.

Example input:
"Curcuma longa (turmeric) contains curcumin, which shows anti-inflammatory and antioxidant effects by inhibiting COX-2 and scavenging free radicals."

Example output:
[
  {{
    "plant": "Curcuma longa",
    "compound": "curcumin",
    "effects": ["anti-inflammatory", "antioxidant", "inhibits COX-2", "scavenges free radicals"],
    "part": []
  }}
]

Now process the following abstract:
{abstract_text}"#
    )
}

/// Pull the candidate text out of a generateContent response.
fn response_text(payload: &Value) -> Option<String> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_with_bounded_timeout_client() {
        let extractor = GeminiExtractor::new(GeminiConfig::default());
        assert_eq!(extractor.model_name(), "gemini-2.5-flash");
    }

    #[test]
    fn prompt_embeds_abstract() {
        let prompt = build_prompt("Salix alba bark contains salicin.");
        assert!(prompt.contains("Salix alba bark contains salicin."));
        assert!(prompt.contains("expert biomedical text miner"));
        // the format! escaping must leave real braces in the example output
        assert!(prompt.contains("\"plant\": \"Curcuma longa\""));
        assert!(prompt.contains("{\n    \"plant\""));
    }

    #[test]
    fn schema_requires_core_fields() {
        let schema = response_schema();
        assert_eq!(schema["type"], "ARRAY");
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert!(required.iter().any(|v| v == "effects"));
    }

    #[test]
    fn extracts_candidate_text() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"plant\":\"x\"}]" }] }
            }]
        });
        assert_eq!(response_text(&payload).as_deref(), Some("[{\"plant\":\"x\"}]"));
    }

    #[test]
    fn missing_or_blank_text_is_none() {
        assert!(response_text(&json!({ "candidates": [] })).is_none());
        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        });
        assert!(response_text(&blank).is_none());
    }
}
