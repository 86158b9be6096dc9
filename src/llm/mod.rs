//! Extraction client abstraction.
//!
//! An [`Extractor`] turns an article abstract into raw JSON text describing
//! plant-compound-effect relationships. The raw text is persisted verbatim as
//! provenance and separately parsed by [`parse_extractions`].

pub mod gemini;

pub use gemini::GeminiExtractor;

use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// One relationship record as produced by the extraction model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractedInteraction {
    pub plant: String,
    pub compound: String,
    pub effects: Vec<String>,
    #[serde(default)]
    pub part: Option<Vec<String>>,
}

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Run extraction over an abstract, returning the model's raw JSON text.
    ///
    /// A failed call or an empty response is an error; callers must be able
    /// to distinguish "nothing extracted" (`"[]"`) from "extraction failed".
    async fn extract(&self, abstract_text: &str) -> Result<String>;

    /// Name of the producing model, recorded on the provenance row.
    fn model_name(&self) -> &str;

    fn model_description(&self) -> &str;
}

/// Parse the raw model output into ordered extraction records.
pub fn parse_extractions(raw: &str) -> Result<Vec<ExtractedInteraction>> {
    serde_json::from_str(raw).map_err(|e| AppError::Parse(e.to_string()))
}

/// Canned-response extractor for tests and keyless local runs.
pub struct MockExtractor {
    response: String,
}

impl MockExtractor {
    pub fn new(response: impl Into<String>) -> Self {
        Self { response: response.into() }
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new("[]")
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, _abstract_text: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "mock-extractor"
    }

    fn model_description(&self) -> &str {
        "In-process mock returning a canned response"
    }
}
