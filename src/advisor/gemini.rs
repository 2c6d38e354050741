/*!
 * Gemini Summarizer
 * HTTP client for the generateContent endpoint
 */

use super::{Summarizer, SummarizerError, SummarizerResult};
use crate::core::limits::{SUMMARIZER_MODEL, SUMMARIZER_TIMEOUT};
use crate::heap::HeapSnapshot;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Summarizer backed by the Gemini generateContent API
pub struct GeminiSummarizer {
    api_key: String,
    model: String,
}

impl GeminiSummarizer {
    /// Build a summarizer from the `GEMINI_API_KEY` (or legacy `API_KEY`)
    /// environment variable; `None` when neither is set
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty())
            .map(Self::new)
    }

    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: SUMMARIZER_MODEL.to_string(),
        }
    }

    /// Point the summarizer at a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_prompt(snapshot: &HeapSnapshot) -> String {
        let stats = &snapshot.stats;
        format!(
            "You are a system programming expert (like a senior C++ engineer).\n\
             Analyze the following heap memory state and provide a concise technical summary (max 3 sentences).\n\
             Focus on fragmentation, efficiency, and potential risks.\n\n\
             Heap Stats:\n\
             - Total Size: {}\n\
             - Used: {}\n\
             - Free: {}\n\
             - Fragmentation Index: {:.1}%\n\n\
             Memory Map (Address: Size [Allocated/Free]):\n{}",
            stats.total_size,
            stats.used_size,
            stats.free_size,
            stats.fragmentation * 100.0,
            snapshot.memory_map(),
        )
    }

    async fn request(&self, prompt: String) -> SummarizerResult {
        // Built per request so client construction failures surface as
        // recoverable summarizer errors, not startup failures
        let client = reqwest::Client::builder()
            .timeout(SUMMARIZER_TIMEOUT)
            .user_agent(concat!("memvis/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizerError::HttpStatus(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        debug!(model = %self.model, "summarizer response received");

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SummarizerError::EmptyResponse)
    }
}

impl Summarizer for GeminiSummarizer {
    fn summarize(
        &self,
        snapshot: HeapSnapshot,
    ) -> Pin<Box<dyn Future<Output = SummarizerResult> + Send + '_>> {
        let prompt = Self::build_prompt(&snapshot);
        Box::pin(self.request(prompt))
    }
}
