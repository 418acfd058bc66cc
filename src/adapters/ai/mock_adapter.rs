//! Mock AI adapter for offline use and tests.
//!
//! Returns canned responses without making API calls.

use crate::domain::DomainError;
use crate::ports::AiPort;
use std::time::Duration;
use tracing::info;

/// Mock AI adapter.
///
/// Simulates network latency with a configurable delay and answers based on
/// the kind of prompt it receives.
pub struct MockAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockAiAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

const DISCLAIMER: &str =
    "_I am an AI assistant; this is not a substitute for professional medical judgement._";

#[async_trait::async_trait]
impl AiPort for MockAiAdapter {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, DomainError> {
        info!(model, prompt_len = prompt.len(), "[MOCK] Simulating AI response");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let body = if prompt.contains("triage nurse") {
            "**Triage Level:** Yellow - Urgent\n\
             **Potential Diagnoses:**\n1. [MOCK] Condition A\n2. [MOCK] Condition B\n3. [MOCK] Condition C\n\
             **Next Steps:** Record vitals and notify the attending physician."
                .to_string()
        } else if prompt.contains("clinical pharmacist") {
            "**Severity:** Moderate\n\
             **Mechanism:** [MOCK] Overlapping metabolic pathway.\n\
             **Management:** Monitor the patient and review dosing."
                .to_string()
        } else {
            let line_count = prompt.lines().count();
            format!(
                "[MOCK] Simulated {} reply to a {}-line prompt. Configure MEDCORE_AI_API_KEY for live answers.",
                model, line_count
            )
        };

        Ok(format!("{}\n\n{}", body, DISCLAIMER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::seed;
    use crate::usecases::prompts;

    #[tokio::test]
    async fn test_mock_adapter_recognizes_triage() {
        let adapter = MockAiAdapter::with_delay(1);
        let prompt = prompts::triage(&seed::patients()[0], "fever");

        let reply = adapter.generate(&prompt, prompts::DEFAULT_MODEL).await.unwrap();

        assert!(reply.contains("Triage Level"));
        assert!(reply.ends_with(DISCLAIMER));
    }

    #[tokio::test]
    async fn test_mock_adapter_general() {
        let adapter = MockAiAdapter::with_delay(1);
        let reply = adapter.generate("hello", "gemini-3-pro-preview").await.unwrap();
        assert!(reply.contains("[MOCK]"));
        assert!(reply.contains("gemini-3-pro-preview"));
    }
}
