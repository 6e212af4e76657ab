use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::prompts::{assessment_prompt, rating_prompt};
use crate::error::PipelineError;
use crate::providers::traits::CompletionProvider;
use crate::records::{AnalysisResult, CanonicalRecord};

/// Two independent generative calls over the record's text form: assessment and rating.
#[derive(Clone)]
pub struct AnalysisStage {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl AnalysisStage {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Issues both prompts concurrently. Either failing fails the whole analysis.
    /// Nothing is cached: every call reaches the provider.
    pub async fn analyze(&self, record: &CanonicalRecord) -> Result<AnalysisResult, PipelineError> {
        let text = record.render();
        let kind = record.kind();
        let assessment = assessment_prompt(kind, &text);
        let rating = rating_prompt(kind, &text);

        let (assessment_text, rating_text) =
            futures::try_join!(self.generate(&assessment), self.generate(&rating))?;

        Ok(AnalysisResult {
            assessment_text,
            rating_text,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        debug!(prompt_len = prompt.len(), "sending prompt");
        let completion = tokio::time::timeout(self.timeout, self.provider.complete(prompt))
            .await
            .map_err(|_| {
                PipelineError::Analysis(format!(
                    "generative call timed out after {}s",
                    self.timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| PipelineError::Analysis(e.to_string()))?;
        Ok(completion.trim().to_string())
    }
}
