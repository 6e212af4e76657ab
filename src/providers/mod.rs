pub mod gemini;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{ProviderConfig, ProviderKind};
use gemini::GeminiProvider;
use openai::OpenAIProvider;
use traits::CompletionProvider;

/// Constructs the backend selected by `config.kind`.
pub async fn build_provider(config: ProviderConfig) -> Result<Arc<dyn CompletionProvider>> {
    let provider: Arc<dyn CompletionProvider> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(config).await?),
        ProviderKind::OpenAI => Arc::new(OpenAIProvider::new(config).await?),
    };
    Ok(provider)
}
