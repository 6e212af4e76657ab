use anyhow::Result;
use async_trait::async_trait;

use crate::config::ProviderConfig;

/// A generative-text backend: prompt in, completion out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn new(config: ProviderConfig) -> Result<Self>
    where
        Self: Sized;

    async fn complete(&self, prompt: &str) -> Result<String>;

    async fn get_model_info(&self) -> Result<String>;
}
