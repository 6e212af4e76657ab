use anyhow::{anyhow, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs, Role,
    },
    Client,
};
use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;

#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
    chat_model: String,
    temperature: f32,
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn new(config: ProviderConfig) -> Result<Self> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.api_url.clone());
        let client = Client::with_config(openai_config);

        Ok(Self {
            client,
            chat_model: config.model().to_string(),
            temperature: config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.chat_model)
            .temperature(self.temperature)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage {
                    role: Role::User,
                    content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                    name: None,
                },
            )])
            .build()?;

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow!("No response content"))
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.chat_model.clone())
    }
}
