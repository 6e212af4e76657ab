use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    api_url: String,
    client: Client,
    model: String,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiProvider {
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn new(config: ProviderConfig) -> Result<Self> {
        Ok(Self {
            model: config.model().to_string(),
            api_key: config.api_key,
            api_url: config.api_url,
            client: Client::new(),
            temperature: config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }],
                "generationConfig": { "temperature": self.temperature }
            }))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request: {}", e.without_url()))?;

        if !response.status().is_success() {
            return Err(anyhow!("Gemini API request failed with status: {}", response.status()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse response: {}", e.without_url()))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| anyhow!("Invalid response format"))
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }
}
