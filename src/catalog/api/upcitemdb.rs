use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::ProductCatalog;
use crate::error::{PipelineError, Service};
use crate::http::{fetch_json, Fetched};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogEnvelope {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogItem {
    #[serde(default)]
    pub title: String,
    pub brand: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpcItemDbClient {
    client: Client,
    api_url: String,
}

impl UpcItemDbClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl ProductCatalog for UpcItemDbClient {
    async fn lookup(&self, code: &str) -> Result<Fetched<CatalogEnvelope>, PipelineError> {
        let request = self.client.get(&self.api_url).query(&[("upc", code)]);
        fetch_json(request, Service::Catalog).await
    }
}
