use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::LabelDatabase;
use crate::error::{PipelineError, Service};
use crate::http::{fetch_json, Fetched};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LabelPage {
    #[serde(default)]
    pub results: Vec<LabelEntry>,
}

/// One drug label. Every section is optional in the source data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LabelEntry {
    pub active_ingredient: Option<Vec<String>>,
    pub inactive_ingredient: Option<Vec<String>>,
    pub purpose: Option<Vec<String>>,
    pub indications_and_usage: Option<Vec<String>>,
    pub warnings: Option<Vec<String>>,
}

/// openFDA drug label endpoint client.
#[derive(Debug, Clone)]
pub struct OpenFdaClient {
    client: Client,
    api_url: String,
}

impl OpenFdaClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

/// Exact-phrase search expression on the brand name field.
pub fn brand_search_expression(brand_name: &str) -> String {
    format!("openfda.brand_name:\"{}\"", brand_name.replace('"', ""))
}

#[async_trait]
impl LabelDatabase for OpenFdaClient {
    async fn search_brand(&self, brand_name: &str, limit: u32) -> Result<Fetched<LabelPage>, PipelineError> {
        let request = self.client.get(&self.api_url).query(&[
            ("search", brand_search_expression(brand_name)),
            ("limit", limit.to_string()),
        ]);
        fetch_json(request, Service::Label).await
    }
}
