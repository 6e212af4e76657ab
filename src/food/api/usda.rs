use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{FoodSearch, NutritionDatabase};
use crate::error::{PipelineError, Service};
use crate::http::{fetch_json, Fetched};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FoodSearchPage {
    #[serde(default)]
    pub foods: Vec<FoodHit>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodHit {
    pub fdc_id: u64,
    pub description: Option<String>,
    pub brand_owner: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetail {
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FoodNutrient {
    #[serde(default)]
    pub nutrient: NutrientInfo,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutrientInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit_name: String,
}

/// FoodData Central client.
#[derive(Debug, Clone)]
pub struct UsdaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl UsdaClient {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NutritionDatabase for UsdaClient {
    async fn search(&self, search: &FoodSearch<'_>) -> Result<Fetched<FoodSearchPage>, PipelineError> {
        let url = format!("{}/foods/search", self.base_url);

        let mut params: Vec<(&str, String)> = vec![("query", search.query.to_string())];
        for data_type in search.data_types {
            params.push(("dataType", data_type.to_string()));
        }
        params.push(("pageSize", search.page_size.to_string()));
        params.push(("api_key", self.api_key.clone()));

        fetch_json(self.client.get(&url).query(&params), Service::Nutrition).await
    }

    async fn detail(&self, fdc_id: u64) -> Result<Fetched<FoodDetail>, PipelineError> {
        let url = format!("{}/food/{}", self.base_url, fdc_id);
        let request = self.client.get(&url).query(&[("api_key", self.api_key.as_str())]);
        fetch_json(request, Service::Nutrition).await
    }
}
