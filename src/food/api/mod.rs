pub mod usda;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::http::Fetched;

// Re-export common types
pub use usda::{FoodDetail, FoodHit, FoodNutrient, FoodSearchPage, NutrientInfo, UsdaClient};

/// Parameters of a nutrition-database text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodSearch<'a> {
    pub query: &'a str,
    pub data_types: &'a [&'a str],
    pub page_size: u32,
}

/// Two-step search-then-detail nutrition database.
#[async_trait]
pub trait NutritionDatabase: Send + Sync {
    async fn search(&self, search: &FoodSearch<'_>) -> Result<Fetched<FoodSearchPage>, PipelineError>;

    async fn detail(&self, fdc_id: u64) -> Result<Fetched<FoodDetail>, PipelineError>;
}
