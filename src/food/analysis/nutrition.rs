use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{PipelineError, Service};
use crate::food::api::{FoodSearch, NutritionDatabase};
use crate::http::Fetched;
use crate::records::{NutrientEntry, NutritionRecord, NOT_AVAILABLE};

/// Dataset categories with complete, lab-measured nutrient profiles.
pub const WELL_DOCUMENTED_DATA_TYPES: &[&str] = &["Foundation", "SR Legacy"];

#[derive(Clone)]
pub struct NutritionLookup {
    database: Arc<dyn NutritionDatabase>,
}

impl NutritionLookup {
    pub fn new(database: Arc<dyn NutritionDatabase>) -> Self {
        Self { database }
    }

    /// Top search hit for `title`, expanded with its nutrient detail.
    ///
    /// `Ok(None)` only when the search has no candidates; there is no retry or fuzzy matching.
    /// A non-success status from either request is an upstream failure.
    pub async fn lookup(&self, title: &str) -> Result<Option<NutritionRecord>, PipelineError> {
        let search = FoodSearch {
            query: title,
            data_types: WELL_DOCUMENTED_DATA_TYPES,
            page_size: 1,
        };

        let page = match self.database.search(&search).await? {
            Fetched::Found(page) => page,
            Fetched::Status(status) => {
                return Err(PipelineError::upstream(
                    Service::Nutrition,
                    format!("search returned status {}", status),
                ))
            }
        };

        let Some(hit) = page.foods.into_iter().next() else {
            info!(title, "no foods found");
            return Ok(None);
        };
        debug!(title, fdc_id = hit.fdc_id, "nutrition search matched");

        let detail = match self.database.detail(hit.fdc_id).await? {
            Fetched::Found(detail) => detail,
            Fetched::Status(status) => {
                return Err(PipelineError::upstream(
                    Service::Nutrition,
                    format!("detail for {} returned status {}", hit.fdc_id, status),
                ))
            }
        };

        let nutrients = detail
            .food_nutrients
            .into_iter()
            .filter_map(|n| {
                n.amount.map(|amount| NutrientEntry {
                    name: n.nutrient.name,
                    amount,
                    unit: n.nutrient.unit_name,
                })
            })
            .collect();

        Ok(Some(NutritionRecord {
            title: hit.description.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            brand: hit.brand_owner.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            nutrients,
        }))
    }
}
