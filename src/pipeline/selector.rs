use tracing::info;

use crate::error::PipelineError;
use crate::food::NutritionLookup;
use crate::medicine::LabelLookup;
use crate::records::CanonicalRecord;

/// Nutrition first; the label database is consulted only when nutrition has nothing.
#[derive(Clone)]
pub struct SourceSelector {
    nutrition: NutritionLookup,
    label: LabelLookup,
}

impl SourceSelector {
    pub fn new(nutrition: NutritionLookup, label: LabelLookup) -> Self {
        Self { nutrition, label }
    }

    pub async fn select(&self, title: &str) -> Result<Option<CanonicalRecord>, PipelineError> {
        if let Some(record) = self.nutrition.lookup(title).await? {
            info!(title, nutrients = record.nutrients.len(), "nutrition info found");
            return Ok(Some(CanonicalRecord::Nutrition(record)));
        }

        info!(title, "nutrition info not found, checking medicine database");
        let record = self.label.lookup(title).await?;
        if record.is_some() {
            info!(title, "medicine info found");
        }
        Ok(record.map(CanonicalRecord::Label))
    }
}
