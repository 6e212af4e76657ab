use serde::Serialize;

/// Placeholder used wherever a source payload omits a field.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductIdentity {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientEntry {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionRecord {
    pub title: String,
    pub brand: String,
    /// Source order, entries without an amount already dropped.
    pub nutrients: Vec<NutrientEntry>,
}

impl NutritionRecord {
    pub fn render(&self) -> String {
        let mut output = format!(
            "Food Title: {}\nBrand: {}\n\n=== Nutritional Info (per 100g) ===\n",
            self.title, self.brand
        );
        for nutrient in &self.nutrients {
            output.push_str(&format!("{}: {} {}\n", nutrient.name, nutrient.amount, nutrient.unit));
        }
        output.trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    /// The title the lookup started from, even when a simplified term matched.
    pub brand_queried: String,
    pub active_ingredients: Vec<String>,
    pub inactive_ingredients: Vec<String>,
    pub purpose: Vec<String>,
    pub usage: Vec<String>,
    pub warnings: Vec<String>,
}

impl LabelRecord {
    pub fn render(&self) -> String {
        let lines = [
            format!("Brand: {}", self.brand_queried),
            format!("Active Ingredients: {}", self.active_ingredients.join(", ")),
            format!("Inactive Ingredients: {}", self.inactive_ingredients.join(", ")),
            format!("Purpose: {}", self.purpose.join("; ")),
            format!("Usage: {}", self.usage.join("; ")),
            format!("Warnings: {}", self.warnings.join("; ")),
        ];
        lines.join("\n").trim().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Food,
    Medicine,
}

/// The one record a pipeline run analyzes. Variants are rendered independently, never merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CanonicalRecord {
    Nutrition(NutritionRecord),
    Label(LabelRecord),
}

impl CanonicalRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            CanonicalRecord::Nutrition(_) => RecordKind::Food,
            CanonicalRecord::Label(_) => RecordKind::Medicine,
        }
    }

    pub fn render(&self) -> String {
        match self {
            CanonicalRecord::Nutrition(record) => record.render(),
            CanonicalRecord::Label(record) => record.render(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub assessment_text: String,
    pub rating_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Completed(AnalysisResult),
    Failed { reason: String },
}

impl AnalysisOutcome {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisOutcome::Completed(result) => Some(result),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineResult {
    pub product_title: String,
    pub record: CanonicalRecord,
    pub canonical_record_text: String,
    pub analysis: AnalysisOutcome,
}
