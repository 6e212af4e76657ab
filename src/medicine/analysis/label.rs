use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::http::Fetched;
use crate::medicine::api::{LabelDatabase, LabelEntry};
use crate::records::{LabelRecord, NOT_AVAILABLE};

#[derive(Clone)]
pub struct LabelLookup {
    database: Arc<dyn LabelDatabase>,
}

/// First whitespace-delimited token, used for the single degraded retry.
pub fn simplified_term(brand_name: &str) -> Option<&str> {
    brand_name.split_whitespace().next()
}

impl LabelLookup {
    pub fn new(database: Arc<dyn LabelDatabase>) -> Self {
        Self { database }
    }

    /// Label for `brand_name`, retried exactly once on its first token.
    ///
    /// The record always carries `brand_name` as its brand, even when the retry matched.
    pub async fn lookup(&self, brand_name: &str) -> Result<Option<LabelRecord>, PipelineError> {
        let brand_name = brand_name.trim();
        if let Some(entry) = self.query(brand_name).await? {
            return Ok(Some(to_record(brand_name, entry)));
        }

        let Some(simplified) = simplified_term(brand_name) else {
            return Ok(None);
        };
        warn!(brand = brand_name, simplified, "retrying label lookup with simplified name");

        match self.query(simplified).await? {
            Some(entry) => Ok(Some(to_record(brand_name, entry))),
            None => {
                info!(brand = brand_name, "no label found");
                Ok(None)
            }
        }
    }

    async fn query(&self, term: &str) -> Result<Option<LabelEntry>, PipelineError> {
        match self.database.search_brand(term, 1).await? {
            Fetched::Found(page) => Ok(page.results.into_iter().next()),
            Fetched::Status(status) => {
                debug!(term, status, "label search returned non-success status");
                Ok(None)
            }
        }
    }
}

fn or_placeholder(field: Option<Vec<String>>) -> Vec<String> {
    field
        .filter(|values| !values.is_empty())
        .unwrap_or_else(|| vec![NOT_AVAILABLE.to_string()])
}

fn to_record(brand_name: &str, entry: LabelEntry) -> LabelRecord {
    LabelRecord {
        brand_queried: brand_name.to_string(),
        active_ingredients: or_placeholder(entry.active_ingredient),
        inactive_ingredients: or_placeholder(entry.inactive_ingredient),
        purpose: or_placeholder(entry.purpose),
        usage: or_placeholder(entry.indications_and_usage),
        warnings: or_placeholder(entry.warnings),
    }
}
