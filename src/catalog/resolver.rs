use std::sync::Arc;

use tracing::{debug, info};

use super::api::ProductCatalog;
use crate::error::PipelineError;
use crate::http::Fetched;
use crate::records::ProductIdentity;

/// Envelope code the catalog uses for a successful lookup.
const CATALOG_OK: &str = "OK";

/// Maps a barcode to a product title. First match wins; no retries.
#[derive(Clone)]
pub struct IdentityResolver {
    catalog: Arc<dyn ProductCatalog>,
}

impl IdentityResolver {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// `Ok(None)` when the catalog has no usable match for `code`.
    pub async fn resolve(&self, code: &str) -> Result<Option<ProductIdentity>, PipelineError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let envelope = match self.catalog.lookup(code).await? {
            Fetched::Found(envelope) => envelope,
            Fetched::Status(status) => {
                debug!(code, status, "catalog returned non-success status");
                return Ok(None);
            }
        };

        if envelope.code != CATALOG_OK {
            debug!(code, envelope_code = %envelope.code, "catalog reported no match");
            return Ok(None);
        }

        let Some(item) = envelope.items.into_iter().next() else {
            debug!(code, "catalog returned no items");
            return Ok(None);
        };
        let title = item.title.trim();
        if title.is_empty() {
            return Ok(None);
        }

        info!(code, title, brand = item.brand.as_deref().unwrap_or("unknown"), "resolved product identity");
        Ok(Some(ProductIdentity {
            title: title.to_string(),
        }))
    }
}
