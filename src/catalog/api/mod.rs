pub mod upcitemdb;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::http::Fetched;

pub use upcitemdb::{CatalogEnvelope, CatalogItem, UpcItemDbClient};

/// Product-catalog lookup by barcode.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn lookup(&self, code: &str) -> Result<Fetched<CatalogEnvelope>, PipelineError>;
}
