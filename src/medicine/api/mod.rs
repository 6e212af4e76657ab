pub mod openfda;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::http::Fetched;

pub use openfda::{LabelEntry, LabelPage, OpenFdaClient};

/// Drug-label database searched by exact brand name.
#[async_trait]
pub trait LabelDatabase: Send + Sync {
    async fn search_brand(&self, brand_name: &str, limit: u32) -> Result<Fetched<LabelPage>, PipelineError>;
}
