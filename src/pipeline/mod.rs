pub mod analysis;
pub mod assembler;
pub mod assessment;
pub mod prompts;
pub mod selector;

use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::catalog::api::UpcItemDbClient;
use crate::catalog::IdentityResolver;
use crate::config::{AppConfig, ConfigError};
use crate::error::{Lookup, PipelineError};
use crate::food::api::UsdaClient;
use crate::food::NutritionLookup;
use crate::http::build_client;
use crate::medicine::api::OpenFdaClient;
use crate::medicine::LabelLookup;
use crate::providers::traits::CompletionProvider;
use crate::records::{AnalysisOutcome, PipelineResult};

pub use analysis::AnalysisStage;
pub use assembler::assemble;
pub use selector::SourceSelector;

/// Where a run is. Runs only move forward; `Failed` is reachable from identity and source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    ResolvingIdentity,
    SelectingSource,
    AnalyzingSource,
    Assembled,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::ResolvingIdentity => "resolving_identity",
            PipelineStage::SelectingSource => "selecting_source",
            PipelineStage::AnalyzingSource => "analyzing_source",
            PipelineStage::Assembled => "assembled",
            PipelineStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Code → identity → (nutrition | label) record → analysis → result.
#[derive(Clone)]
pub struct Pipeline {
    resolver: IdentityResolver,
    selector: SourceSelector,
    analysis: AnalysisStage,
}

impl Pipeline {
    pub fn new(resolver: IdentityResolver, selector: SourceSelector, analysis: AnalysisStage) -> Self {
        Self {
            resolver,
            selector,
            analysis,
        }
    }

    /// Wires the production HTTP clients. All lookup services share one client bounded by `http_timeout`.
    pub fn from_config(config: &AppConfig, provider: Arc<dyn CompletionProvider>) -> Result<Self, ConfigError> {
        let client = build_client(config.http_timeout).map_err(|e| ConfigError::Client(e.to_string()))?;

        let catalog = UpcItemDbClient::new(client.clone(), config.upc_api_url.clone());
        let usda = UsdaClient::new(client.clone(), config.usda_api_key.clone(), config.usda_api_url.clone());
        let fda = OpenFdaClient::new(client, config.openfda_api_url.clone());

        Ok(Self::new(
            IdentityResolver::new(Arc::new(catalog)),
            SourceSelector::new(NutritionLookup::new(Arc::new(usda)), LabelLookup::new(Arc::new(fda))),
            AnalysisStage::new(provider, config.analysis_timeout),
        ))
    }

    /// One independent run for `code`.
    ///
    /// Identity and source failures end the run with an error. An analysis failure does not:
    /// the result keeps the resolved record and marks the analysis as failed.
    #[instrument(name = "pipeline", skip(self), fields(request_id = %Uuid::new_v4()))]
    pub async fn run(&self, code: &str) -> Result<PipelineResult, PipelineError> {
        let mut stage = PipelineStage::Start;

        advance(&mut stage, PipelineStage::ResolvingIdentity);
        let identity = match self.resolver.resolve(code).await {
            Ok(Some(identity)) => identity,
            Ok(None) => return Err(fail(&mut stage, PipelineError::NotFound(Lookup::Identity))),
            Err(e) => return Err(fail(&mut stage, e)),
        };

        advance(&mut stage, PipelineStage::SelectingSource);
        let record = match self.selector.select(&identity.title).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(fail(&mut stage, PipelineError::NotFound(Lookup::Source))),
            Err(e) => return Err(fail(&mut stage, e)),
        };

        advance(&mut stage, PipelineStage::AnalyzingSource);
        let analysis = match self.analysis.analyze(&record).await {
            Ok(result) => AnalysisOutcome::Completed(result),
            Err(e) => {
                warn!(error = %e, "analysis failed, returning record without it");
                AnalysisOutcome::Failed { reason: e.to_string() }
            }
        };

        let result = assemble(&identity, record, analysis);
        advance(&mut stage, PipelineStage::Assembled);
        Ok(result)
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    info!(from = %stage, to = %next, "pipeline stage");
    *stage = next;
}

fn fail(stage: &mut PipelineStage, error: PipelineError) -> PipelineError {
    warn!(stage = %stage, error = %error, "pipeline failed");
    *stage = PipelineStage::Failed;
    error
}
