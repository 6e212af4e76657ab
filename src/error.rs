use std::fmt;
use thiserror::Error;

/// Which stage came back empty. Nutrition and label misses only surface as `Source`,
/// once both have been tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Identity,
    Source,
}

impl Lookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookup::Identity => "identity",
            Lookup::Source => "source",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External collaborator a request was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Catalog,
    Nutrition,
    Label,
    Generative,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Catalog => "catalog",
            Service::Nutrition => "nutrition database",
            Service::Label => "drug label database",
            Service::Generative => "generative text service",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0} not found")]
    NotFound(Lookup),
    #[error("{service} request failed: {reason}")]
    Upstream { service: Service, reason: String },
    #[error("analysis failed: {0}")]
    Analysis(String),
}

impl PipelineError {
    pub fn upstream(service: Service, reason: impl Into<String>) -> Self {
        PipelineError::Upstream {
            service,
            reason: reason.into(),
        }
    }

    /// Short machine-readable tag used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NotFound(_) => "not_found",
            PipelineError::Upstream { .. } => "upstream_failure",
            PipelineError::Analysis(_) => "analysis_failure",
        }
    }
}
