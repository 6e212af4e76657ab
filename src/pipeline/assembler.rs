use crate::records::{AnalysisOutcome, CanonicalRecord, PipelineResult, ProductIdentity};

/// Pure merge of the resolved pieces into the terminal result.
pub fn assemble(identity: &ProductIdentity, record: CanonicalRecord, analysis: AnalysisOutcome) -> PipelineResult {
    PipelineResult {
        product_title: identity.title.clone(),
        canonical_record_text: record.render(),
        record,
        analysis,
    }
}
