use colored::Colorize;

use crate::error::PipelineError;
use crate::pipeline::assessment::leading_score;
use crate::pipeline::Pipeline;
use crate::records::{AnalysisOutcome, PipelineResult, RecordKind};

/// Runs one lookup and prints the report to stdout.
pub async fn handle_command(code: &str, pipeline: &Pipeline) -> Result<(), String> {
    let code = code.trim();
    if code.is_empty() {
        return Err("Please specify a product code to look up.".to_string());
    }

    println!("🔎 Looking up code: {}\n", code);
    match pipeline.run(code).await {
        Ok(result) => {
            println!("{}", render_report(&result));
            Ok(())
        }
        Err(PipelineError::NotFound(lookup)) => Err(format!(
            "❌ No {} found for code {}. Check the barcode or try another product.",
            lookup, code
        )),
        Err(e) => Err(format!("Lookup failed: {}", e)),
    }
}

pub fn render_report(result: &PipelineResult) -> String {
    let heading = match result.record.kind() {
        RecordKind::Food => "📊 Nutrition Info",
        RecordKind::Medicine => "🩺 Medicine Info",
    };

    let mut report = format!(
        "{} {}\n\n{}:\n{}\n",
        "Product:".bold(),
        result.product_title,
        heading.bold(),
        result.canonical_record_text
    );

    match &result.analysis {
        AnalysisOutcome::Completed(analysis) => {
            let rating = match leading_score(&analysis.rating_text) {
                Some(score) if score >= 4.0 => analysis.rating_text.green(),
                Some(score) if score < 2.5 => analysis.rating_text.red(),
                _ => analysis.rating_text.yellow(),
            };
            report.push_str(&format!("\n{}\n{}\n", "Analysis:".bold(), analysis.assessment_text));
            report.push_str(&format!("\n{} {}\n", "Rating:".bold(), rating));
        }
        AnalysisOutcome::Failed { reason } => {
            report.push_str(&format!("\n{} {}\n", "⚠️ Analysis unavailable:".yellow(), reason));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AnalysisResult, CanonicalRecord, LabelRecord};

    fn result(analysis: AnalysisOutcome) -> PipelineResult {
        let record = CanonicalRecord::Label(LabelRecord {
            brand_queried: "TYLENOL".into(),
            active_ingredients: vec!["Acetaminophen".into()],
            inactive_ingredients: vec!["N/A".into()],
            purpose: vec!["Pain reliever".into()],
            usage: vec!["N/A".into()],
            warnings: vec!["N/A".into()],
        });
        PipelineResult {
            product_title: "TYLENOL".into(),
            canonical_record_text: record.render(),
            record,
            analysis,
        }
    }

    #[test]
    fn report_lists_record_and_analysis() {
        colored::control::set_override(false);
        let report = render_report(&result(AnalysisOutcome::Completed(AnalysisResult {
            assessment_text: "**Pros of TYLENOL**".into(),
            rating_text: "4 Safe".into(),
        })));

        assert!(report.starts_with("Product: TYLENOL"));
        assert!(report.contains("🩺 Medicine Info:\nBrand: TYLENOL"));
        assert!(report.contains("Rating: 4 Safe"));
    }

    #[test]
    fn report_flags_failed_analysis() {
        colored::control::set_override(false);
        let report = render_report(&result(AnalysisOutcome::Failed { reason: "timed out".into() }));
        assert!(report.contains("Analysis unavailable: timed out"));
        assert!(!report.contains("Rating:"));
    }
}
