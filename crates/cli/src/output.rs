use engine_config::report::{consolidated::ConsolidatedReport, enrichment::EnrichmentReport};
use engine_runtime::execution::conversion::ConversionOutcome;
use model::records::ingest::IngestResult;

pub fn print_analysis(result: &IngestResult) {
    println!("ingest_mode={}", result.mode);
    println!("parser_stage={}", result.parser_stage);
    println!("rows_found={}", result.rows.len());
    println!("asset_refs={}", result.asset_refs.len());
    if !result.errors.is_empty() {
        println!("errors=");
        for err in &result.errors {
            println!("- {err}");
        }
    }
}

pub fn print_conversion(outcome: &ConversionOutcome) {
    let outputs = &outcome.outputs;
    println!("wrote_output_csv={}", outputs.normalized_csv.display());
    println!("wrote_output_workbook={}", outputs.workbook.display());
    println!("wrote_manual_review={}", outputs.manual_review_csv.display());
    println!("wrote_qa={}", outputs.qa_json.display());
    println!("summary={}", outcome.counters.summary_text());
}

pub fn print_batch(report: &ConsolidatedReport, path: &std::path::Path) {
    println!("wrote_consolidated_qa={}", path.display());
    println!("{}", report.summary_text);
}

pub fn print_enrichment(
    report: &EnrichmentReport,
    output_csv: &std::path::Path,
    qa_json: &std::path::Path,
) -> Result<(), serde_json::Error> {
    println!("wrote_enriched_csv={}", output_csv.display());
    println!("wrote_enrichment_qa={}", qa_json.display());
    println!("summary={}", serde_json::to_string(&report.summary)?);
    Ok(())
}
