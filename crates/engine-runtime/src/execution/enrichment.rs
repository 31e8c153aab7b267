use crate::error::RuntimeError;
use engine_config::report::enrichment::EnrichmentReport;
use engine_core::sink::report::write_json_report;
use engine_processing::enrich::{
    PartLookup,
    allowlist::DomainAllowlist,
    http::{DEFAULT_TIMEOUT, HttpPartLookup},
    table::enrich_csv,
};
use std::{path::PathBuf, time::Duration};
use tracing::info;

#[derive(Debug, Clone)]
pub struct EnrichmentRequest {
    pub input_csv: PathBuf,
    pub output_csv: PathBuf,
    pub qa_json: PathBuf,
    pub domains_config: PathBuf,
    /// Pause between consecutive lookups.
    pub pause: Duration,
}

impl EnrichmentRequest {
    pub fn new(input_csv: impl Into<PathBuf>) -> Self {
        EnrichmentRequest {
            input_csv: input_csv.into(),
            output_csv: PathBuf::from("out/enriched/enriched.csv"),
            qa_json: PathBuf::from("out/qa/enrichment.json"),
            domains_config: PathBuf::from("config/enrichment/manufacturer_domains.json"),
            pause: Duration::from_millis(100),
        }
    }
}

/// Enriches a normalized CSV over HTTP using the configured allow-list.
pub fn run_enrichment(request: &EnrichmentRequest) -> Result<EnrichmentReport, RuntimeError> {
    let allowlist = DomainAllowlist::load(&request.domains_config)?;
    let lookup = HttpPartLookup::new(allowlist, DEFAULT_TIMEOUT)?;
    run_enrichment_with(request, &lookup)
}

/// Same as [`run_enrichment`] with a caller-supplied lookup.
pub fn run_enrichment_with(
    request: &EnrichmentRequest,
    lookup: &dyn PartLookup,
) -> Result<EnrichmentReport, RuntimeError> {
    info!("Enriching {}", request.input_csv.display());
    let summary = enrich_csv(
        &request.input_csv,
        &request.output_csv,
        lookup,
        request.pause,
    )?;

    let report = EnrichmentReport {
        summary,
        domains_config: request.domains_config.display().to_string(),
    };
    write_json_report(&request.qa_json, &report)?;
    Ok(report)
}
