use super::{
    RunContext,
    conversion::{ConversionRequest, OutputPaths, run_conversion},
};
use crate::error::RuntimeError;
use engine_config::{
    manifest::load_manifest, report::consolidated::ConsolidatedReport, templates::TemplateType,
};
use engine_core::sink::report::write_json_report;
use engine_processing::transform::mapper::LaborDefaults;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub manifest: PathBuf,
    pub markup_profile: PathBuf,
    pub out_dir: PathBuf,
    pub consolidated_qa: PathBuf,
    pub labor: LaborDefaults,
}

impl Default for BatchRequest {
    fn default() -> Self {
        BatchRequest {
            manifest: PathBuf::from("config/mappings/customer_manifest.csv"),
            markup_profile: PathBuf::from("config/markup/default_global_tiered_markup.json"),
            out_dir: PathBuf::from("out"),
            consolidated_qa: PathBuf::from("out/qa/consolidated.json"),
            labor: LaborDefaults::default(),
        }
    }
}

/// Converts every manifest row with a known output type, one after another,
/// and writes the consolidated report.
pub fn run_manifest(
    request: &BatchRequest,
    ctx: &RunContext,
) -> Result<ConsolidatedReport, RuntimeError> {
    let manifest = load_manifest(&request.manifest)?;
    let mut runs = Vec::new();

    for (idx, row) in manifest.iter().enumerate() {
        let Ok(template_type) = row.output_type.parse::<TemplateType>() else {
            warn!(
                "Skipping {}: output type '{}' is not set or unknown",
                row.customer_name, row.output_type
            );
            continue;
        };

        info!(
            "Processing customer {}/{}: {}",
            idx + 1,
            manifest.len(),
            row.customer_name
        );
        let base_template = Some(row.base_template.trim())
            .filter(|t| !t.is_empty())
            .map(PathBuf::from);
        let conversion = ConversionRequest::new(
            &row.source_file,
            template_type,
            &request.markup_profile,
        )
        .with_outputs(OutputPaths::for_customer(&request.out_dir, &row.customer_key()))
        .with_template(base_template)
        .with_labor(request.labor);

        let outcome = run_conversion(&conversion, ctx)?;
        runs.push(outcome.run_summary());
    }

    let report = ConsolidatedReport::new(request.manifest.display().to_string(), runs);
    write_json_report(&request.consolidated_qa, &report)?;
    info!(
        "Batch finished: {} runs, {}",
        report.runs.len(),
        report.summary_text
    );
    Ok(report)
}
