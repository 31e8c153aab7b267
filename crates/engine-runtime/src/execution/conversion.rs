use super::RunContext;
use crate::error::RuntimeError;
use chrono::Utc;
use connectors::file::ingest::ingest_file;
use engine_config::{
    crosswalk::load_crosswalk,
    markup::profile::MarkupProfile,
    report::{consolidated::RunSummary, qa::QaReport},
    templates::TemplateType,
};
use engine_core::sink::{
    Sink,
    report::write_json_report,
    table::{ManualReviewSink, NormalizedCsvSink},
    workbook::TemplateWorkbookSink,
};
use engine_processing::transform::mapper::{LaborDefaults, RowMapper};
use model::records::{
    counters::MappingCounters,
    ingest::{AssetRef, IngestMode, ParserStage},
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the four artifacts of one conversion land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub normalized_csv: PathBuf,
    pub workbook: PathBuf,
    pub qa_json: PathBuf,
    pub manual_review_csv: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        OutputPaths {
            normalized_csv: PathBuf::from("out/converted/output.csv"),
            workbook: PathBuf::from("out/converted/output.xlsx"),
            qa_json: PathBuf::from("out/qa/run_report.json"),
            manual_review_csv: PathBuf::from("out/qa/manual_review.csv"),
        }
    }
}

impl OutputPaths {
    /// Batch layout: `<out>/converted/<key>.{csv,xlsx}` and `<out>/qa/<key>*`.
    pub fn for_customer(out_dir: &Path, customer_key: &str) -> Self {
        let converted = out_dir.join("converted");
        let qa = out_dir.join("qa");
        OutputPaths {
            normalized_csv: converted.join(format!("{customer_key}.csv")),
            workbook: converted.join(format!("{customer_key}.xlsx")),
            qa_json: qa.join(format!("{customer_key}.json")),
            manual_review_csv: qa.join(format!("{customer_key}_manual_review.csv")),
        }
    }
}

/// Inputs of one source-to-template conversion.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub template_type: TemplateType,
    pub markup_profile: PathBuf,
    pub outputs: OutputPaths,
    /// Replaces the registry's crosswalk for `template_type`.
    pub crosswalk: Option<PathBuf>,
    /// Replaces the registry's base workbook for `template_type`.
    pub template: Option<PathBuf>,
    pub labor: LaborDefaults,
}

impl ConversionRequest {
    pub fn new(
        source: impl Into<PathBuf>,
        template_type: TemplateType,
        markup_profile: impl Into<PathBuf>,
    ) -> Self {
        ConversionRequest {
            source: source.into(),
            template_type,
            markup_profile: markup_profile.into(),
            outputs: OutputPaths::default(),
            crosswalk: None,
            template: None,
            labor: LaborDefaults::default(),
        }
    }

    pub fn with_outputs(mut self, outputs: OutputPaths) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_crosswalk(mut self, crosswalk: Option<PathBuf>) -> Self {
        self.crosswalk = crosswalk;
        self
    }

    pub fn with_template(mut self, template: Option<PathBuf>) -> Self {
        self.template = template;
        self
    }

    pub fn with_labor(mut self, labor: LaborDefaults) -> Self {
        self.labor = labor;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub source: String,
    pub counters: MappingCounters,
    pub ingest_mode: IngestMode,
    pub parser_stage: ParserStage,
    pub errors: Vec<String>,
    pub asset_refs: Vec<AssetRef>,
    pub outputs: OutputPaths,
}

impl ConversionOutcome {
    pub fn run_summary(&self) -> RunSummary {
        RunSummary {
            source: self.source.clone(),
            summary: self.counters,
            ingest_mode: self.ingest_mode,
            errors: self.errors.clone(),
            qa_json: self.outputs.qa_json.display().to_string(),
        }
    }
}

/// Loads configuration, ingests, maps, then writes every artifact.
///
/// Configuration is loaded before the source is read so that operator errors
/// abort the run before any row is touched. A degraded or failed ingest still
/// produces all four artifacts.
pub fn run_conversion(
    request: &ConversionRequest,
    ctx: &RunContext,
) -> Result<ConversionOutcome, RuntimeError> {
    let crosswalk_path = request
        .crosswalk
        .clone()
        .unwrap_or_else(|| ctx.registry.crosswalk_path(request.template_type));
    let template_path = request
        .template
        .clone()
        .unwrap_or_else(|| ctx.registry.base_template_path(request.template_type));

    let crosswalk = load_crosswalk(&crosswalk_path)?;
    let markup = MarkupProfile::from_file(&request.markup_profile)?;

    info!(
        "Converting {} as {}",
        request.source.display(),
        request.template_type
    );
    let ingest = ingest_file(&request.source)?;
    if ingest.is_failed() {
        warn!(
            "No rows recovered from {} ({}): {}",
            request.source.display(),
            ingest.parser_stage,
            ingest.errors.join("; ")
        );
    }

    let mapped = RowMapper::new(&crosswalk, &markup, &ctx.tables)
        .with_labor_defaults(request.labor)
        .map_rows(&ingest.rows);

    let outputs = &request.outputs;
    NormalizedCsvSink::new(&outputs.normalized_csv).write(&mapped.rows)?;
    TemplateWorkbookSink::new(&template_path, &outputs.workbook, &crosswalk).write(&mapped.rows)?;
    ManualReviewSink::new(&outputs.manual_review_csv).write(&mapped.rows)?;

    let source_name = request
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.source.display().to_string());
    let report = QaReport::new(&source_name, &ingest, mapped.counters, Utc::now());
    write_json_report(&outputs.qa_json, &report)?;

    info!(
        "Conversion of {} finished: {}",
        source_name, report.summary_text
    );

    Ok(ConversionOutcome {
        source: request.source.display().to_string(),
        counters: mapped.counters,
        ingest_mode: ingest.mode,
        parser_stage: ingest.parser_stage,
        errors: ingest.errors,
        asset_refs: ingest.asset_refs,
        outputs: outputs.clone(),
    })
}
