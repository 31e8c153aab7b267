use model::records::{counters::MappingCounters, ingest::IngestMode};
use serde::Serialize;

/// Outcome of one conversion, as listed in a batch report.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: String,
    pub summary: MappingCounters,
    pub ingest_mode: IngestMode,
    pub errors: Vec<String>,
    pub qa_json: String,
}

/// Batch report over every manifest row that was converted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedReport {
    pub manifest: String,
    pub runs: Vec<RunSummary>,
    pub aggregate: MappingCounters,
    pub summary_text: String,
}

impl ConsolidatedReport {
    pub fn new(manifest: impl Into<String>, runs: Vec<RunSummary>) -> Self {
        let mut aggregate = MappingCounters::default();
        for run in &runs {
            aggregate.absorb(&run.summary);
        }

        ConsolidatedReport {
            manifest: manifest.into(),
            summary_text: aggregate.summary_text(),
            runs,
            aggregate,
        }
    }
}
