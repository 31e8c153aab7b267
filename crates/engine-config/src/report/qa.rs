use chrono::{DateTime, SecondsFormat, Utc};
use model::records::{
    counters::MappingCounters,
    ingest::{AssetRef, IngestMode, IngestResult, ParserStage},
};
use serde::Serialize;

/// Per-file outcome, derived from the ingest mode.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Processed,
    ProcessedFallback,
    Failed,
}

impl From<IngestMode> for FileStatus {
    fn from(mode: IngestMode) -> Self {
        match mode {
            IngestMode::Xlsx => FileStatus::Processed,
            IngestMode::Fallback => FileStatus::ProcessedFallback,
            IngestMode::FallbackFailed => FileStatus::Failed,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub file_name: String,
    pub status: FileStatus,
    pub rows_processed: u64,
    pub rows_incomplete: u64,
    pub error_message: Option<String>,
}

/// QA report for one conversion run. Written even when ingestion degraded.
#[derive(Serialize, Debug, Clone)]
pub struct QaReport {
    pub run_id: String,
    pub timestamp_utc: String,
    #[serde(flatten)]
    pub counters: MappingCounters,
    pub files_processed_standard: u64,
    pub files_processed_fallback: u64,
    pub files_failed: u64,
    pub rows_recovered_fallback: u64,
    pub rows_manual_review_fallback: u64,
    pub ingest_mode: IngestMode,
    pub parser_stage: ParserStage,
    pub summary_text: String,
    pub file_results: Vec<FileResult>,
    pub asset_refs: Vec<AssetRef>,
}

impl QaReport {
    pub fn new(
        source_file: &str,
        ingest: &IngestResult,
        counters: MappingCounters,
        at: DateTime<Utc>,
    ) -> Self {
        let mode = ingest.mode;
        let fallback = mode == IngestMode::Fallback;
        let error_message = if ingest.errors.is_empty() {
            None
        } else {
            Some(ingest.errors.join("; "))
        };

        QaReport {
            run_id: at.format("run-%Y%m%d%H%M%S").to_string(),
            timestamp_utc: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            counters,
            files_processed_standard: u64::from(mode == IngestMode::Xlsx),
            files_processed_fallback: u64::from(fallback),
            files_failed: u64::from(mode == IngestMode::FallbackFailed),
            rows_recovered_fallback: if fallback { counters.rows_total } else { 0 },
            rows_manual_review_fallback: if fallback {
                counters.rows_manual_review
            } else {
                0
            },
            ingest_mode: mode,
            parser_stage: ingest.parser_stage,
            summary_text: counters.summary_text(),
            file_results: vec![FileResult {
                file_name: source_file.to_string(),
                status: FileStatus::from(mode),
                rows_processed: counters.rows_processed,
                rows_incomplete: counters.rows_incomplete,
                error_message,
            }],
            asset_refs: ingest.asset_refs.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn fallback_run_counts_recovered_rows() {
        let ingest = IngestResult::new(
            Vec::new(),
            IngestMode::Fallback,
            ParserStage::Delimited(','),
            vec!["xlsx parsing skipped: not an OpenXML container".to_string()],
            vec![AssetRef {
                asset_type: "pdf".to_string(),
                asset_name_or_ref: "spec.pdf".to_string(),
            }],
        );
        let mut counters = MappingCounters::with_total(4);
        counters.record_processed();
        counters.record_processed();
        counters.record_manual_review();

        let report = QaReport::new("acme.csv", &ingest, counters, at());
        assert_eq!(report.run_id, "run-20240305140709");
        assert_eq!(report.files_processed_fallback, 1);
        assert_eq!(report.rows_recovered_fallback, 4);
        assert_eq!(report.rows_manual_review_fallback, 1);
        assert_eq!(report.file_results[0].status, FileStatus::ProcessedFallback);

        let json: Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows_total"], 4);
        assert_eq!(json["parser_stage"], "delim_\",\"");
        assert_eq!(json["ingest_mode"], "fallback");
        assert_eq!(json["summary_text"], "2 processed / 1 incomplete");
        assert_eq!(
            json["file_results"][0]["error_message"],
            "xlsx parsing skipped: not an OpenXML container"
        );
        assert_eq!(json["asset_refs"][0]["asset_type"], "pdf");
    }

    #[test]
    fn clean_workbook_run_has_null_error_message() {
        let ingest = IngestResult::new(
            Vec::new(),
            IngestMode::Xlsx,
            ParserStage::OpenXml,
            Vec::new(),
            Vec::new(),
        );
        let report = QaReport::new("acme.xlsx", &ingest, MappingCounters::default(), at());
        assert_eq!(report.files_processed_standard, 1);
        assert_eq!(report.rows_recovered_fallback, 0);

        let json: Value = serde_json::to_value(&report).unwrap();
        assert!(json["file_results"][0]["error_message"].is_null());
        assert_eq!(json["file_results"][0]["status"], "processed");
    }

    #[test]
    fn failed_ingest_is_a_failed_file() {
        let ingest = IngestResult::failed(ParserStage::Decode, vec!["fallback decode failed".into()], Vec::new());
        let report = QaReport::new("junk.bin", &ingest, MappingCounters::default(), at());
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.file_results[0].status, FileStatus::Failed);
    }
}
