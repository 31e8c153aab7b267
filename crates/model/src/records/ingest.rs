use crate::records::row::SourceRow;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// How the rows of an ingest attempt were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    Xlsx,
    Fallback,
    FallbackFailed,
}

impl fmt::Display for IngestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestMode::Xlsx => write!(f, "xlsx"),
            IngestMode::Fallback => write!(f, "fallback"),
            IngestMode::FallbackFailed => write!(f, "fallback_failed"),
        }
    }
}

/// Diagnostic label for the strategy that produced (or failed to produce) rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserStage {
    OpenXml,
    Delimited(char),
    FixedWidth,
    Decode,
    Empty,
    NoRows,
}

impl fmt::Display for ParserStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserStage::OpenXml => write!(f, "openxml"),
            ParserStage::Delimited(d) => write!(f, "delim_\"{}\"", d.escape_default()),
            ParserStage::FixedWidth => write!(f, "fixed_width"),
            ParserStage::Decode => write!(f, "decode"),
            ParserStage::Empty => write!(f, "empty"),
            ParserStage::NoRows => write!(f, "no_rows"),
        }
    }
}

impl Serialize for ParserStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Filename-like token recovered from raw bytes (image, pdf or document reference).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub asset_type: String,
    pub asset_name_or_ref: String,
}

/// Outcome of one ingestion attempt. Malformed input never raises; it is
/// described by `mode`, `parser_stage` and `errors`.
#[derive(Debug, Clone, Serialize)]
pub struct IngestResult {
    pub rows: Vec<SourceRow>,
    pub mode: IngestMode,
    pub parser_stage: ParserStage,
    pub errors: Vec<String>,
    pub asset_refs: Vec<AssetRef>,
}

impl IngestResult {
    pub fn new(
        rows: Vec<SourceRow>,
        mode: IngestMode,
        parser_stage: ParserStage,
        errors: Vec<String>,
        asset_refs: Vec<AssetRef>,
    ) -> Self {
        IngestResult {
            rows,
            mode,
            parser_stage,
            errors,
            asset_refs,
        }
    }

    /// Terminal failure: no rows, whatever was collected before is discarded.
    pub fn failed(parser_stage: ParserStage, errors: Vec<String>, asset_refs: Vec<AssetRef>) -> Self {
        IngestResult {
            rows: Vec::new(),
            mode: IngestMode::FallbackFailed,
            parser_stage,
            errors,
            asset_refs,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.mode == IngestMode::FallbackFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels() {
        assert_eq!(ParserStage::OpenXml.to_string(), "openxml");
        assert_eq!(ParserStage::Delimited(',').to_string(), "delim_\",\"");
        assert_eq!(ParserStage::Delimited('\t').to_string(), "delim_\"\\t\"");
        assert_eq!(ParserStage::NoRows.to_string(), "no_rows");
    }

    #[test]
    fn stage_serializes_as_label() {
        let json = serde_json::to_string(&ParserStage::Delimited('|')).unwrap();
        assert_eq!(json, "\"delim_\\\"|\\\"\"");
        let json = serde_json::to_string(&IngestMode::FallbackFailed).unwrap();
        assert_eq!(json, "\"fallback_failed\"");
    }

    #[test]
    fn failed_result_has_no_rows() {
        let result = IngestResult::failed(ParserStage::Empty, vec!["empty".into()], vec![]);
        assert!(result.rows.is_empty());
        assert!(result.is_failed());
    }
}
