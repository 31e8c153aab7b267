use super::{
    decode::decode_text,
    delimited::DelimitedStrategy,
    fixed_width::FixedWidthStrategy,
    strategy::{Attempt, ParseStrategy, non_blank_lines},
};
use model::records::ingest::{AssetRef, IngestMode, IngestResult, ParserStage};
use tracing::{debug, info, warn};

/// Below this many rows the fixed-width strategy is also tried.
const FIXED_WIDTH_TRIGGER: usize = 2;

/// Degraded text extraction for bytes the workbook reader could not handle.
///
/// `errors` carries diagnostics from earlier stages and is extended, never
/// replaced. The result is `FallbackFailed` with no rows whenever nothing
/// usable comes out.
pub fn parse_fallback(
    raw: &[u8],
    source_file: &str,
    mut errors: Vec<String>,
    asset_refs: Vec<AssetRef>,
) -> IngestResult {
    let Some((text, encoding)) = decode_text(raw) else {
        warn!("Fallback decode failed for '{}'", source_file);
        errors.push("fallback decode failed".to_string());
        return IngestResult::failed(ParserStage::Decode, errors, asset_refs);
    };
    debug!("Decoded '{}' as {}", source_file, encoding);

    let lines = non_blank_lines(&text);
    if lines.is_empty() {
        warn!("'{}' has no non-blank lines", source_file);
        return IngestResult::failed(ParserStage::Empty, errors, asset_refs);
    }

    let mut best = DelimitedStrategy::candidates()
        .iter()
        .map(|strategy| {
            let attempt = strategy.attempt(&lines, source_file);
            debug!("Strategy {} produced {} rows", attempt.stage, attempt.row_count());
            attempt
        })
        .reduce(Attempt::better_of)
        .unwrap_or(Attempt {
            stage: ParserStage::NoRows,
            rows: Vec::new(),
        });

    if best.row_count() < FIXED_WIDTH_TRIGGER {
        let attempt = FixedWidthStrategy.attempt(&lines, source_file);
        debug!("Strategy {} produced {} rows", attempt.stage, attempt.row_count());
        best = best.better_of(attempt);
    }

    if best.row_count() == 0 {
        warn!("No fallback strategy recovered rows from '{}'", source_file);
        errors.push("fallback parser produced zero rows".to_string());
        return IngestResult::failed(ParserStage::NoRows, errors, asset_refs);
    }

    info!(
        "Recovered {} rows from '{}' with {}",
        best.row_count(),
        source_file,
        best.stage
    );
    IngestResult::new(best.rows, IngestMode::Fallback, best.stage, errors, asset_refs)
}
