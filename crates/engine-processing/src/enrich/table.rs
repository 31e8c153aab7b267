use super::PartLookup;
use crate::error::EnrichError;
use engine_config::report::enrichment::EnrichmentSummary;
use model::records::{enrichment::EnrichmentResult, mapped::fields};
use std::{fs, path::Path, thread, time::Duration};
use tracing::{debug, info};

pub const ENRICHMENT_COLUMNS: [&str; 6] = [
    "Enriched Part Name",
    "Enriched Description",
    "Enriched Warranty",
    "Enrichment Source URL",
    "Enrichment Confidence",
    "Enrichment Status",
];

/// Appends enrichment columns to every row of a normalized CSV.
///
/// Rows are looked up strictly one after another with `pause` between calls.
pub fn enrich_csv(
    input: &Path,
    output: &Path,
    lookup: &dyn PartLookup,
    pause: Duration,
) -> Result<EnrichmentSummary, EnrichError> {
    let mut reader = csv::Reader::from_path(input)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    let mut out_headers = headers.clone();
    for column in ENRICHMENT_COLUMNS {
        if !out_headers.iter().any(|h| h == column) {
            out_headers.push(column.to_string());
        }
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|err| EnrichError::io(parent, err))?;
    }
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&out_headers)?;

    let mut summary = EnrichmentSummary::with_total(records.len() as u64);
    for record in &records {
        let field = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
        };
        let part_number = Some(field(fields::PART_NUMBER))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| field(fields::PART_NUMBER_ORIGINAL));
        let manufacturer = field(fields::MANUFACTURER);

        let result = lookup.lookup(part_number, manufacturer);
        debug!("Part '{}': {}", part_number, result.status);
        summary.record(result.status);

        let mut row: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();
        for (column, value) in ENRICHMENT_COLUMNS.iter().zip(enrichment_cells(&result)) {
            match headers.iter().position(|h| h == *column) {
                Some(i) => row[i] = value,
                None => row.push(value),
            }
        }
        writer.write_record(&row)?;

        thread::sleep(pause);
    }

    writer.flush().map_err(|err| EnrichError::io(output, err))?;
    info!(
        "Enriched {} of {} rows into {}",
        summary.enriched,
        summary.rows_total,
        output.display()
    );
    Ok(summary)
}

fn enrichment_cells(result: &EnrichmentResult) -> [String; 6] {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    [
        text(&result.part_name),
        text(&result.description),
        text(&result.warranty),
        text(&result.source_url),
        result.confidence.to_string(),
        result.status.to_string(),
    ]
}
