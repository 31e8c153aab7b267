use super::{Sink, ensure_parent};
use crate::error::SinkError;
use model::records::mapped::{MappedRow, fields};
use std::path::{Path, PathBuf};
use tracing::info;

/// Header written when no row needs manual review.
const EMPTY_REVIEW_HEADER: [&str; 2] = [fields::STATUS, fields::STATUS_REASON];

/// Column union across rows, in first-seen order.
pub fn column_union<'a>(rows: impl IntoIterator<Item = &'a MappedRow>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for key in row.row.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

fn write_rows(path: &Path, rows: &[&MappedRow], columns: &[String]) -> Result<(), SinkError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    if !columns.is_empty() {
        writer.write_record(columns)?;
    }
    for row in rows {
        writer.write_record(
            columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }
    writer.flush().map_err(|err| SinkError::io(path, err))
}

/// Every mapped row, one column per field seen in any row.
pub struct NormalizedCsvSink {
    path: PathBuf,
}

impl NormalizedCsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for NormalizedCsvSink {
    fn write(&self, rows: &[MappedRow]) -> Result<(), SinkError> {
        let columns = column_union(rows);
        write_rows(&self.path, &rows.iter().collect::<Vec<_>>(), &columns)?;
        info!("Wrote {} normalized rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}

/// Only the rows that were not processed cleanly.
pub struct ManualReviewSink {
    path: PathBuf,
}

impl ManualReviewSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for ManualReviewSink {
    fn write(&self, rows: &[MappedRow]) -> Result<(), SinkError> {
        let review: Vec<&MappedRow> = rows.iter().filter(|r| !r.is_processed()).collect();
        let columns = if review.is_empty() {
            EMPTY_REVIEW_HEADER.iter().map(|c| c.to_string()).collect()
        } else {
            column_union(review.iter().copied())
        };
        write_rows(&self.path, &review, &columns)?;
        info!(
            "Wrote {} manual review rows to {}",
            review.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use model::{core::value::CellValue, records::mapped::RowStatus};
    use rust_decimal::Decimal;
    use std::fs;

    fn row(pairs: &[(&str, CellValue)], status: RowStatus, reason: &str) -> MappedRow {
        let mut map: IndexMap<String, CellValue> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        map.insert(fields::STATUS.into(), CellValue::text(status.to_string()));
        map.insert(fields::STATUS_REASON.into(), CellValue::text(reason));
        MappedRow {
            row: map,
            status,
            status_reason: reason.to_string(),
        }
    }

    #[test]
    fn normalized_columns_follow_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/normalized.csv");
        let rows = vec![
            row(
                &[
                    (fields::PART_NUMBER, "A-1".into()),
                    (fields::PART_COST, CellValue::Number(Decimal::new(150, 2))),
                    (fields::PART_PRICE, CellValue::Number(Decimal::new(300, 2))),
                ],
                RowStatus::Processed,
                "",
            ),
            row(
                &[(fields::PART_NUMBER, "B-2".into()), ("Vendor Code", "VC".into())],
                RowStatus::ManualReview,
                "warning_missing_cost",
            ),
        ];

        NormalizedCsvSink::new(&path).write(&rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Manufacturer Part Number,Part Cost,Part Price,Status,Status Reason,Vendor Code"
        );
        assert_eq!(lines[1], "A-1,1.5,3,processed,,");
        assert_eq!(lines[2], "B-2,,,manual_review,warning_missing_cost,VC");
    }

    #[test]
    fn manual_review_keeps_only_flagged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.csv");
        let rows = vec![
            row(&[(fields::PART_NUMBER, "A-1".into())], RowStatus::Processed, ""),
            row(
                &[(fields::PART_NUMBER, CellValue::Empty)],
                RowStatus::ManualReview,
                "missing_part_number",
            ),
        ];

        ManualReviewSink::new(&path).write(&rows).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], ",manual_review,missing_part_number");
    }

    #[test]
    fn empty_manual_review_is_a_bare_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.csv");
        let rows = vec![row(&[(fields::PART_NUMBER, "A-1".into())], RowStatus::Processed, "")];

        ManualReviewSink::new(&path).write(&rows).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Status,Status Reason\n");
    }

    #[test]
    fn no_rows_leaves_normalized_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("normalized.csv");

        NormalizedCsvSink::new(&path).write(&[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
