use super::{Sink, ensure_parent};
use crate::error::SinkError;
use engine_config::crosswalk::Crosswalk;
use model::{core::value::CellValue, records::mapped::MappedRow};
use rust_decimal::prelude::ToPrimitive;
use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};
use tracing::{debug, info, warn};
use umya_spreadsheet::Worksheet;

/// Rows scanned when looking for the template's header row.
pub const HEADER_SCAN_ROWS: usize = 60;

/// 1-based index of the row whose labels best cover `wanted`.
///
/// A row qualifies once it matches `max(1, min(3, wanted))` labels. The
/// strongest qualifying row wins, earliest on ties; row 1 when none qualify.
pub fn locate_header_row(rows: &[Vec<String>], wanted: &HashSet<String>) -> usize {
    let threshold = wanted.len().clamp(1, 3);
    let mut best: Option<(usize, usize)> = None;

    for (index, labels) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let overlap = labels
            .iter()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect::<HashSet<_>>()
            .intersection(wanted)
            .count();
        if overlap < threshold {
            continue;
        }
        if best.is_none_or(|(_, score)| overlap > score) {
            best = Some((index + 1, overlap));
        }
    }

    best.map(|(row, _)| row).unwrap_or(1)
}

fn sheet_labels(sheet: &Worksheet) -> Vec<Vec<String>> {
    let (max_col, max_row) = sheet.get_highest_column_and_row();
    let last = max_row.min(HEADER_SCAN_ROWS as u32);
    (1..=last)
        .map(|r| {
            (1..=max_col)
                .map(|c| {
                    sheet
                        .get_cell((c, r))
                        .map(|cell| cell.get_value().to_string())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

/// Populates a copy of a customer template. The template file itself is
/// never modified; the filled copy is written to `output`.
pub struct TemplateWorkbookSink<'a> {
    template: PathBuf,
    output: PathBuf,
    crosswalk: &'a Crosswalk,
}

impl<'a> TemplateWorkbookSink<'a> {
    pub fn new(
        template: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        crosswalk: &'a Crosswalk,
    ) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
            crosswalk,
        }
    }

    fn fill_sheet(&self, sheet: &mut Worksheet, rows: &[MappedRow]) -> usize {
        let name = sheet.get_name().to_string();
        let columns = self.crosswalk.columns_for_sheet(&name);
        let wanted: HashSet<String> = columns
            .iter()
            .map(|c| c.trim().to_lowercase())
            .collect();

        let labels = sheet_labels(sheet);
        let header_row = locate_header_row(&labels, &wanted);

        let mut positions: HashMap<String, u32> = HashMap::new();
        if let Some(header) = labels.get(header_row - 1) {
            for (i, label) in header.iter().enumerate() {
                let key = label.trim().to_lowercase();
                if !key.is_empty() {
                    positions.entry(key).or_insert(i as u32 + 1);
                }
            }
        }
        debug!("Sheet '{}' header at row {}", name, header_row);

        let mut written = 0;
        for (offset, row) in rows.iter().enumerate() {
            let target_row = (header_row + 1 + offset) as u32;
            for column in &columns {
                let Some(&col) = positions.get(&column.trim().to_lowercase()) else {
                    continue;
                };
                let value = match row.get_ci(column) {
                    Some(value) if !value.is_empty() => value,
                    _ => continue,
                };
                let cell = sheet.get_cell_mut((col, target_row));
                match value {
                    CellValue::Number(n) => match n.to_f64() {
                        Some(f) => cell.set_value_number(f),
                        None => cell.set_value(n.normalize().to_string()),
                    },
                    other => cell.set_value(other.to_string()),
                };
                written += 1;
            }
        }
        written
    }
}

impl Sink for TemplateWorkbookSink<'_> {
    fn write(&self, rows: &[MappedRow]) -> Result<(), SinkError> {
        let mut book = umya_spreadsheet::reader::xlsx::read(&self.template)
            .map_err(|err| SinkError::workbook(&self.template, err))?;

        for sheet_name in self.crosswalk.output_sheets() {
            let Some(sheet) = book
                .get_sheet_collection_mut()
                .iter_mut()
                .find(|s| s.get_name() == sheet_name)
            else {
                warn!(
                    "Template {} has no sheet '{}'; skipping",
                    self.template.display(),
                    sheet_name
                );
                continue;
            };
            let cells = self.fill_sheet(sheet, rows);
            debug!("Wrote {} cells to sheet '{}'", cells, sheet_name);
        }

        ensure_parent(&self.output)?;
        umya_spreadsheet::writer::xlsx::write(&book, &self.output)
            .map_err(|err| SinkError::workbook(&self.output, err))?;
        info!(
            "Populated template {} into {}",
            self.template.display(),
            self.output.display()
        );
        Ok(())
    }
}
