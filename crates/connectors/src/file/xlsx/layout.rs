use super::grid::SheetGrid;
use model::{
    core::{labels::header_labels, value::CellValue},
    records::row::{RowValues, SourceRow},
};

/// Only the first rows of a sheet are searched for a header.
pub const HEADER_SCAN_ROWS: usize = 40;
/// A header row needs at least this many non-empty cells.
pub const HEADER_MIN_CELLS: usize = 3;
/// A lone cell with at most this many words is a section (family) marker.
pub const FAMILY_MARKER_MAX_WORDS: usize = 8;

/// 0-based index of the first row within the scan window with enough non-empty cells.
pub fn find_header_row(grid: &SheetGrid) -> Option<usize> {
    grid.rows()
        .iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| row.iter().filter(|c| !c.is_empty()).count() >= HEADER_MIN_CELLS)
}

/// Turns a flattened sheet into source rows.
///
/// Sheets without a header row yield nothing. Blank rows are dropped, and a
/// row holding a single short value becomes the running family context for
/// the rows after it instead of being emitted.
pub fn extract_rows(grid: &SheetGrid, source_file: &str, sheet_name: &str) -> Vec<SourceRow> {
    let Some(header_idx) = find_header_row(grid) else {
        return Vec::new();
    };

    let header_text: Vec<Option<String>> = (0..grid.width())
        .map(|col| grid.get(header_idx as u32, col).as_string())
        .collect();
    let headers = header_labels(header_text.iter().map(Option::as_deref));

    let mut family_context: Option<String> = None;
    let mut rows = Vec::new();

    for (idx, cells) in grid.rows().iter().enumerate().skip(header_idx + 1) {
        let padded = cells.iter().cloned().chain(std::iter::repeat(CellValue::Empty));
        let values = RowValues::zip(&headers, padded);
        let non_blank = values.non_blank();
        if non_blank.is_empty() {
            continue;
        }

        if let [marker] = non_blank.as_slice()
            && marker.split_whitespace().count() <= FAMILY_MARKER_MAX_WORDS
        {
            family_context = Some(marker.clone());
            continue;
        }

        rows.push(
            SourceRow::new(source_file, sheet_name, idx + 1, values)
                .with_family_context(family_context.clone()),
        );
    }

    rows
}
