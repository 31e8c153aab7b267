use super::{grid::SheetGrid, layout::extract_rows};
use model::records::row::SourceRow;
use std::io::Cursor;
use tracing::{debug, info};

/// Rows and non-fatal diagnostics from a structured workbook parse.
#[derive(Debug, Default)]
pub struct WorkbookRows {
    pub rows: Vec<SourceRow>,
    pub errors: Vec<String>,
}

/// Zip local-file header that every OpenXML container starts with.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

pub fn looks_like_openxml(raw: &[u8]) -> bool {
    raw.starts_with(ZIP_SIGNATURE)
}

/// Parses every visible sheet of an OpenXML workbook.
///
/// Container-level failures are returned as `Err` with the reader's message
/// so the caller can fall back to text parsing.
pub fn read_workbook(raw: &[u8], source_file: &str) -> Result<WorkbookRows, String> {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(raw), true)
        .map_err(|err| err.to_string())?;

    let mut out = WorkbookRows::default();
    for sheet in book.get_sheet_collection() {
        let name = sheet.get_name().to_string();
        if !is_visible(sheet.get_sheet_state()) {
            debug!("Skipping hidden sheet '{}'", name);
            continue;
        }

        let (grid, merge_failures) = SheetGrid::from_worksheet(sheet);
        for failure in merge_failures {
            out.errors.push(format!("merge fill failed on {name}: {failure}"));
        }

        let rows = extract_rows(&grid, source_file, &name);
        info!("Sheet '{}' produced {} rows", name, rows.len());
        out.rows.extend(rows);
    }

    Ok(out)
}

fn is_visible(state: &str) -> bool {
    state.is_empty() || state.eq_ignore_ascii_case("visible")
}
