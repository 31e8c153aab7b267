use super::{
    assets::scan_asset_refs,
    text::fallback::parse_fallback,
    xlsx::reader::{looks_like_openxml, read_workbook},
};
use crate::error::FileError;
use model::records::ingest::{IngestMode, IngestResult, ParserStage};
use std::path::Path;
use tracing::{info, warn};

/// Reads `path` once and ingests its bytes.
///
/// Only opening/reading the file can fail; malformed content is described by
/// the returned `IngestResult`.
pub fn ingest_file(path: &Path) -> Result<IngestResult, FileError> {
    let display = path.display().to_string();
    let raw = std::fs::read(path).map_err(|err| FileError::from_io(&display, err))?;

    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(display);

    Ok(ingest_bytes(&raw, &source_file))
}

/// Structured workbook parse first, then the text fallback cascade.
pub fn ingest_bytes(raw: &[u8], source_file: &str) -> IngestResult {
    let asset_refs = scan_asset_refs(raw);

    if !looks_like_openxml(raw) {
        let errors = vec!["xlsx parsing skipped: not an OpenXML container".to_string()];
        return parse_fallback(raw, source_file, errors, asset_refs);
    }

    match read_workbook(raw, source_file) {
        Ok(workbook) => {
            info!(
                "Parsed '{}' as a workbook: {} rows",
                source_file,
                workbook.rows.len()
            );
            IngestResult::new(
                workbook.rows,
                IngestMode::Xlsx,
                ParserStage::OpenXml,
                workbook.errors,
                asset_refs,
            )
        }
        Err(err) => {
            warn!("Workbook parse of '{}' failed: {}", source_file, err);
            let errors = vec![format!("xlsx parsing failed: {err}")];
            parse_fallback(raw, source_file, errors, asset_refs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::CellValue;
    use std::io::Write;

    fn xlsx_fixture() -> Vec<u8> {
        let mut book = umya_spreadsheet::new_file();
        {
            let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
            sheet.get_cell_mut("A1").set_value("Bryant Pricebook");
            for (col, label) in ["A", "B", "C"].iter().zip(["Model", "Description", "Cost"]) {
                sheet.get_cell_mut(format!("{col}3").as_str()).set_value(label);
            }
            sheet.get_cell_mut("A4").set_value("Gas Furnaces");
            sheet.get_cell_mut("A5").set_value("G100");
            sheet.get_cell_mut("B5").set_value("Furnace see spec_sheet.pdf");
            sheet.get_cell_mut("C5").set_value_number(900);
            sheet.get_cell_mut("A6").set_value("G200");
            sheet.get_cell_mut("C6").set_value_number(950.5);
            sheet.add_merge_cells("B5:B6");
        }
        {
            let hidden = book.new_sheet("Internal").unwrap();
            for (col, label) in ["A", "B", "C"].iter().zip(["Model", "Description", "Cost"]) {
                hidden.get_cell_mut(format!("{col}1").as_str()).set_value(label);
            }
            hidden.get_cell_mut("A2").set_value("SECRET");
            hidden.set_sheet_state("hidden".to_string());
        }

        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        umya_spreadsheet::writer::xlsx::write(&book, file.path()).unwrap();
        std::fs::read(file.path()).unwrap()
    }

    #[test]
    fn workbook_rows_carry_family_context_and_merges() {
        let result = ingest_bytes(&xlsx_fixture(), "bryant.xlsx");
        assert_eq!(result.mode, IngestMode::Xlsx);
        assert_eq!(result.parser_stage, ParserStage::OpenXml);
        assert_eq!(result.rows.len(), 2);

        let second = &result.rows[1];
        assert_eq!(second.source_sheet, "Sheet1");
        assert_eq!(second.source_row_number, 6);
        assert_eq!(second.family_context.as_deref(), Some("Gas Furnaces"));
        assert_eq!(
            second.values.get("Description"),
            Some(&CellValue::text("Furnace see spec_sheet.pdf"))
        );
        assert!(result.rows.iter().all(|r| r.source_sheet != "Internal"));
    }

    #[test]
    fn comma_text_file_uses_delimited_fallback() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"part number,description,cost\nABC-1,Coil,10\nABC-2,Pump,12\nABC-3,Fan,8\n")
            .unwrap();

        let result = ingest_file(file.path()).unwrap();
        assert_eq!(result.mode, IngestMode::Fallback);
        assert_eq!(result.parser_stage.to_string(), "delim_\",\"");
        assert_eq!(result.rows.len(), 3);
        assert_eq!(
            result.errors,
            vec!["xlsx parsing skipped: not an OpenXML container".to_string()]
        );
    }

    #[test]
    fn corrupt_container_falls_back_and_records_reason() {
        let result = ingest_bytes(b"PK\x03\x04\x00\x00garbage", "broken.xlsx");
        assert_eq!(result.mode, IngestMode::FallbackFailed);
        assert!(result.rows.is_empty());
        assert!(result.errors[0].starts_with("xlsx parsing failed:"));
    }

    #[test]
    fn unstructured_bytes_fail_but_keep_assets() {
        let result = ingest_bytes(b"see photo.JPG for details\n", "memo.txt");
        assert_eq!(result.mode, IngestMode::FallbackFailed);
        assert!(result.rows.is_empty());
        assert_eq!(result.asset_refs.len(), 1);
        assert_eq!(result.asset_refs[0].asset_name_or_ref, "photo.JPG");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = ingest_file(Path::new("/definitely/not/here.xlsx")).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }
}
