use engine_config::templates::{TemplateRegistry, TemplateType};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Single-part crosswalk targeting a `Parts` sheet, plus one column on a
/// `Labor` sheet the fixture template does not have.
pub const SINGLE_PART_CROSSWALK: &str = "\
output_template,output_sheet,output_column,required,source_priority,transform_rule,notes
single_part,Parts,Manufacturer Part Number,yes,source,trim,
single_part,Parts,Part Name,no,source,,
single_part,Parts,Manufacturer,no,inferred,,
single_part,Parts,Part Cost,yes,source,currency,
single_part,Parts,Part Price,yes,markup,,
single_part,Labor,Labor Rate,no,default,,
";

/// 0.01-1.00 at 400%, above 1.00 at 100%.
pub const TWO_TIER_MARKUP: &str = r#"{
  "tiers": [
    {"min_cost": 0.01, "max_cost": 1.00, "markup_percent": 400, "order": 1},
    {"min_cost": 1.01, "max_cost": null, "markup_percent": 100, "order": 2}
  ]
}"#;

pub const TEMPLATE_HEADERS: [&str; 6] = [
    "Manufacturer Part Number",
    "Part Name",
    "Manufacturer",
    "Part Cost",
    "Part Price",
    "Internal Notes",
];

pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, contents).expect("write fixture");
    path.to_path_buf()
}

pub fn write_crosswalk(dir: &Path) -> PathBuf {
    write_file(&dir.join("crosswalk.csv"), SINGLE_PART_CROSSWALK)
}

pub fn write_markup(dir: &Path) -> PathBuf {
    write_file(&dir.join("markup.json"), TWO_TIER_MARKUP)
}

/// Base template: a title row above the header row on sheet `Parts`.
pub fn write_template(path: &Path) -> PathBuf {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");
        sheet.set_name("Parts");
        sheet.get_cell_mut("A1").set_value("Single Part Upload");
        for (col, label) in (1u32..).zip(TEMPLATE_HEADERS) {
            sheet.get_cell_mut((col, 2)).set_value(label);
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create template dir");
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("write template");
    path.to_path_buf()
}

/// Distributor workbook on a category sheet:
///
/// | row | A           | B            | C    |
/// |-----|-------------|--------------|------|
/// | 1   | Bryant 2024 |              |      |
/// | 2   | Part Number | Description  | Cost |
/// | 3   | Deluxe Series (family marker)     |
/// | 4   | G100        | 80% furnace  | 0.1  |
/// | 5   | G200        | 96% furnace  | 1.5  |
/// | 6   |             | Filter kit   | 2    |
/// | 7   | g 100       | duplicate    | 5    |
/// | 8   | G300        | Blower       | call |
pub fn write_source_workbook(path: &Path) -> PathBuf {
    let mut book = umya_spreadsheet::new_file();
    {
        let sheet = book.get_sheet_by_name_mut("Sheet1").expect("default sheet");
        sheet.set_name("Gas Furnaces");
        sheet.get_cell_mut("A1").set_value("Bryant 2024");
        sheet.get_cell_mut("A2").set_value("Part Number");
        sheet.get_cell_mut("B2").set_value("Description");
        sheet.get_cell_mut("C2").set_value("Cost");
        sheet.get_cell_mut("A3").set_value("Deluxe Series");

        sheet.get_cell_mut("A4").set_value("G100");
        sheet.get_cell_mut("B4").set_value("80% furnace");
        sheet.get_cell_mut("C4").set_value_number(0.1);

        sheet.get_cell_mut("A5").set_value("G200");
        sheet.get_cell_mut("B5").set_value("96% furnace");
        sheet.get_cell_mut("C5").set_value_number(1.5);

        sheet.get_cell_mut("B6").set_value("Filter kit");
        sheet.get_cell_mut("C6").set_value_number(2);

        sheet.get_cell_mut("A7").set_value("g 100");
        sheet.get_cell_mut("B7").set_value("duplicate");
        sheet.get_cell_mut("C7").set_value_number(5);

        sheet.get_cell_mut("A8").set_value("G300");
        sheet.get_cell_mut("B8").set_value("Blower");
        sheet.get_cell_mut("C8").set_value("call");
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create source dir");
    }
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("write source workbook");
    path.to_path_buf()
}

/// Plain comma-separated export, which only the fallback parser can read.
pub fn write_source_csv(path: &Path) -> PathBuf {
    write_file(
        path,
        "Part Number,Description,Cost\nX-1,Coil,0.10\nX-2,Pump,1.50\n",
    )
}

/// Lays out the registry's default crosswalk and base template under `root`.
pub fn seed_registry(root: &Path, template_type: TemplateType) -> TemplateRegistry {
    let registry = TemplateRegistry::new(root);
    write_file(&registry.crosswalk_path(template_type), SINGLE_PART_CROSSWALK);
    write_template(&registry.base_template_path(template_type));
    registry
}

/// CSV rows keyed by header.
pub fn read_csv(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader.headers().expect("csv headers").clone();
    reader
        .records()
        .map(|record| {
            let record = record.expect("csv record");
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect()
        })
        .collect()
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read json")).expect("parse json")
}

/// Displayed value of one cell, `(col, row)` 1-based.
pub fn cell(path: &Path, sheet: &str, col: u32, row: u32) -> String {
    let book = umya_spreadsheet::reader::xlsx::read(path).expect("read workbook");
    book.get_sheet_by_name(sheet)
        .expect("sheet present")
        .get_value((col, row))
}
