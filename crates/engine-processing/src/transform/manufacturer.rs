use engine_config::inference::InferenceTables;
use model::records::row::SourceRow;

/// Manufacturer for a row, by precedence: explicit field, brand token in the
/// file name, then the sheet name unless it names a product category.
pub fn infer_manufacturer(
    explicit: Option<String>,
    source: &SourceRow,
    tables: &InferenceTables,
) -> Option<String> {
    if let Some(name) = explicit.map(|s| s.trim().to_string())
        && !name.is_empty()
    {
        return Some(name);
    }

    if let Some(brand) = tables.brand_for_filename(&source.source_file) {
        return Some(brand.to_string());
    }

    let sheet = source.source_sheet.trim();
    if sheet.is_empty() || tables.is_category_sheet(sheet) {
        None
    } else {
        Some(sheet.to_string())
    }
}

/// Search link restricted to the manufacturer's presumed site.
pub fn site_hint(manufacturer: &str, part_number: &str) -> Option<String> {
    if manufacturer.trim().is_empty() || part_number.trim().is_empty() {
        return None;
    }
    let domain = manufacturer.to_lowercase().replace('&', "and").replace(' ', "");
    Some(format!(
        "https://www.google.com/search?q=site:{domain}.com+{}",
        part_number.trim()
    ))
}
