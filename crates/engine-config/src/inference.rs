use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A case-insensitive filename token that implies a manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandToken {
    pub token: String,
    pub brand: String,
}

impl BrandToken {
    fn new(token: &str, brand: &str) -> Self {
        Self {
            token: token.to_string(),
            brand: brand.to_string(),
        }
    }
}

/// Prioritized source header candidates for each canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldCandidates {
    pub part_number: Vec<String>,
    pub description: Vec<String>,
    pub manufacturer: Vec<String>,
    pub cost: Vec<String>,
    pub warranty: Vec<String>,
    pub labor_hours: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldCandidates {
    fn default() -> Self {
        FieldCandidates {
            part_number: strings(&[
                "manufacturer part number",
                "part number",
                "mfr part",
                "model",
                "item id",
                "item",
                "sku",
            ]),
            description: strings(&["description", "item description", "item desc", "name"]),
            manufacturer: strings(&["manufacturer", "mfr", "brand"]),
            cost: strings(&["cost", "net cost", "price", "customer cost"]),
            warranty: strings(&["warranty", "warranty terms"]),
            labor_hours: strings(&["labor hours", "labor hrs", "install hours"]),
        }
    }
}

/// Static lookup data used by the mapper. Built-in defaults can be replaced
/// per table from a TOML file; tables absent from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceTables {
    /// Checked in order; the first token found in the source file name wins.
    pub brand_tokens: Vec<BrandToken>,
    /// Sheet names that describe a product category rather than a manufacturer.
    pub category_sheets: Vec<String>,
    pub fields: FieldCandidates,
}

impl Default for InferenceTables {
    fn default() -> Self {
        InferenceTables {
            brand_tokens: [
                ("american standard", "American Standard"),
                ("bryant", "Bryant"),
                ("carrier", "Carrier"),
                ("goodman", "Goodman"),
                ("amana", "Amana"),
                ("trane", "Trane"),
                ("lennox", "Lennox"),
                ("rheem", "Rheem"),
                ("ruud", "Ruud"),
                ("york", "York"),
                ("daikin", "Daikin"),
                ("payne", "Payne"),
                ("heil", "Heil"),
                ("mitsubishi", "Mitsubishi"),
                ("fujitsu", "Fujitsu"),
                ("honeywell", "Honeywell"),
            ]
            .into_iter()
            .map(|(token, brand)| BrandToken::new(token, brand))
            .collect(),
            category_sheets: strings(&[
                "gas furnaces",
                "furnaces",
                "air conditioners",
                "heat pumps",
                "air handlers",
                "evaporator coils",
                "coils",
                "package units",
                "ductless",
                "mini splits",
                "thermostats",
                "accessories",
                "water heaters",
                "parts",
            ]),
            fields: FieldCandidates::default(),
        }
    }
}

impl InferenceTables {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        let tables = Self::from_toml(&text)?;
        info!("Loaded inference tables from {}", path.display());
        Ok(tables)
    }

    /// Brand whose token appears in `file_name`, case-insensitively.
    pub fn brand_for_filename(&self, file_name: &str) -> Option<&str> {
        let lowered = file_name.to_lowercase();
        self.brand_tokens
            .iter()
            .find(|t| lowered.contains(&t.token.to_lowercase()))
            .map(|t| t.brand.as_str())
    }

    pub fn is_category_sheet(&self, sheet_name: &str) -> bool {
        let sheet = sheet_name.trim();
        self.category_sheets
            .iter()
            .any(|c| c.eq_ignore_ascii_case(sheet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_tokens_are_case_insensitive() {
        let tables = InferenceTables::default();
        assert_eq!(tables.brand_for_filename("2024_BRYANT_pricing.xlsx"), Some("Bryant"));
        assert_eq!(
            tables.brand_for_filename("American Standard Q3.csv"),
            Some("American Standard")
        );
        assert_eq!(tables.brand_for_filename("distributor.xlsx"), None);
    }

    #[test]
    fn category_sheets_match_whole_names() {
        let tables = InferenceTables::default();
        assert!(tables.is_category_sheet(" Gas Furnaces "));
        assert!(!tables.is_category_sheet("Goodman Furnaces 2024"));
    }

    #[test]
    fn toml_overrides_only_named_tables() {
        let tables = InferenceTables::from_toml(
            r#"
            category_sheets = ["Boilers"]

            [[brand_tokens]]
            token = "weil"
            brand = "Weil-McLain"

            [fields]
            cost = ["dealer net"]
            "#,
        )
        .unwrap();
        assert_eq!(tables.brand_for_filename("WEIL boilers.csv"), Some("Weil-McLain"));
        assert_eq!(tables.brand_for_filename("bryant.csv"), None);
        assert!(tables.is_category_sheet("boilers"));
        assert_eq!(tables.fields.cost, vec!["dealer net".to_string()]);
        assert_eq!(tables.fields.part_number, FieldCandidates::default().part_number);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = InferenceTables::from_toml("brand_tokens = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
