use crate::{error::ConfigError, table};
use serde::Deserialize;
use std::{io::Read, path::Path};
use tracing::info;

pub const CROSSWALK_COLUMNS: [&str; 6] = [
    "output_template",
    "output_sheet",
    "output_column",
    "required",
    "source_priority",
    "transform_rule",
];

/// Required output columns that never block a row unless the file says otherwise.
pub const DEFAULT_NON_BLOCKING: [&str; 2] = ["part cost", "part price"];

/// One output-column mapping rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosswalkRow {
    pub output_template: String,
    pub output_sheet: String,
    pub output_column: String,
    pub required: bool,
    /// Whether a missing value forces manual review. Only meaningful when `required`.
    pub blocking: bool,
    pub source_priority: String,
    pub transform_rule: String,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
struct RawCrosswalkRow {
    output_template: String,
    output_sheet: String,
    output_column: String,
    required: String,
    source_priority: String,
    transform_rule: String,
    #[serde(default)]
    blocking: Option<String>,
    #[serde(default)]
    notes: String,
}

impl From<RawCrosswalkRow> for CrosswalkRow {
    fn from(raw: RawCrosswalkRow) -> Self {
        let required = is_yes(&raw.required);
        let blocking = match raw.blocking.as_deref().map(str::trim) {
            Some(flag) if !flag.is_empty() => required && is_yes(flag),
            _ => {
                required
                    && !DEFAULT_NON_BLOCKING
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(raw.output_column.trim()))
            }
        };

        CrosswalkRow {
            output_template: raw.output_template,
            output_sheet: raw.output_sheet,
            output_column: raw.output_column,
            required,
            blocking,
            source_priority: raw.source_priority,
            transform_rule: raw.transform_rule,
            notes: raw.notes,
        }
    }
}

fn is_yes(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("yes")
}

/// Column-mapping rules for one template. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Crosswalk {
    rows: Vec<CrosswalkRow>,
}

impl Crosswalk {
    pub fn new(rows: Vec<CrosswalkRow>) -> Self {
        Self { rows }
    }

    pub fn from_reader<R: Read>(reader: R, name: &str) -> Result<Self, ConfigError> {
        let raw: Vec<RawCrosswalkRow> = table::read_table(reader, name, &CROSSWALK_COLUMNS)?;
        Ok(Self::new(raw.into_iter().map(CrosswalkRow::from).collect()))
    }

    pub fn rows(&self) -> &[CrosswalkRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct output columns in file order.
    pub fn output_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !columns.contains(&row.output_column.as_str()) {
                columns.push(&row.output_column);
            }
        }
        columns
    }

    /// Output columns whose absence sends a row to manual review.
    pub fn blocking_columns(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.blocking)
            .map(|row| row.output_column.as_str())
            .collect()
    }

    /// Distinct output sheets in file order.
    pub fn output_sheets(&self) -> Vec<&str> {
        let mut sheets: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !sheets.contains(&row.output_sheet.as_str()) {
                sheets.push(&row.output_sheet);
            }
        }
        sheets
    }

    /// Columns targeted on one output sheet, in file order.
    pub fn columns_for_sheet(&self, sheet: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.output_sheet == sheet)
            .map(|row| row.output_column.as_str())
            .collect()
    }
}

/// Loads a crosswalk CSV. Missing required columns are listed in the error.
pub fn load_crosswalk(path: &Path) -> Result<Crosswalk, ConfigError> {
    let file = table::open(path)?;
    let crosswalk = Crosswalk::from_reader(file, &path.display().to_string())?;
    info!(
        "Loaded crosswalk {} with {} rules",
        path.display(),
        crosswalk.rows().len()
    );
    Ok(crosswalk)
}
