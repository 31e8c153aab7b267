use crate::core::value::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical output field names.
pub mod fields {
    pub const PART_NUMBER: &str = "Manufacturer Part Number";
    pub const PART_NUMBER_ORIGINAL: &str = "manufacturer_part_number_original";
    pub const PART_NUMBER_NORMALIZED: &str = "manufacturer_part_number_normalized";
    pub const PART_NAME: &str = "Part Name";
    pub const DESCRIPTION: &str = "Description";
    pub const MANUFACTURER: &str = "Manufacturer";
    pub const CATEGORY: &str = "Category";
    pub const PART_COST: &str = "Part Cost";
    pub const PART_PRICE: &str = "Part Price";
    pub const LABOR_COST: &str = "Labor Cost";
    pub const LABOR_RATE: &str = "Labor Rate";
    pub const LABOR_HOURS: &str = "Labor Hours";
    pub const WARRANTY: &str = "Warranty";
    pub const STATUS: &str = "Status";
    pub const STATUS_REASON: &str = "Status Reason";
    pub const ENRICHMENT_URL_HINT: &str = "Enrichment URL Hint";
    pub const SOURCE_FILE: &str = "source_file";
    pub const SOURCE_SHEET: &str = "source_sheet";
    pub const SOURCE_ROW_NUMBER: &str = "source_row_number";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Processed,
    ManualReview,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Processed => write!(f, "processed"),
            RowStatus::ManualReview => write!(f, "manual_review"),
        }
    }
}

/// Machine-readable reason codes, append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReasons(Vec<String>);

impl StatusReasons {
    pub fn push(&mut self, code: impl Into<String>) {
        self.0.push(code.into());
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self) -> String {
        self.0.join(";")
    }
}

/// One canonical output record.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRow {
    pub row: IndexMap<String, CellValue>,
    pub status: RowStatus,
    pub status_reason: String,
}

impl MappedRow {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.row.get(field)
    }

    /// Case-insensitive field lookup, used when matching template column labels.
    pub fn get_ci(&self, field: &str) -> Option<&CellValue> {
        self.row.get(field).or_else(|| {
            self.row
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(field))
                .map(|(_, v)| v)
        })
    }

    pub fn is_processed(&self) -> bool {
        self.status == RowStatus::Processed
    }
}
