use crate::core::value::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Header label -> raw cell, in sheet column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowValues(IndexMap<String, CellValue>);

impl RowValues {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Zips header labels with cells positionally, truncating to the shorter side.
    pub fn zip(headers: &[String], cells: impl IntoIterator<Item = CellValue>) -> Self {
        let mut values = Self::new();
        for (label, cell) in headers.iter().zip(cells) {
            values.insert(label.clone(), cell);
        }
        values
    }

    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        self.0.insert(label.into(), value);
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.0.get(label)
    }

    /// Case-insensitive lookup by label.
    pub fn get_ci(&self, label: &str) -> Option<&CellValue> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(label))
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CellValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trimmed text of every non-blank cell, in column order.
    pub fn non_blank(&self) -> Vec<String> {
        self.0
            .values()
            .filter(|v| !v.is_empty())
            .map(CellValue::trimmed)
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.0.values().all(CellValue::is_empty)
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for RowValues {
    fn from_iter<T: IntoIterator<Item = (K, CellValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One logical record extracted from a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRow {
    pub source_file: String,
    pub source_sheet: String,
    /// 1-based position in the original sheet or text.
    pub source_row_number: usize,
    pub values: RowValues,
    /// Section header carried forward from a preceding single-value row.
    pub family_context: Option<String>,
}

impl SourceRow {
    pub fn new(
        source_file: impl Into<String>,
        source_sheet: impl Into<String>,
        source_row_number: usize,
        values: RowValues,
    ) -> Self {
        SourceRow {
            source_file: source_file.into(),
            source_sheet: source_sheet.into(),
            source_row_number,
            values,
            family_context: None,
        }
    }

    pub fn with_family_context(mut self, family_context: Option<String>) -> Self {
        self.family_context = family_context;
        self
    }
}
