use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A single untyped spreadsheet cell.
///
/// Source documents carry whatever the distributor typed, so the model keeps
/// only three shapes and coerces on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Number(Decimal),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    /// Wraps raw text, collapsing whitespace-only input to `Empty`.
    pub fn text(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw)
        }
    }

    /// Parses `raw` as a number when it looks like one, otherwise keeps it as text.
    pub fn numeric_or_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(CellValue::Number)
            .unwrap_or_else(|_| CellValue::Text(raw.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Text rendering of the cell, `None` when blank.
    pub fn as_string(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(d) => Some(d.normalize().to_string()),
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(d) => Some(*d),
            CellValue::Text(s) => Decimal::from_str(s.trim()).ok(),
            CellValue::Empty => None,
        }
    }

    /// Trimmed text of the cell, or an empty string.
    pub fn trimmed(&self) -> String {
        self.as_string()
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(d) => write!(f, "{}", d.normalize()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(Decimal::from(value as u64))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_text_is_empty() {
        assert_eq!(CellValue::text("   "), CellValue::Empty);
        assert!(CellValue::Text("\t".into()).is_empty());
        assert!(!CellValue::Number(Decimal::ZERO).is_empty());
    }

    #[test]
    fn numeric_or_text_keeps_codes_as_text() {
        assert_eq!(
            CellValue::numeric_or_text("12.50"),
            CellValue::Number(Decimal::new(1250, 2))
        );
        assert_eq!(
            CellValue::numeric_or_text("ABC-1"),
            CellValue::Text("ABC-1".into())
        );
        assert_eq!(CellValue::numeric_or_text(""), CellValue::Empty);
    }

    #[test]
    fn numbers_render_without_trailing_zeros() {
        let v = CellValue::Number(Decimal::new(1000, 2));
        assert_eq!(v.as_string().as_deref(), Some("10"));
        assert_eq!(v.to_string(), "10");
    }
}
