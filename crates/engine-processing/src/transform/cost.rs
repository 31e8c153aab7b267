use model::core::value::CellValue;
use rust_decimal::Decimal;
use std::str::FromStr;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Exact cost from a cell. Currency symbols, thousands separators and
/// whitespace are stripped; anything still non-numeric is "no cost".
pub fn parse_cost(value: Option<&CellValue>) -> Option<Decimal> {
    match value? {
        CellValue::Number(n) => Some(*n),
        CellValue::Empty => None,
        CellValue::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned)
                .or_else(|_| Decimal::from_scientific(&cleaned))
                .ok()
        }
    }
}
