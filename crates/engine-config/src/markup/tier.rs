use crate::error::MarkupError;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

/// One pricing bracket. `max_cost` of `None` is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupTier {
    pub min_cost: Decimal,
    pub max_cost: Option<Decimal>,
    pub markup_percent: Decimal,
    pub enabled: bool,
    pub order: i64,
}

impl MarkupTier {
    pub fn new(min_cost: Decimal, max_cost: Option<Decimal>, markup_percent: Decimal, order: i64) -> Self {
        MarkupTier {
            min_cost,
            max_cost,
            markup_percent,
            enabled: true,
            order,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Inclusive on both ends.
    pub fn contains(&self, cost: Decimal) -> bool {
        cost >= self.min_cost && self.max_cost.is_none_or(|max| cost <= max)
    }

    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE + self.markup_percent / Decimal::ONE_HUNDRED
    }
}

/// Tier as written in a profile file: numbers may be JSON numbers or strings.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTier {
    min_cost: Value,
    #[serde(default)]
    max_cost: Value,
    markup_percent: Value,
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
}

impl RawTier {
    /// `position` is the 0-based index in the file, used when `order` is absent.
    pub(crate) fn into_tier(self, position: usize) -> Result<MarkupTier, MarkupError> {
        let max_cost = match self.max_cost {
            Value::Null => None,
            other => Some(decimal("max_cost", &other)?),
        };

        Ok(MarkupTier {
            min_cost: decimal("min_cost", &self.min_cost)?,
            max_cost,
            markup_percent: decimal("markup_percent", &self.markup_percent)?,
            enabled: self.enabled.unwrap_or(true),
            order: self.order.unwrap_or(position as i64 + 1),
        })
    }
}

fn decimal(field: &str, value: &Value) -> Result<Decimal, MarkupError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(MarkupError::Parse(format!("{field}: expected a number, got {other}"))),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| MarkupError::Parse(format!("{field}: '{text}' is not a decimal")))
}
