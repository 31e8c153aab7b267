use super::tier::{MarkupTier, RawTier};
use crate::error::{ConfigError, MarkupError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct RawProfile {
    tiers: Vec<RawTier>,
}

/// Validated cost to price tier table.
///
/// Construction fails unless at least one tier is enabled and the enabled
/// tiers, taken in `order`, have well-formed, strictly increasing ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupProfile {
    tiers: Vec<MarkupTier>,
}

impl MarkupProfile {
    pub fn new(mut tiers: Vec<MarkupTier>) -> Result<Self, MarkupError> {
        tiers.sort_by_key(|t| t.order);
        validate(&tiers)?;
        Ok(Self { tiers })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let raw: RawProfile = serde_json::from_str(text)?;
        let tiers = raw
            .tiers
            .into_iter()
            .enumerate()
            .map(|(position, tier)| tier.into_tier(position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tiers)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        let profile = Self::from_json(&text)?;
        info!(
            "Loaded markup profile {} with {} tiers",
            path.display(),
            profile.tiers.len()
        );
        Ok(profile)
    }

    /// Tiers in evaluation order.
    pub fn tiers(&self) -> &[MarkupTier] {
        &self.tiers
    }

    /// Cost scaled by the first matching enabled tier, rounded half-up to cents.
    pub fn price_for_cost(&self, cost: Decimal) -> Result<Decimal, MarkupError> {
        let tier = self
            .tiers
            .iter()
            .filter(|t| t.enabled)
            .find(|t| t.contains(cost))
            .ok_or(MarkupError::NoMatchingTier(cost))?;

        let price = cost
            .checked_mul(tier.multiplier())
            .ok_or(MarkupError::Overflow(cost))?;
        Ok(price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

fn validate(tiers: &[MarkupTier]) -> Result<(), MarkupError> {
    let enabled: Vec<&MarkupTier> = tiers.iter().filter(|t| t.enabled).collect();
    if enabled.is_empty() {
        return Err(MarkupError::NoEnabledTiers);
    }

    for tier in &enabled {
        if let Some(max) = tier.max_cost
            && max < tier.min_cost
        {
            return Err(MarkupError::InvertedRange {
                order: tier.order,
                min: tier.min_cost,
                max,
            });
        }
    }

    for pair in enabled.windows(2) {
        let (previous, tier) = (pair[0], pair[1]);
        let overlaps = match previous.max_cost {
            None => true,
            Some(previous_max) => tier.min_cost <= previous_max,
        };
        if overlaps {
            return Err(MarkupError::Overlap {
                order: tier.order,
                min: tier.min_cost,
                previous_max: previous
                    .max_cost
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "unbounded".to_string()),
            });
        }
    }

    Ok(())
}
