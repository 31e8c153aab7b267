use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a fetched page matches the requested part number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStatus {
    Enriched,
    NotFound,
    Ambiguous,
    Blocked,
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentStatus::Enriched => write!(f, "enriched"),
            EnrichmentStatus::NotFound => write!(f, "not_found"),
            EnrichmentStatus::Ambiguous => write!(f, "ambiguous"),
            EnrichmentStatus::Blocked => write!(f, "blocked"),
        }
    }
}

/// Best-effort descriptive data for one part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub part_name: Option<String>,
    pub description: Option<String>,
    pub warranty: Option<String>,
    pub source_url: Option<String>,
    pub confidence: Confidence,
    pub status: EnrichmentStatus,
}

impl EnrichmentResult {
    pub fn not_found() -> Self {
        EnrichmentResult {
            part_name: None,
            description: None,
            warranty: None,
            source_url: None,
            confidence: Confidence::Low,
            status: EnrichmentStatus::NotFound,
        }
    }
}
