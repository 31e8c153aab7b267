use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration-fatal errors. Any of these aborts a run before rows are processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A crosswalk or manifest file lacks columns it must carry.
    #[error("{file} is missing required columns: {}", .columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error("Unknown template type: {0}")]
    UnknownTemplateType(String),

    #[error("Invalid markup profile: {0}")]
    Markup(#[from] MarkupError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Markup tier table problems, plus the per-row pricing miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("no enabled markup tiers")]
    NoEnabledTiers,

    #[error("tier {order}: max_cost {max} is below min_cost {min}")]
    InvertedRange { order: i64, min: Decimal, max: Decimal },

    #[error("tier {order}: min_cost {min} does not exceed previous tier max {previous_max}")]
    Overlap {
        order: i64,
        min: Decimal,
        previous_max: String,
    },

    #[error("{0}")]
    Parse(String),

    #[error("No markup tier found for cost {0}")]
    NoMatchingTier(Decimal),

    #[error("Markup overflow for cost {0}")]
    Overflow(Decimal),
}
