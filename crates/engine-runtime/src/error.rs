use connectors::error::FileError;
use engine_config::error::ConfigError;
use engine_core::error::SinkError;
use engine_processing::error::EnrichError;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Row-level problems never end up here: they are carried on the mapped rows
/// and in the QA report.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read source: {0}")]
    Source(#[from] FileError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] SinkError),

    #[error("Enrichment failed: {0}")]
    Enrichment(#[from] EnrichError),
}
