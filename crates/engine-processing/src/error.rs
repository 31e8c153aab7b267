use thiserror::Error;

/// Failures of the enrichment stage itself. A part that cannot be found is
/// data (`EnrichmentStatus::NotFound`), not an error.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid domain allow-list: {0}")]
    Allowlist(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl EnrichError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        EnrichError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
