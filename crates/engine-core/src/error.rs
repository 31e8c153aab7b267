use thiserror::Error;

/// Failures while writing an output artifact.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook {path}: {message}")]
    Workbook { path: String, message: String },
}

impl SinkError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        SinkError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn workbook(path: &std::path::Path, message: impl ToString) -> Self {
        SinkError::Workbook {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
