use super::ensure_parent;
use crate::error::SinkError;
use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

/// Writes any report as pretty-printed JSON, creating parent directories.
pub fn write_json_report<T: Serialize>(path: &Path, report: &T) -> Result<(), SinkError> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|err| SinkError::io(path, err))?;
    info!("Wrote report {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        rows_in: u64,
        summary_text: String,
    }

    #[test]
    fn writes_pretty_json_into_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa/run/report.json");
        let sample = Sample {
            rows_in: 3,
            summary_text: "ok".into(),
        };

        write_json_report(&path, &sample).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"rows_in\": 3"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["summary_text"], "ok");
    }
}
