use crate::{error::ConfigError, table};
use serde::Deserialize;
use std::{io::Read, path::Path};
use tracing::info;

pub const MANIFEST_COLUMNS: [&str; 2] = ["customer_name", "source_file"];

/// One customer conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestRow {
    pub customer_name: String,
    pub source_file: String,
    #[serde(default)]
    pub completed_template: String,
    #[serde(default)]
    pub base_template: String,
    #[serde(default)]
    pub output_type: String,
    #[serde(default)]
    pub notes: String,
}

impl ManifestRow {
    /// File-name friendly customer identifier: lowercase, spaces as underscores.
    pub fn customer_key(&self) -> String {
        self.customer_name.to_lowercase().replace(' ', "_")
    }
}

pub fn read_manifest<R: Read>(reader: R, name: &str) -> Result<Vec<ManifestRow>, ConfigError> {
    table::read_table(reader, name, &MANIFEST_COLUMNS)
}

pub fn load_manifest(path: &Path) -> Result<Vec<ManifestRow>, ConfigError> {
    let rows = read_manifest(table::open(path)?, &path.display().to_string())?;
    info!("Loaded manifest {} with {} customers", path.display(), rows.len());
    Ok(rows)
}
