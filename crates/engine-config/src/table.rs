use crate::error::ConfigError;
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::{fs::File, io::Read, path::Path};

/// Header-driven CSV table whose headers were checked for required columns.
pub(crate) fn read_table<T, R>(reader: R, name: &str, required: &[&str]) -> Result<Vec<T>, ConfigError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    check_headers(&mut reader, name, required)?;

    reader
        .deserialize()
        .map(|row| row.map_err(ConfigError::from))
        .collect()
}

pub(crate) fn open(path: &Path) -> Result<File, ConfigError> {
    File::open(path).map_err(|err| ConfigError::io(path, err))
}

fn check_headers<R: Read>(
    reader: &mut Reader<R>,
    name: &str,
    required: &[&str],
) -> Result<(), ConfigError> {
    let headers: StringRecord = reader.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingColumns {
            file: name.to_string(),
            columns: missing,
        })
    }
}
