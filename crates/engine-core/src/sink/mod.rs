use crate::error::SinkError;
use model::records::mapped::MappedRow;
use std::{fs, path::Path};

pub mod report;
pub mod table;
pub mod workbook;

/// Serializes mapped rows into one output artifact. Sinks never re-derive
/// business values; they only lay out what the mapper produced.
pub trait Sink {
    fn write(&self, rows: &[MappedRow]) -> Result<(), SinkError>;
}

/// Creates the parent directory of `path` when it has one.
pub(crate) fn ensure_parent(path: &Path) -> Result<(), SinkError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| SinkError::io(parent, err))
        }
        _ => Ok(()),
    }
}
