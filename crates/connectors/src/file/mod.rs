pub mod assets;
pub mod ingest;
pub mod text;
pub mod xlsx;
