pub mod counters;
pub mod enrichment;
pub mod ingest;
pub mod mapped;
pub mod row;
