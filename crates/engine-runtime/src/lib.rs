//! Sequential orchestration of conversion, enrichment and manifest batches.

pub mod error;
pub mod execution;
