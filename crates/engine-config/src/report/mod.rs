pub mod consolidated;
pub mod enrichment;
pub mod qa;
