pub mod allowlist;
pub mod http;
pub mod table;
pub mod text;

use model::records::enrichment::EnrichmentResult;

/// Looks up descriptive data for one part. Implementations never fail:
/// anything they cannot resolve is reported through the result's status.
pub trait PartLookup {
    fn lookup(&self, part_number: &str, manufacturer: &str) -> EnrichmentResult;
}
