use model::records::enrichment::EnrichmentStatus;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub rows_total: u64,
    pub enriched: u64,
    pub not_found: u64,
    pub ambiguous: u64,
    pub blocked: u64,
}

impl EnrichmentSummary {
    pub fn with_total(rows_total: u64) -> Self {
        EnrichmentSummary {
            rows_total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, status: EnrichmentStatus) {
        match status {
            EnrichmentStatus::Enriched => self.enriched += 1,
            EnrichmentStatus::NotFound => self.not_found += 1,
            EnrichmentStatus::Ambiguous => self.ambiguous += 1,
            EnrichmentStatus::Blocked => self.blocked += 1,
        }
    }
}

/// QA report for one enrichment run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentReport {
    pub summary: EnrichmentSummary,
    pub domains_config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_land_in_their_counter() {
        let mut summary = EnrichmentSummary::with_total(3);
        summary.record(EnrichmentStatus::Enriched);
        summary.record(EnrichmentStatus::NotFound);
        summary.record(EnrichmentStatus::NotFound);

        let report = EnrichmentReport {
            summary,
            domains_config: "config/enrichment/manufacturer_domains.json".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["rows_total"], 3);
        assert_eq!(json["summary"]["enriched"], 1);
        assert_eq!(json["summary"]["not_found"], 2);
        assert_eq!(json["summary"]["blocked"], 0);
    }
}
