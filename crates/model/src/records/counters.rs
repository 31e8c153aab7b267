use serde::{Deserialize, Serialize};

/// Aggregate row counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingCounters {
    pub rows_total: u64,
    pub rows_processed: u64,
    pub rows_incomplete: u64,
    pub rows_manual_review: u64,
    pub rows_duplicates_ignored: u64,
}

impl MappingCounters {
    pub fn with_total(rows_total: u64) -> Self {
        MappingCounters {
            rows_total,
            ..Default::default()
        }
    }

    pub fn record_processed(&mut self) {
        self.rows_processed += 1;
    }

    /// A manual-review row is also an incomplete row.
    pub fn record_manual_review(&mut self) {
        self.rows_incomplete += 1;
        self.rows_manual_review += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.rows_duplicates_ignored += 1;
    }

    /// Sums another run's counters into this one.
    pub fn absorb(&mut self, other: &MappingCounters) {
        self.rows_total += other.rows_total;
        self.rows_processed += other.rows_processed;
        self.rows_incomplete += other.rows_incomplete;
        self.rows_manual_review += other.rows_manual_review;
        self.rows_duplicates_ignored += other.rows_duplicates_ignored;
    }

    pub fn summary_text(&self) -> String {
        format!(
            "{} processed / {} incomplete",
            self.rows_processed, self.rows_incomplete
        )
    }
}
