// src/models/stats_models.rs

use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of one deduplication pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeduplicationStats {
    pub original_count: usize,
    pub deduplicated_count: usize,
    pub duplicates_removed: usize,
    /// Percentage of input records removed, rounded to two decimals.
    pub duplicate_rate: f64,
    /// Surviving records per source.
    pub source_breakdown: BTreeMap<String, usize>,
}
