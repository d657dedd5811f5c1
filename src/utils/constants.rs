// src/utils/constants.rs

use std::time::Duration;

/// Average title/company/location similarity (0-100) at or above which two postings
/// from different sources are treated as the same job.
pub const DUPLICATE_SIMILARITY_THRESHOLD: f64 = 85.0;

/// Maximum gap between publish dates, in days, for two postings to be duplicates.
pub const DUPLICATE_MAX_DAYS_APART: f64 = 7.0;

/// Source ranking for picking the canonical record of a duplicate cluster.
/// Lower wins.
pub const SOURCE_PRIORITIES: [(&str, u32); 3] = [("Manual", 1), ("JSearch", 2), ("Remotive", 3)];

/// Rank of any source missing from `SOURCE_PRIORITIES`.
pub const UNLISTED_SOURCE_PRIORITY: u32 = 999;

pub const MAX_DISCIPLINE_TAGS: usize = 10;
pub const MIN_TAG_LENGTH: usize = 3;

/// Numbers at or below this are ignored when reading salaries ("5 years", "401k").
pub const SALARY_FLOOR: f64 = 1000.0;

/// Feed postings without an explicit expiry are considered stale this long after
/// publication.
pub const JOB_EXPIRY_DAYS: i64 = 60;

pub const JOBS_PER_PAGE: usize = 20;
pub const MAX_JOBS_PER_REQUEST: usize = 100;

pub const CACHE_DURATION: Duration = Duration::from_secs(5 * 60);
pub const CACHE_CAPACITY: usize = 64;

pub const DEFAULT_REMOTIVE_API_URL: &str = "https://remotive.com/api/remote-jobs";
pub const DEFAULT_REMOTIVE_CATEGORY: &str = "design";
pub const DEFAULT_JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
pub const JSEARCH_API_HOST: &str = "jsearch.p.rapidapi.com";
pub const DEFAULT_JSEARCH_QUERY: &str = "product designer";

pub fn source_priority(source: &str) -> u32 {
    SOURCE_PRIORITIES
        .iter()
        .find(|(name, _)| *name == source)
        .map(|(_, rank)| *rank)
        .unwrap_or(UNLISTED_SOURCE_PRIORITY)
}
