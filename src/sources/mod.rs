// src/sources/mod.rs

pub mod http;
pub mod jsearch;
pub mod manual;
pub mod remotive;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use futures::future::BoxFuture;
use log::warn;

use crate::models::CanonicalJob;
use crate::utils::constants::JOB_EXPIRY_DAYS;
use http::HttpClient;

pub use jsearch::JSearchSource;
pub use manual::ManualSource;
pub use remotive::RemotiveSource;

/// A feed of job postings. Implementations map their native records onto
/// `CanonicalJob` drafts; classification happens later in the pipeline.
pub trait JobSource: Send + Sync {
    /// Label used in logs, error messages and per-source counts.
    fn name(&self) -> &str;

    fn fetch<'a>(&'a self, client: &'a HttpClient) -> BoxFuture<'a, Result<Vec<CanonicalJob>>>;
}

/// Drops drafts without a title or company name, logging each one.
pub(crate) fn retain_valid(source: &str, jobs: Vec<CanonicalJob>) -> Vec<CanonicalJob> {
    jobs.into_iter()
        .filter(|job| {
            let valid = !job.title.trim().is_empty() && !job.company_name.trim().is_empty();
            if !valid {
                warn!("{}: skipping job {} with missing title or company", source, job.id);
            }
            valid
        })
        .collect()
}

/// Default expiry for feed postings. `None` when the publish date sits so close to the
/// end of the representable range that the expiry would overflow.
pub(crate) fn default_expiry(published_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    published_at.checked_add_signed(Duration::days(JOB_EXPIRY_DAYS))
}
