// src/sources/manual.rs
// Hand-curated postings read from a local JSON file

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use log::info;
use std::path::PathBuf;

use super::http::HttpClient;
use super::{retain_valid, JobSource};
use crate::models::CanonicalJob;

pub const SOURCE_NAME: &str = "Manual";

/// Reads a JSON array of canonical jobs. Whatever `source` the file declares, records
/// are attributed to `Manual` so they win deduplication against feed copies.
pub struct ManualSource {
    path: PathBuf,
}

impl ManualSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<Vec<CanonicalJob>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read manual jobs file {}", self.path.display()))?;
        let jobs = parse_manual_jobs(&raw)
            .with_context(|| format!("Invalid manual jobs file {}", self.path.display()))?;
        info!("Loaded {} manual jobs from {}", jobs.len(), self.path.display());
        Ok(retain_valid(SOURCE_NAME, jobs))
    }
}

impl JobSource for ManualSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch<'a>(&'a self, _client: &'a HttpClient) -> BoxFuture<'a, Result<Vec<CanonicalJob>>> {
        self.load().boxed()
    }
}

pub fn parse_manual_jobs(raw: &str) -> Result<Vec<CanonicalJob>> {
    let mut jobs: Vec<CanonicalJob> =
        serde_json::from_str(raw).context("Expected a JSON array of jobs")?;
    for job in jobs.iter_mut() {
        job.source = SOURCE_NAME.to_string();
    }
    Ok(jobs)
}
