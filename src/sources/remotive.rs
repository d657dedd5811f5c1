// src/sources/remotive.rs
// Remotive public remote-jobs feed

use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use serde::Deserialize;
use url::Url;

use super::http::HttpClient;
use super::{default_expiry, retain_valid, JobSource};
use crate::matching::parse_salary;
use crate::models::{CanonicalJob, EmploymentType};
use crate::utils::config::RemotiveConfig;
use crate::utils::time::parse_feed_timestamp;

pub const SOURCE_NAME: &str = "Remotive";

#[derive(Debug, Deserialize)]
pub struct RemotiveApiResponse {
    #[serde(rename = "job-count", default)]
    pub job_count: usize,
    #[serde(default)]
    pub jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemotiveJob {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub publication_date: String,
    #[serde(default)]
    pub candidate_required_location: String,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub company_logo_url: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
}

pub struct RemotiveSource {
    config: RemotiveConfig,
}

impl RemotiveSource {
    pub fn new(config: RemotiveConfig) -> Self {
        Self { config }
    }

    fn request_url(&self) -> Result<Url> {
        Url::parse_with_params(&self.config.api_url, &[("category", self.config.category.as_str())])
            .with_context(|| format!("Invalid Remotive API URL: {}", self.config.api_url))
    }

    async fn fetch_jobs(&self, client: &HttpClient) -> Result<Vec<CanonicalJob>> {
        let url = self.request_url()?;
        let body = client.get_json(&url, &[]).await?;
        let response: RemotiveApiResponse =
            serde_json::from_value(body).context("Unexpected Remotive response shape")?;

        debug!(
            "Remotive reported {} jobs, {} in payload",
            response.job_count,
            response.jobs.len()
        );

        let jobs = response.jobs.into_iter().map(transform_remotive_job).collect();
        Ok(retain_valid(SOURCE_NAME, jobs))
    }
}

impl JobSource for RemotiveSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch<'a>(&'a self, client: &'a HttpClient) -> BoxFuture<'a, Result<Vec<CanonicalJob>>> {
        self.fetch_jobs(client).boxed()
    }
}

/// Maps a Remotive record onto a draft. Every Remotive listing is remote.
pub fn transform_remotive_job(job: RemotiveJob) -> CanonicalJob {
    let published_at = parse_feed_timestamp(&job.publication_date).unwrap_or_else(|| {
        warn!(
            "Remotive job {} has unreadable publication_date {:?}, using current time",
            job.id, job.publication_date
        );
        Utc::now()
    });

    let mut draft = CanonicalJob::new(
        format!("remotive-{}", job.id),
        job.title,
        job.company_name,
        SOURCE_NAME,
        published_at,
    );
    draft.location_raw = job.candidate_required_location;
    draft.employment_type = job
        .job_type
        .as_deref()
        .and_then(EmploymentType::from_label)
        .unwrap_or_default();
    draft.apply_salary(parse_salary(job.salary.as_deref()));
    draft.discipline_tags = job.tags;
    draft.remote = true;
    draft.source_job_url = job.url;
    draft.expires_at = default_expiry(published_at);
    draft.description_html = job.description;
    draft.company_logo_url = job.company_logo_url.or(job.company_logo);
    draft
}
