// src/sources/jsearch.rs
// JSearch (RapidAPI) aggregated job search. Every call is billed, so the source is
// only registered when explicitly enabled with a key.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use futures::future::{BoxFuture, FutureExt};
use log::{debug, warn};
use serde::Deserialize;
use url::Url;

use super::http::HttpClient;
use super::{default_expiry, retain_valid, JobSource};
use crate::matching::parse_salary;
use crate::models::{CanonicalJob, EmploymentType};
use crate::utils::config::JSearchConfig;
use crate::utils::constants::JSEARCH_API_HOST;

pub const SOURCE_NAME: &str = "JSearch";

#[derive(Debug, Deserialize)]
pub struct JSearchApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub data: Vec<JSearchJob>,
    #[serde(default)]
    pub num_pages: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JSearchJob {
    pub job_id: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_apply_link: String,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_posted_at_timestamp: Option<i64>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_is_remote: Option<bool>,
    #[serde(default)]
    pub employer_logo: Option<String>,
}

pub struct JSearchSource {
    config: JSearchConfig,
}

impl JSearchSource {
    pub fn new(config: JSearchConfig) -> Self {
        Self { config }
    }

    fn request_url(&self) -> Result<Url> {
        let remote_only = self.config.remote_only.to_string();
        let employment_types = employment_types_param(&self.config.employment_types);
        Url::parse_with_params(
            &self.config.api_url,
            &[
                ("query", self.config.query.as_str()),
                ("remote_jobs_only", remote_only.as_str()),
                ("employment_types", employment_types.as_str()),
                ("date_posted", "month"),
                ("page", "1"),
                ("num_pages", "1"),
            ],
        )
        .with_context(|| format!("Invalid JSearch API URL: {}", self.config.api_url))
    }

    async fn fetch_jobs(&self, client: &HttpClient) -> Result<Vec<CanonicalJob>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .context("JSEARCH_API_KEY is not set")?;
        let url = self.request_url()?;

        let body = client
            .get_json(
                &url,
                &[("X-RapidAPI-Key", api_key), ("X-RapidAPI-Host", JSEARCH_API_HOST)],
            )
            .await?;
        let response: JSearchApiResponse =
            serde_json::from_value(body).context("Unexpected JSearch response shape")?;

        debug!(
            "JSearch request {} returned status {:?} with {} jobs",
            response.request_id,
            response.status,
            response.data.len()
        );

        let jobs = response.data.into_iter().map(transform_jsearch_job).collect();
        Ok(retain_valid(SOURCE_NAME, jobs))
    }
}

impl JobSource for JSearchSource {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    fn fetch<'a>(&'a self, client: &'a HttpClient) -> BoxFuture<'a, Result<Vec<CanonicalJob>>> {
        self.fetch_jobs(client).boxed()
    }
}

/// JSearch's own labels, comma-separated. Freelance has no upstream equivalent and is
/// searched as contractor work.
fn employment_types_param(types: &[EmploymentType]) -> String {
    let mut labels: Vec<&str> = Vec::new();
    for kind in types {
        let label = match kind {
            EmploymentType::FullTime => "FULLTIME",
            EmploymentType::PartTime => "PARTTIME",
            EmploymentType::Contract | EmploymentType::Freelance => "CONTRACTOR",
        };
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels.join(",")
}

/// "{city}, {country}" with a leading separator removed when the city is missing.
fn location_from_parts(city: Option<&str>, country: Option<&str>) -> String {
    let joined = format!("{}, {}", city.unwrap_or(""), country.unwrap_or(""));
    let trimmed = joined.trim();
    trimmed
        .strip_prefix(',')
        .map(str::trim_start)
        .unwrap_or(trimmed)
        .to_string()
}

fn published_from_timestamp(job_id: &str, timestamp: Option<i64>) -> DateTime<Utc> {
    match timestamp.and_then(|secs| Utc.timestamp_opt(secs, 0).single()) {
        Some(published) => published,
        None => {
            warn!("JSearch job {} has no usable posting timestamp, using current time", job_id);
            Utc::now()
        }
    }
}

/// Maps a JSearch record onto a draft. Salary is read out of the description text,
/// since the search endpoint has no dedicated salary string.
pub fn transform_jsearch_job(job: JSearchJob) -> CanonicalJob {
    let published_at = published_from_timestamp(&job.job_id, job.job_posted_at_timestamp);
    let location_raw = location_from_parts(job.job_city.as_deref(), job.job_country.as_deref());
    let salary = parse_salary(Some(job.job_description.as_deref().unwrap_or("")));

    let mut draft = CanonicalJob::new(
        format!("jsearch-{}", job.job_id),
        job.job_title,
        job.employer_name,
        SOURCE_NAME,
        published_at,
    );
    draft.location_raw = location_raw;
    draft.employment_type = job
        .job_employment_type
        .as_deref()
        .and_then(EmploymentType::from_label)
        .unwrap_or_default();
    draft.apply_salary(salary);
    draft.remote = job.job_is_remote.unwrap_or(false);
    draft.source_job_url = job.job_apply_link;
    draft.expires_at = default_expiry(published_at);
    draft.description_html = job.job_description;
    draft.company_logo_url = job.employer_logo;
    draft
}
