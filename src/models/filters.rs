// src/models/filters.rs

use serde::{Deserialize, Serialize};

use super::job::{CanonicalJob, EmploymentType, Region, Seniority};

/// Request-level filter parameters. Empty lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub employment_type: Vec<EmploymentType>,
    #[serde(default)]
    pub seniority: Vec<Seniority>,
    #[serde(default)]
    pub location_region: Vec<Region>,
    #[serde(default)]
    pub location_country: Vec<String>,
}

impl FilterParams {
    pub fn is_empty(&self) -> bool {
        self.keyword.as_deref().map_or(true, |k| k.trim().is_empty())
            && !self.remote_only
            && self.employment_type.is_empty()
            && self.seniority.is_empty()
            && self.location_region.is_empty()
            && self.location_country.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedJobs {
    pub jobs: Vec<CanonicalJob>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}
