// src/filters.rs
// Request-level filtering and pagination over the aggregated job list

use crate::models::filters::{FilterParams, PaginatedJobs};
use crate::models::CanonicalJob;
use crate::utils::constants::{JOBS_PER_PAGE, MAX_JOBS_PER_REQUEST};

fn matches_keyword(job: &CanonicalJob, keyword: &str) -> bool {
    job.title.to_lowercase().contains(keyword)
        || job.company_name.to_lowercase().contains(keyword)
        || job
            .discipline_tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(keyword))
}

fn matches(job: &CanonicalJob, filters: &FilterParams, keyword: Option<&str>) -> bool {
    if let Some(keyword) = keyword {
        if !matches_keyword(job, keyword) {
            return false;
        }
    }

    if filters.remote_only && !job.remote {
        return false;
    }

    if !filters.employment_type.is_empty() && !filters.employment_type.contains(&job.employment_type) {
        return false;
    }

    if !filters.seniority.is_empty() && !filters.seniority.contains(&job.seniority) {
        return false;
    }

    // Region and country filters exclude jobs where the field is unknown.
    if !filters.location_region.is_empty() {
        match job.location_region {
            Some(region) if filters.location_region.contains(&region) => {}
            _ => return false,
        }
    }

    if !filters.location_country.is_empty() {
        match &job.location_country {
            Some(country) if filters.location_country.iter().any(|c| c == country) => {}
            _ => return false,
        }
    }

    true
}

/// Keeps the jobs matching every populated filter, preserving order.
pub fn apply_filters(jobs: &[CanonicalJob], filters: &FilterParams) -> Vec<CanonicalJob> {
    let keyword = filters
        .keyword
        .as_deref()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty());

    jobs.iter()
        .filter(|job| matches(job, filters, keyword.as_deref()))
        .cloned()
        .collect()
}

/// Slices out one page. `page` is 1-based and clamped to at least 1; `per_page`
/// defaults to 20 and is capped at 100. Pages past the end are empty.
pub fn paginate(jobs: Vec<CanonicalJob>, page: usize, per_page: Option<usize>) -> PaginatedJobs {
    let page = page.max(1);
    let per_page = per_page
        .unwrap_or(JOBS_PER_PAGE)
        .clamp(1, MAX_JOBS_PER_REQUEST);

    let total = jobs.len();
    let total_pages = (total + per_page - 1) / per_page;

    let jobs = jobs
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    PaginatedJobs {
        jobs,
        total,
        page,
        per_page,
        total_pages,
    }
}
