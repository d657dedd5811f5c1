// src/lib.rs

pub mod aggregation;
pub mod clustering;
pub mod filters;
pub mod matching;
pub mod models;
pub mod normalization;
pub mod sources;
pub mod utils;

pub use aggregation::{aggregate, normalize_and_deduplicate, AggregationResult};
pub use clustering::dedup::{deduplicate, deduplication_stats, is_duplicate};
pub use filters::{apply_filters, paginate};
pub use models::job::{CanonicalJob, EmploymentType, Region, Seniority};
pub use models::filters::{FilterParams, PaginatedJobs};
pub use normalization::enhance::enhance_job;
pub use sources::{http::HttpClient, JobSource};
