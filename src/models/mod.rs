// src/models/mod.rs

pub mod filters;
pub mod job;
pub mod stats_models;

pub use job::{CanonicalJob, EmploymentType, ParsedLocation, Region, SalaryRange, Seniority};
