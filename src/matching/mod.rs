// src/matching/mod.rs

pub mod description;
pub mod inference;
pub mod location;
pub mod similarity;

// Re-exports for cleaner imports
pub use inference::{extract_discipline_tags, parse_employment_type, parse_salary, parse_seniority};
pub use location::parse_location;
pub use similarity::calculate_similarity;
