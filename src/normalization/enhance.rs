// src/normalization/enhance.rs
// Turns an adapter-produced job into a fully classified canonical record

use crate::matching::description::clean_job_description;
use crate::matching::{
    extract_discipline_tags, parse_employment_type, parse_location, parse_seniority,
};
use crate::models::{CanonicalJob, EmploymentType, Seniority};

/// Returns an enhanced copy of `job`; the input is left untouched.
///
/// - the description has entities decoded and whitespace collapsed, and every
///   classifier below reads the cleaned text;
/// - seniority and employment type are inferred only while they still hold the default
///   (`mid` / `full-time`), so an explicit value from a feed is trusted;
/// - discipline tags are recomputed by merging inferred keywords into the existing ones;
/// - location fields and `remote` come from parsing `location_raw`;
/// - salary bounds are put in ascending order.
pub fn enhance_job(job: &CanonicalJob) -> CanonicalJob {
    let mut enhanced = job.clone();
    enhanced.description_html = job.description_html.as_deref().map(clean_job_description);
    let description = enhanced.description_html.as_deref();

    if job.seniority == Seniority::default() {
        enhanced.seniority = parse_seniority(&job.title, description);
    }

    if job.employment_type == EmploymentType::default() {
        enhanced.employment_type = parse_employment_type(
            Some(job.employment_type.as_str()),
            Some(&job.title),
            description,
        );
    }

    enhanced.discipline_tags =
        extract_discipline_tags(&job.title, description, Some(job.discipline_tags.as_slice()));

    let parsed = parse_location(&job.location_raw);
    enhanced.location_city = parsed.city;
    enhanced.location_country = parsed.country.map(str::to_string);
    enhanced.location_region = parsed.region;
    enhanced.remote = parsed.remote;

    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        if min > max {
            enhanced.salary_min = Some(max);
            enhanced.salary_max = Some(min);
        }
    }

    enhanced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use chrono::{TimeZone, Utc};

    fn draft(title: &str, location: &str) -> CanonicalJob {
        let published = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let mut job = CanonicalJob::new("remotive-1", title, "Figma", "Remotive", published);
        job.location_raw = location.to_string();
        job
    }

    #[test]
    fn test_infers_default_fields() {
        let mut job = draft("Senior Contract UX Designer", "Berlin, Germany");
        job.description_html = Some("<p>Figma&nbsp;&amp;  prototyping</p>".to_string());

        let enhanced = enhance_job(&job);
        assert_eq!(enhanced.seniority, Seniority::Senior);
        assert_eq!(enhanced.employment_type, EmploymentType::Contract);
        assert_eq!(enhanced.discipline_tags, vec!["figma", "prototyping"]);
        assert_eq!(enhanced.description_html.as_deref(), Some("<p>Figma & prototyping</p>"));
        assert_eq!(enhanced.location_city.as_deref(), Some("Berlin"));
        assert_eq!(enhanced.location_country.as_deref(), Some("Germany"));
        assert_eq!(enhanced.location_region, Some(Region::Emea));
        assert!(!enhanced.remote);
    }

    #[test]
    fn test_trusts_explicit_values() {
        let mut job = draft("Senior Freelance Designer", "Remote");
        job.seniority = Seniority::Junior;
        job.employment_type = EmploymentType::PartTime;

        let enhanced = enhance_job(&job);
        assert_eq!(enhanced.seniority, Seniority::Junior);
        assert_eq!(enhanced.employment_type, EmploymentType::PartTime);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let mut job = draft("Lead Designer", "Remote - Worldwide");
        job.discipline_tags = vec!["Branding".to_string()];
        let before = job.clone();

        let enhanced = enhance_job(&job);
        assert_eq!(job, before);
        assert_eq!(enhanced.discipline_tags, vec!["branding"]);
        assert_eq!(enhanced.location_region, Some(Region::Worldwide));
        assert!(enhanced.remote);
    }

    #[test]
    fn test_remote_flag_follows_location() {
        // A feed-level remote flag does not survive a location without remote wording.
        let mut job = draft("Product Designer", "USA Only");
        job.remote = true;
        let enhanced = enhance_job(&job);
        assert!(!enhanced.remote);
        assert_eq!(enhanced.location_country.as_deref(), Some("United States"));
        assert_eq!(enhanced.location_city, None);

        let enhanced = enhance_job(&draft("Product Designer", "Remote - Americas"));
        assert!(enhanced.remote);
    }

    #[test]
    fn test_classifies_entity_encoded_description() {
        let mut job = draft("Product Designer", "Remote");
        job.description_html =
            Some("<p>Part&nbsp;time role. Strong user&nbsp;experience skills.</p>".to_string());

        let enhanced = enhance_job(&job);
        assert_eq!(enhanced.employment_type, EmploymentType::PartTime);
        assert_eq!(enhanced.discipline_tags, vec!["user experience"]);
        assert_eq!(
            enhanced.description_html.as_deref(),
            Some("<p>Part time role. Strong user experience skills.</p>")
        );
        assert_eq!(enhance_job(&enhanced), enhanced);
    }

    #[test]
    fn test_salary_bounds_ordered() {
        let mut job = draft("Designer", "Canada");
        job.salary_min = Some(120_000.0);
        job.salary_max = Some(90_000.0);
        let enhanced = enhance_job(&job);
        assert_eq!(enhanced.salary_min, Some(90_000.0));
        assert_eq!(enhanced.salary_max, Some(120_000.0));
    }

    #[test]
    fn test_enhance_is_idempotent() {
        let mut job = draft("Junior Motion Designer (part-time)", "London, UK");
        job.description_html = Some("<p>After Effects &amp; animation</p>\n\n".to_string());
        job.discipline_tags = vec!["Motion".to_string()];

        let once = enhance_job(&job);
        let twice = enhance_job(&once);
        assert_eq!(once, twice);
    }
}
