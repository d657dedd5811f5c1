// src/aggregation.rs
// Fetch -> normalize -> deduplicate

use futures::future::join_all;
use log::debug;
use std::collections::BTreeMap;

use crate::clustering::dedup::{deduplicate, deduplication_stats};
use crate::models::stats_models::DeduplicationStats;
use crate::models::CanonicalJob;
use crate::normalization::enhance_job;
use crate::sources::{http::HttpClient, JobSource};
use crate::utils::logging::PipelineLogger;
use crate::utils::progress_config::ProgressConfig;

/// Outcome of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    /// Normalized, deduplicated jobs.
    pub jobs: Vec<CanonicalJob>,
    /// Jobs fetched per source that succeeded, before deduplication.
    pub sources: BTreeMap<String, usize>,
    /// One `"{source}: {message}"` entry per failed source.
    pub errors: Vec<String>,
    pub stats: DeduplicationStats,
}

fn normalize(batches: Vec<Vec<CanonicalJob>>) -> Vec<CanonicalJob> {
    batches
        .into_iter()
        .flatten()
        .map(|job| enhance_job(&job))
        .collect()
}

/// Flattens per-source batches (in the order given), enhances every record and
/// collapses cross-source duplicates.
pub fn normalize_and_deduplicate(batches: Vec<Vec<CanonicalJob>>) -> Vec<CanonicalJob> {
    deduplicate(&normalize(batches))
}

/// Fetches every source concurrently and merges the results.
///
/// A failing source is logged and reported in `errors`; the remaining sources still
/// contribute. Batches are merged in the order of `sources`, so deduplication is
/// deterministic regardless of which fetch finishes first.
pub async fn aggregate(
    sources: &[Box<dyn JobSource>],
    client: &HttpClient,
    progress: &ProgressConfig,
) -> AggregationResult {
    let logger = PipelineLogger::new("AGGREGATE", "🗂️");
    logger.log_start(sources.len());

    let multi_progress = progress.create_multi_progress();

    logger.log_phase("Fetching sources", None);
    let fetches = sources.iter().map(|source| {
        let spinner = multi_progress
            .as_ref()
            .map(|mp| progress.add_spinner(mp, format!("Fetching {}...", source.name())));
        async move {
            let outcome = source.fetch(client).await;
            if let Some(pb) = spinner {
                match &outcome {
                    Ok(jobs) => pb.finish_with_message(format!("{}: {} jobs", source.name(), jobs.len())),
                    Err(_) => pb.abandon_with_message(format!("{}: failed", source.name())),
                }
            }
            (source.name(), outcome)
        }
    });
    let outcomes = join_all(fetches).await;

    let mut batches = Vec::with_capacity(outcomes.len());
    let mut counts = BTreeMap::new();
    let mut errors = Vec::new();

    for (name, outcome) in outcomes {
        match outcome {
            Ok(jobs) => {
                logger.log_source_fetched(name, jobs.len());
                counts.insert(name.to_string(), jobs.len());
                batches.push(jobs);
            }
            Err(e) => {
                logger.log_source_failed(name, &e);
                errors.push(format!("{}: {:#}", name, e));
            }
        }
    }

    logger.log_phase("Normalizing", Some(format!("{} batches", batches.len()).as_str()));
    let normalized = normalize(batches);

    logger.log_phase("Deduplicating", Some(format!("{} jobs", normalized.len()).as_str()));
    let jobs = deduplicate(&normalized);
    let stats = deduplication_stats(&normalized, &jobs);
    logger.log_dedup(&stats);
    debug!("Surviving jobs per source: {:?}", stats.source_breakdown);

    logger.log_complete(jobs.len(), errors.len());

    AggregationResult {
        jobs,
        sources: counts,
        errors,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use chrono::{Duration, TimeZone, Utc};
    use futures::future::{BoxFuture, FutureExt};

    use crate::models::{EmploymentType, Region, Seniority};

    struct StubSource {
        name: &'static str,
        outcome: std::result::Result<Vec<CanonicalJob>, &'static str>,
    }

    impl JobSource for StubSource {
        fn name(&self) -> &str {
            self.name
        }

        fn fetch<'a>(&'a self, _client: &'a HttpClient) -> BoxFuture<'a, Result<Vec<CanonicalJob>>> {
            async move {
                match &self.outcome {
                    Ok(jobs) => Ok(jobs.clone()),
                    Err(message) => Err(anyhow!("{}", message)),
                }
            }
            .boxed()
        }
    }

    fn draft(id: &str, source: &str, title: &str, company: &str, days_after: i64) -> CanonicalJob {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut job = CanonicalJob::new(id, title, company, source, base + Duration::days(days_after));
        job.location_raw = "Remote - Worldwide".to_string();
        job
    }

    fn quiet() -> ProgressConfig {
        ProgressConfig {
            enabled: false,
            ..ProgressConfig::default()
        }
    }

    #[test]
    fn test_near_duplicates_collapse_to_priority_source() {
        let remotive = vec![draft("remotive-1", "Remotive", "Senior Product Designer", "Acme Inc", 0)];
        let jsearch = vec![draft("jsearch-1", "JSearch", "Senior Product Designer", "Acme Inc.", 3)];

        let jobs = normalize_and_deduplicate(vec![remotive, jsearch]);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "jsearch-1");
        assert_eq!(jobs[0].seniority, Seniority::Senior);
        assert_eq!(jobs[0].location_region, Some(Region::Worldwide));
    }

    #[test]
    fn test_same_source_duplicates_are_kept() {
        let batch = vec![
            draft("remotive-1", "Remotive", "Product Designer", "Acme", 0),
            draft("remotive-2", "Remotive", "Product Designer", "Acme", 0),
        ];
        assert_eq!(normalize_and_deduplicate(vec![batch]).len(), 2);
    }

    #[test]
    fn test_normalize_and_deduplicate_is_idempotent() {
        let mut encoded = draft("remotive-3", "Remotive", "Visual Designer", "Umbrella", 4);
        encoded.description_html =
            Some("<p>Part&nbsp;time role.&nbsp;Strong user&nbsp;experience skills.</p>".to_string());

        let batches = vec![
            vec![
                draft("remotive-1", "Remotive", "Junior UI Designer", "Acme", 0),
                draft("remotive-2", "Remotive", "Freelance Illustrator", "Globex", 1),
                encoded,
            ],
            vec![
                draft("jsearch-1", "JSearch", "Junior UI Designer", "Acme", 2),
                draft("jsearch-2", "JSearch", "Part-time Brand Designer", "Initech", 5),
            ],
        ];

        let once = normalize_and_deduplicate(batches);
        let twice = normalize_and_deduplicate(vec![once.clone()]);
        assert_eq!(once.len(), 4);
        assert_eq!(once, twice);

        let visual = once.iter().find(|j| j.id == "remotive-3").unwrap();
        assert_eq!(visual.employment_type, EmploymentType::PartTime);
        assert!(visual.discipline_tags.contains(&"user experience".to_string()));
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_and_deduplicate(Vec::new()).is_empty());
        assert!(normalize_and_deduplicate(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_survives_failing_source() {
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(StubSource {
                name: "Remotive",
                outcome: Err("API request failed with status: 503 Service Unavailable"),
            }),
            Box::new(StubSource {
                name: "Manual",
                outcome: Ok(vec![
                    draft("manual-1", "Manual", "Product Designer", "Acme", 0),
                    draft("manual-2", "Manual", "Motion Designer", "Globex", 0),
                ]),
            }),
        ];
        let client = HttpClient::new(&Default::default()).unwrap();

        let result = aggregate(&sources, &client, &quiet()).await;

        assert_eq!(result.jobs.len(), 2);
        assert_eq!(
            result.errors,
            vec!["Remotive: API request failed with status: 503 Service Unavailable".to_string()]
        );
        assert_eq!(result.sources.get("Manual"), Some(&2));
        assert_eq!(result.sources.get("Remotive"), None);
        assert_eq!(result.stats.original_count, 2);
        assert_eq!(result.stats.duplicates_removed, 0);
    }

    #[tokio::test]
    async fn test_aggregate_deduplicates_across_sources() {
        let sources: Vec<Box<dyn JobSource>> = vec![
            Box::new(StubSource {
                name: "Remotive",
                outcome: Ok(vec![draft("remotive-7", "Remotive", "Product Designer", "Acme", 1)]),
            }),
            Box::new(StubSource {
                name: "Manual",
                outcome: Ok(vec![draft("manual-1", "Manual", "Product Designer", "Acme", 0)]),
            }),
        ];
        let client = HttpClient::new(&Default::default()).unwrap();

        let result = aggregate(&sources, &client, &quiet()).await;

        assert!(result.errors.is_empty());
        assert_eq!(result.jobs.len(), 1);
        assert_eq!(result.jobs[0].source, "Manual");
        assert_eq!(result.sources.get("Remotive"), Some(&1));
        assert_eq!(result.stats.duplicates_removed, 1);
        assert_eq!(result.stats.duplicate_rate, 50.0);
    }
}
