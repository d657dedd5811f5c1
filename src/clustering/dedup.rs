// src/clustering/dedup.rs
// Cross-source duplicate detection and canonical record selection

use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::matching::calculate_similarity;
use crate::models::stats_models::DeduplicationStats;
use crate::models::CanonicalJob;
use crate::utils::constants::{
    source_priority, DUPLICATE_MAX_DAYS_APART, DUPLICATE_SIMILARITY_THRESHOLD,
};

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Whether two postings describe the same job.
///
/// Records sharing an id always match, and records from the same source never do.
/// Otherwise the mean of title, company and location similarity must reach the
/// threshold and the publish dates must be at most seven days apart. Location compares
/// countries when both sides know theirs, raw location text otherwise.
pub fn is_duplicate(a: &CanonicalJob, b: &CanonicalJob) -> bool {
    if a.id == b.id {
        return true;
    }
    if a.source == b.source {
        return false;
    }

    let title = calculate_similarity(&a.title, &b.title);
    let company = calculate_similarity(&a.company_name, &b.company_name);
    let location = match (&a.location_country, &b.location_country) {
        (Some(ca), Some(cb)) => calculate_similarity(ca, cb),
        _ => calculate_similarity(&a.location_raw, &b.location_raw),
    };

    let average = f64::from(title + company + location) / 3.0;
    if average < DUPLICATE_SIMILARITY_THRESHOLD {
        return false;
    }

    let millis_apart = (a.published_at - b.published_at).num_milliseconds().abs();
    millis_apart as f64 / MILLIS_PER_DAY <= DUPLICATE_MAX_DAYS_APART
}

fn canonical_order(a: &CanonicalJob, b: &CanonicalJob) -> Ordering {
    source_priority(&a.source)
        .cmp(&source_priority(&b.source))
        .then_with(|| b.published_at.cmp(&a.published_at))
}

/// Collapses duplicates, keeping one record per cluster.
///
/// Clusters are built greedily in input order: a job joins the first existing cluster
/// holding any member it duplicates, or opens a new one. Membership is not transitive
/// across clusters, so the result depends on input order. Each cluster contributes the
/// record from the highest-priority source (latest publish date on ties, then earliest
/// in the cluster), and output follows the order clusters were opened.
pub fn deduplicate(jobs: &[CanonicalJob]) -> Vec<CanonicalJob> {
    let mut clusters: Vec<Vec<&CanonicalJob>> = Vec::new();

    for job in jobs {
        match clusters
            .iter_mut()
            .find(|cluster| cluster.iter().any(|member| is_duplicate(job, member)))
        {
            Some(cluster) => cluster.push(job),
            None => clusters.push(vec![job]),
        }
    }

    clusters
        .into_iter()
        .filter_map(|mut cluster| {
            if cluster.len() > 1 {
                debug!(
                    "Duplicate cluster of {} jobs: {}",
                    cluster.len(),
                    cluster.iter().map(|j| j.id.as_str()).collect::<Vec<_>>().join(", ")
                );
            }
            // sort_by is stable, so equal candidates keep cluster order
            cluster.sort_by(|a, b| canonical_order(a, b));
            cluster.first().map(|best| (*best).clone())
        })
        .collect()
}

/// Before/after counts for one deduplication pass.
pub fn deduplication_stats(
    original: &[CanonicalJob],
    deduplicated: &[CanonicalJob],
) -> DeduplicationStats {
    let duplicates_removed = original.len().saturating_sub(deduplicated.len());
    let duplicate_rate = if original.is_empty() {
        0.0
    } else {
        let rate = duplicates_removed as f64 / original.len() as f64 * 100.0;
        (rate * 100.0).round() / 100.0
    };

    let mut source_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    for job in deduplicated {
        *source_breakdown.entry(job.source.clone()).or_insert(0) += 1;
    }

    DeduplicationStats {
        original_count: original.len(),
        deduplicated_count: deduplicated.len(),
        duplicates_removed,
        duplicate_rate,
        source_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn job(id: &str, source: &str, title: &str, company: &str, day: u32) -> CanonicalJob {
        let published = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        let mut job = CanonicalJob::new(id, title, company, source, published);
        job.location_raw = "Remote".to_string();
        job
    }

    #[test]
    fn test_cross_source_near_duplicates() {
        let a = job("remotive-1", "Remotive", "Senior Product Designer", "Acme Inc", 1);
        let b = job("jsearch-9", "JSearch", "Senior Product Designer", "Acme Inc.", 4);
        assert!(is_duplicate(&a, &b));
        assert!(is_duplicate(&b, &a));
    }

    #[test]
    fn test_same_source_never_duplicates() {
        let a = job("remotive-1", "Remotive", "Product Designer", "Acme", 1);
        let b = job("remotive-2", "Remotive", "Product Designer", "Acme", 1);
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_same_id_always_duplicates() {
        let a = job("manual-1", "Manual", "Product Designer", "Acme", 1);
        let b = job("manual-1", "Remotive", "Illustrator", "Other Co", 20);
        assert!(is_duplicate(&a, &b));
    }

    #[test]
    fn test_date_window() {
        let a = job("remotive-1", "Remotive", "Product Designer", "Acme", 1);
        let mut b = job("jsearch-1", "JSearch", "Product Designer", "Acme", 8);
        assert!(is_duplicate(&a, &b));

        b.published_at = a.published_at + Duration::days(7) + Duration::milliseconds(1);
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_location_uses_country_only_when_both_known() {
        let mut a = job("remotive-1", "Remotive", "Product Designer", "Acme", 1);
        let mut b = job("jsearch-1", "JSearch", "Product Designer", "Acme", 1);
        a.location_raw = "Berlin, Germany".to_string();
        b.location_raw = "Germany (Hybrid)".to_string();
        a.location_country = Some("Germany".to_string());
        b.location_country = Some("Germany".to_string());
        assert!(is_duplicate(&a, &b));

        // Unknown on one side: raw strings are compared instead.
        b.location_country = None;
        b.location_raw = "Tokyo".to_string();
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_similarity_threshold_is_inclusive() {
        let mut a = job("remotive-1", "Remotive", "Product Designer", "Acme", 1);
        let mut b = job("jsearch-1", "JSearch", "Product Designer", "Acme", 1);

        // 100 + 100 + 55 averages to exactly 85.
        a.location_raw = "Remote".to_string();
        b.location_raw = "Remote (US)".to_string();
        assert_eq!(calculate_similarity(&a.location_raw, &b.location_raw), 55);
        assert!(is_duplicate(&a, &b));

        // 100 + 100 + 54 averages to 84.67.
        a.location_raw = "Paris, Texas".to_string();
        b.location_raw = "Paris, France".to_string();
        assert_eq!(calculate_similarity(&a.location_raw, &b.location_raw), 54);
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_dissimilar_titles_are_distinct() {
        let a = job("remotive-1", "Remotive", "Product Designer", "Acme", 1);
        let b = job("jsearch-1", "JSearch", "Motion Graphics Artist", "Acme", 1);
        assert!(!is_duplicate(&a, &b));
    }

    #[test]
    fn test_deduplicate_keeps_highest_priority_source() {
        let jobs = vec![
            job("remotive-1", "Remotive", "Product Designer", "Acme", 1),
            job("other-1", "Other", "Brand Designer", "Globex", 2),
            job("jsearch-1", "JSearch", "Product Designer", "Acme", 3),
            job("manual-1", "Manual", "Product Designer", "Acme", 2),
        ];

        let result = deduplicate(&jobs);
        let ids: Vec<&str> = result.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["manual-1", "other-1"]);
    }

    #[test]
    fn test_priority_ties_prefer_latest_then_first() {
        let mut older = job("a-1", "Alpha", "Product Designer", "Acme", 1);
        let newer = job("b-1", "Beta", "Product Designer", "Acme", 5);
        let jobs = vec![older.clone(), newer];
        assert_eq!(deduplicate(&jobs)[0].id, "b-1");

        // Same priority and same date: the earlier cluster member wins.
        older.published_at = jobs[1].published_at;
        let jobs = vec![older, jobs[1].clone()];
        assert_eq!(deduplicate(&jobs)[0].id, "a-1");
    }

    #[test]
    fn test_greedy_clustering_is_not_transitive() {
        // b duplicates a and c, but a and c are too far apart in time to match directly.
        let a = job("x-1", "Xsrc", "Product Designer", "Acme", 1);
        let c = job("z-1", "Zsrc", "Product Designer", "Acme", 12);
        let b = job("y-1", "Ysrc", "Product Designer", "Acme", 7);

        // a and c open separate clusters; b joins the first one it matches.
        let result = deduplicate(&[a.clone(), c.clone(), b.clone()]);
        assert_eq!(result.len(), 2);

        // b first: both a and c join its cluster.
        let result = deduplicate(&[b, a, c]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_deduplicate_empty_and_stats() {
        assert!(deduplicate(&[]).is_empty());
        assert_eq!(deduplication_stats(&[], &[]), DeduplicationStats::default());

        let jobs = vec![
            job("remotive-1", "Remotive", "Product Designer", "Acme", 1),
            job("jsearch-1", "JSearch", "Product Designer", "Acme", 2),
            job("remotive-2", "Remotive", "Illustrator", "Globex", 2),
        ];
        let deduped = deduplicate(&jobs);
        let stats = deduplication_stats(&jobs, &deduped);

        assert_eq!(stats.original_count, 3);
        assert_eq!(stats.deduplicated_count, 2);
        assert_eq!(stats.duplicates_removed, 1);
        assert_eq!(stats.duplicate_rate, 33.33);
        assert_eq!(stats.source_breakdown.get("JSearch"), Some(&1));
        assert_eq!(stats.source_breakdown.get("Remotive"), Some(&1));
    }
}
