// src/utils/logging.rs - Phase logging helpers for the aggregation pipeline
use log::{info, warn};
use std::time::Instant;

use crate::models::stats_models::DeduplicationStats;

#[derive(Clone)]
pub struct PipelineLogger {
    stage_name: &'static str,
    stage_emoji: &'static str,
    start_time: Instant,
}

impl PipelineLogger {
    pub fn new(stage_name: &'static str, stage_emoji: &'static str) -> Self {
        Self {
            stage_name,
            stage_emoji,
            start_time: Instant::now(),
        }
    }

    pub fn log_start(&self, source_count: usize) {
        info!(
            "[{}] {} 🚀 Starting aggregation over {} source(s)",
            self.stage_name, self.stage_emoji, source_count
        );
    }

    pub fn log_phase(&self, phase: &str, details: Option<&str>) {
        let elapsed = self.start_time.elapsed();
        match details {
            Some(details) => info!(
                "[{}] {} 🔄 Phase: {} - {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, details, elapsed.as_secs_f32()
            ),
            None => info!(
                "[{}] {} 🔄 Phase: {} [+{:.1}s]",
                self.stage_name, self.stage_emoji, phase, elapsed.as_secs_f32()
            ),
        }
    }

    pub fn log_source_fetched(&self, source: &str, count: usize) {
        info!(
            "[{}] {} 📊 Fetched {} jobs from {}",
            self.stage_name, self.stage_emoji, count, source
        );
    }

    pub fn log_source_failed(&self, source: &str, error: &anyhow::Error) {
        warn!(
            "[{}] {} ⚠️  {} failed, continuing without it: {:#}",
            self.stage_name, self.stage_emoji, source, error
        );
    }

    pub fn log_dedup(&self, stats: &DeduplicationStats) {
        if stats.duplicates_removed > 0 {
            info!(
                "[{}] {} 🧹 Deduplication: {} → {} jobs ({} removed, {:.2}%)",
                self.stage_name,
                self.stage_emoji,
                stats.original_count,
                stats.deduplicated_count,
                stats.duplicates_removed,
                stats.duplicate_rate
            );
        } else {
            info!(
                "[{}] {} ✨ Deduplication: no cross-source duplicates among {} jobs",
                self.stage_name, self.stage_emoji, stats.original_count
            );
        }
    }

    pub fn log_complete(&self, total_jobs: usize, error_count: usize) {
        let elapsed = self.start_time.elapsed();
        if error_count > 0 {
            warn!(
                "[{}] {} ✅ Completed with {} jobs and {} source error(s) in {:.2}s",
                self.stage_name, self.stage_emoji, total_jobs, error_count, elapsed.as_secs_f32()
            );
        } else {
            info!(
                "[{}] {} ✅ Completed with {} jobs in {:.2}s",
                self.stage_name, self.stage_emoji, total_jobs, elapsed.as_secs_f32()
            );
        }
    }
}
