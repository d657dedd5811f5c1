// src/utils/config.rs

use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::{
    CACHE_CAPACITY, CACHE_DURATION, DEFAULT_JSEARCH_API_URL, DEFAULT_JSEARCH_QUERY,
    DEFAULT_REMOTIVE_API_URL, DEFAULT_REMOTIVE_CATEGORY,
};
use super::env::{env_opt, env_or};
use crate::models::EmploymentType;

/// Settings for the Remotive feed.
#[derive(Debug, Clone)]
pub struct RemotiveConfig {
    pub enabled: bool,
    pub api_url: String,
    pub category: String,
}

/// Settings for the JSearch feed. Off unless explicitly enabled with an API key, since
/// every request is billed.
#[derive(Debug, Clone)]
pub struct JSearchConfig {
    pub enabled: bool,
    pub api_url: String,
    pub api_key: Option<String>,
    pub query: String,
    pub remote_only: bool,
    /// Narrows the upstream search; empty asks for every employment type.
    pub employment_types: Vec<EmploymentType>,
}

/// HTTP behaviour shared by all network sources.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_retries: usize,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 2,
            cache_ttl: CACHE_DURATION,
            cache_capacity: CACHE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub remotive: RemotiveConfig,
    pub jsearch: JSearchConfig,
    pub manual_jobs_path: Option<PathBuf>,
    pub http: HttpConfig,
}

impl AggregatorConfig {
    pub fn from_env() -> Self {
        let remotive = RemotiveConfig {
            enabled: env_or("REMOTIVE_ENABLED", true),
            api_url: env_opt("REMOTIVE_API_URL")
                .unwrap_or_else(|| DEFAULT_REMOTIVE_API_URL.to_string()),
            category: env_opt("REMOTIVE_CATEGORY")
                .unwrap_or_else(|| DEFAULT_REMOTIVE_CATEGORY.to_string()),
        };

        let api_key = env_opt("JSEARCH_API_KEY");
        let jsearch = JSearchConfig {
            enabled: env_or("JSEARCH_ENABLED", false),
            api_url: env_opt("JSEARCH_API_URL")
                .unwrap_or_else(|| DEFAULT_JSEARCH_API_URL.to_string()),
            api_key,
            query: env_opt("JSEARCH_QUERY").unwrap_or_else(|| DEFAULT_JSEARCH_QUERY.to_string()),
            remote_only: env_or("JSEARCH_REMOTE_ONLY", true),
            employment_types: Vec::new(),
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout: Duration::from_secs(env_or("HTTP_TIMEOUT_SECS", defaults.timeout.as_secs())),
            max_retries: env_or("HTTP_MAX_RETRIES", defaults.max_retries),
            cache_ttl: Duration::from_secs(env_or("CACHE_TTL_SECS", defaults.cache_ttl.as_secs())),
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity).max(1),
        };

        Self {
            remotive,
            jsearch,
            manual_jobs_path: env_opt("MANUAL_JOBS_PATH").map(PathBuf::from),
            http,
        }
    }

    /// JSearch is only usable with a key; an enabled feed without one is skipped.
    pub fn jsearch_active(&self) -> bool {
        self.jsearch.enabled && self.jsearch.api_key.is_some()
    }

    pub fn log_config(&self) {
        if self.remotive.enabled {
            info!("🌐 Remotive feed ENABLED");
            info!("   URL: {} (category: {})", self.remotive.api_url, self.remotive.category);
        } else {
            info!("🌐 Remotive feed DISABLED");
        }

        if self.jsearch_active() {
            info!("🔎 JSearch feed ENABLED");
            info!("   Query: {:?} (remote only: {})", self.jsearch.query, self.jsearch.remote_only);
        } else if self.jsearch.enabled {
            warn!("🔎 JSearch feed requested but JSEARCH_API_KEY is not set - skipping");
        } else {
            info!("🔎 JSearch feed DISABLED to conserve API credits");
        }

        match &self.manual_jobs_path {
            Some(path) => info!("📄 Manual jobs file: {}", path.display()),
            None => info!("📄 No manual jobs file configured"),
        }

        info!(
            "⚙️  HTTP: timeout {}s, {} retries, cache {}s x {} entries",
            self.http.timeout.as_secs(),
            self.http.max_retries,
            self.http.cache_ttl.as_secs(),
            self.http.cache_capacity
        );
    }
}
