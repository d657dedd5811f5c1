// src/main.rs
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use jobboard_lib::matching::description::extract_preview;
use jobboard_lib::matching::location::canonical_country;
use jobboard_lib::models::stats_models::DeduplicationStats;
use jobboard_lib::sources::{JSearchSource, ManualSource, RemotiveSource};
use jobboard_lib::utils::config::AggregatorConfig;
use jobboard_lib::utils::env::load_env;
use jobboard_lib::utils::format::format_salary;
use jobboard_lib::utils::progress_config::ProgressConfig;
use jobboard_lib::utils::time::format_relative_time;
use jobboard_lib::{
    aggregate, apply_filters, paginate, EmploymentType, FilterParams, HttpClient, JobSource,
    PaginatedJobs, Region, Seniority,
};

const PREVIEW_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Case-insensitive match against title, company and tags
    #[arg(short, long)]
    keyword: Option<String>,

    /// Only show remote jobs
    #[arg(long)]
    remote_only: bool,

    /// Comma-separated: full-time, part-time, contract, freelance
    #[arg(long)]
    employment_type: Option<String>,

    /// Comma-separated: intern, junior, mid, senior, lead
    #[arg(long)]
    seniority: Option<String>,

    /// Comma-separated: Worldwide, Americas, EMEA, APAC
    #[arg(long)]
    region: Option<String>,

    /// Comma-separated country names, e.g. "United States,Germany"
    #[arg(long)]
    country: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Jobs per page (max 100)
    #[arg(long)]
    per_page: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Remotive category to fetch (overrides REMOTIVE_CATEGORY)
    #[arg(long)]
    category: Option<String>,

    /// JSON file of hand-curated jobs (overrides MANUAL_JOBS_PATH)
    #[arg(long)]
    manual_jobs: Option<PathBuf>,

    /// Skip the Remotive feed
    #[arg(long)]
    no_remotive: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JobsResponse {
    #[serde(flatten)]
    page: PaginatedJobs,
    sources: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
    stats: DeduplicationStats,
}

fn parse_list<T>(raw: Option<&str>, what: &str, parse: fn(&str) -> Option<T>) -> Result<Vec<T>> {
    let mut values = Vec::new();
    for item in raw.unwrap_or("").split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match parse(item) {
            Some(value) => values.push(value),
            None => bail!("Unknown {} {:?}", what, item),
        }
    }
    Ok(values)
}

fn filter_params(args: &Args) -> Result<FilterParams> {
    Ok(FilterParams {
        keyword: args.keyword.clone(),
        remote_only: args.remote_only,
        employment_type: parse_list(args.employment_type.as_deref(), "employment type", EmploymentType::from_label)?,
        seniority: parse_list(args.seniority.as_deref(), "seniority", Seniority::from_label)?,
        location_region: parse_list(args.region.as_deref(), "region", Region::from_label)?,
        location_country: parse_list(args.country.as_deref(), "country", |c| {
            Some(canonical_country(c).map_or_else(|| c.to_string(), str::to_string))
        })?,
    })
}

fn build_sources(config: &AggregatorConfig) -> Vec<Box<dyn JobSource>> {
    let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

    if let Some(path) = &config.manual_jobs_path {
        sources.push(Box::new(ManualSource::new(path.clone())));
    }
    if config.jsearch_active() {
        sources.push(Box::new(JSearchSource::new(config.jsearch.clone())));
    }
    if config.remotive.enabled {
        sources.push(Box::new(RemotiveSource::new(config.remotive.clone())));
    }

    sources
}

fn print_table(page: &PaginatedJobs, errors: &[String]) {
    let now = Utc::now();
    println!(
        "Showing page {}/{} ({} jobs total)\n",
        page.page,
        page.total_pages.max(1),
        page.total
    );

    for (i, job) in page.jobs.iter().enumerate() {
        let rank = (page.page - 1) * page.per_page + i + 1;
        let featured = if job.featured { " ⭐" } else { "" };
        println!("[{}] {} · {}{}", rank, job.title, job.company_name, featured);

        let location = if job.location_raw.is_empty() { "Location not specified" } else { &job.location_raw };
        let remote = if job.remote { " (remote)" } else { "" };
        println!(
            "    {}{} | {} | {} | {}",
            location, remote, job.employment_type, job.seniority, job.source
        );

        let posted = format_relative_time(job.published_at, now);
        match format_salary(job) {
            Some(salary) => println!("    {} | {}", salary, posted),
            None => println!("    {}", posted),
        }

        if !job.discipline_tags.is_empty() {
            println!("    Tags: {}", job.discipline_tags.join(", "));
        }
        if let Some(html) = &job.description_html {
            let preview = extract_preview(html, PREVIEW_LENGTH);
            if !preview.is_empty() {
                println!("    {}", preview);
            }
        }
        if !job.source_job_url.is_empty() {
            println!("    {}", job.source_job_url);
        }
        println!();
    }

    for error in errors {
        println!("⚠️  {}", error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    load_env();

    let args = Args::parse();
    if args.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let filters = filter_params(&args)?;

    let mut config = AggregatorConfig::from_env();
    if let Some(category) = &args.category {
        config.remotive.category = category.clone();
    }
    if let Some(path) = &args.manual_jobs {
        config.manual_jobs_path = Some(path.clone());
    }
    if args.no_remotive {
        config.remotive.enabled = false;
    }
    config.jsearch.employment_types = filters.employment_type.clone();
    config.log_config();

    let sources = build_sources(&config);
    if sources.is_empty() {
        warn!("No job sources enabled; nothing to aggregate");
    }

    let client = HttpClient::new(&config.http).context("Failed to initialise HTTP client")?;
    let progress = ProgressConfig::from_env();

    let result = aggregate(&sources, &client, &progress).await;

    let filtered = apply_filters(&result.jobs, &filters);
    info!(
        "🔍 {} of {} jobs match the requested filters",
        filtered.len(),
        result.jobs.len()
    );
    let page = paginate(filtered, args.page, args.per_page);

    match args.format {
        OutputFormat::Json => {
            let response = JobsResponse {
                page,
                sources: result.sources,
                errors: if result.errors.is_empty() { None } else { Some(result.errors) },
                stats: result.stats,
            };
            let body = serde_json::to_string_pretty(&response).context("Failed to serialize jobs")?;
            println!("{}", body);
        }
        OutputFormat::Table => print_table(&page, &result.errors),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let types = parse_list(Some("full-time, contract"), "employment type", EmploymentType::from_label).unwrap();
        assert_eq!(types, vec![EmploymentType::FullTime, EmploymentType::Contract]);

        assert!(parse_list::<Seniority>(None, "seniority", Seniority::from_label).unwrap().is_empty());
        assert!(parse_list(Some("senior,wizard"), "seniority", Seniority::from_label).is_err());
    }

    #[test]
    fn test_filter_params_from_args() {
        let args = Args::parse_from([
            "jobboard",
            "--keyword",
            "figma",
            "--remote-only",
            "--region",
            "EMEA,apac",
            "--country",
            "germany",
        ]);
        let filters = filter_params(&args).unwrap();
        assert_eq!(filters.keyword.as_deref(), Some("figma"));
        assert!(filters.remote_only);
        assert_eq!(filters.location_region, vec![Region::Emea, Region::Apac]);
        assert_eq!(filters.location_country, vec!["Germany".to_string()]);
        assert_eq!(args.format, OutputFormat::Json);
    }
}
