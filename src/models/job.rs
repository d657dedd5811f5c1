// src/models/job.rs
// Canonical job schema shared by every source adapter, the normalizer and the deduplicator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "full-time")]
    FullTime,
    #[serde(rename = "part-time")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "freelance")]
    Freelance,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Contract,
        EmploymentType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Contract => "contract",
            EmploymentType::Freelance => "freelance",
        }
    }

    /// Parses both our own labels and the underscore labels used by upstream feeds
    /// ("full_time", "FULLTIME", "Part-Time").
    pub fn from_label(label: &str) -> Option<Self> {
        let compact: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match compact.as_str() {
            "fulltime" => Some(EmploymentType::FullTime),
            "parttime" => Some(EmploymentType::PartTime),
            "contract" | "contractor" => Some(EmploymentType::Contract),
            "freelance" => Some(EmploymentType::Freelance),
            _ => None,
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Intern,
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl Seniority {
    pub const ALL: [Seniority; 5] = [
        Seniority::Intern,
        Seniority::Junior,
        Seniority::Mid,
        Seniority::Senior,
        Seniority::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Intern => "intern",
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "EMEA")]
    Emea,
    #[serde(rename = "Americas")]
    Americas,
    #[serde(rename = "APAC")]
    Apac,
    #[serde(rename = "Worldwide")]
    Worldwide,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Worldwide, Region::Americas, Region::Emea, Region::Apac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Emea => "EMEA",
            Region::Americas => "Americas",
            Region::Apac => "APAC",
            Region::Worldwide => "Worldwide",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured view of a free-text location string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLocation {
    pub city: Option<String>,
    pub country: Option<&'static str>,
    pub region: Option<Region>,
    pub remote: bool,
}

/// Salary bounds extracted from free text. Every field is optional; a range with only
/// `currency` set means a currency was assumed but no usable figure was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
}

/// A job posting in the unified schema. Field names match the JSON contract consumed by
/// the filter stage and the browsing front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalJob {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub location_raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_region: Option<Region>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub discipline_tags: Vec<String>,
    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub seniority: Seniority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub source: String,
    pub source_job_url: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
}

impl CanonicalJob {
    /// Minimal job with every optional field empty. Adapters fill in the rest.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        company_name: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            company_name: company_name.into(),
            location_raw: String::new(),
            location_city: None,
            location_country: None,
            location_region: None,
            remote: false,
            discipline_tags: Vec::new(),
            employment_type: EmploymentType::default(),
            seniority: Seniority::default(),
            salary_min: None,
            salary_max: None,
            currency: None,
            source: source.into(),
            source_job_url: String::new(),
            published_at,
            expires_at: None,
            featured: false,
            description_html: None,
            company_logo_url: None,
        }
    }

    pub fn apply_salary(&mut self, salary: SalaryRange) {
        self.salary_min = salary.min;
        self.salary_max = salary.max;
        self.currency = salary.currency;
    }
}
