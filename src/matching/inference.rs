// src/matching/inference.rs
// Keyword-driven classification of seniority, employment type, salary and discipline tags.
// Every function here is total: no keyword match means the documented default.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::models::{EmploymentType, SalaryRange, Seniority};
use crate::utils::constants::{MAX_DISCIPLINE_TAGS, MIN_TAG_LENGTH, SALARY_FLOOR};

// Evaluated top to bottom, first match wins. The senior rule already contains "lead",
// so the lead rule only fires for text the senior rule missed (in practice: never).
// Kept in this order so classifications stay stable for existing listings.
const SENIORITY_RULES: [(&str, Seniority); 4] = [
    (
        r"\b(senior|sr\.?|lead|principal|staff|architect|head of|director)\b",
        Seniority::Senior,
    ),
    (r"\b(lead|team lead|tech lead|design lead)\b", Seniority::Lead),
    (r"\b(junior|jr\.?|entry|graduate|trainee|associate)\b", Seniority::Junior),
    (r"\b(intern|internship|student|co-op|coop)\b", Seniority::Intern),
];

// Same shape as above. "freelance" is claimed by the contract rule, so the freelance rule
// only catches freelancer/independent/gig.
const EMPLOYMENT_TYPE_RULES: [(&str, EmploymentType); 3] = [
    (
        r"\b(contract|contractor|freelance|consultant|temp|temporary|project-based)\b",
        EmploymentType::Contract,
    ),
    (r"\b(part.?time|part.time|parttime|p/t)\b", EmploymentType::PartTime),
    (r"\b(freelance|freelancer|independent|gig)\b", EmploymentType::Freelance),
];

// Checked in order; a later hit overrides an earlier one.
const CURRENCY_MARKERS: [(&[&str], &str); 4] = [
    (&["€", "eur"], "EUR"),
    (&["£", "gbp"], "GBP"),
    (&["cad"], "CAD"),
    (&["aud"], "AUD"),
];
const DEFAULT_CURRENCY: &str = "USD";

const SALARY_NUMBER_PATTERN: &str = r"\$?(\d+(?:\.\d+)?)(k?)";

pub const DESIGN_KEYWORDS: [&str; 29] = [
    "figma", "sketch", "adobe", "photoshop", "illustrator", "indesign",
    "ui/ux", "ui", "ux", "user experience", "user interface",
    "prototype", "prototyping", "wireframe", "wireframing",
    "visual design", "graphic design", "web design", "mobile design",
    "interaction design", "motion design", "animation",
    "design system", "design systems", "branding", "brand design",
    "typography", "layout", "color theory",
];

static SENIORITY_RES: Lazy<Vec<(Regex, Seniority)>> = Lazy::new(|| {
    SENIORITY_RULES
        .iter()
        .map(|(pattern, level)| (Regex::new(pattern).unwrap(), *level))
        .collect()
});

static EMPLOYMENT_TYPE_RES: Lazy<Vec<(Regex, EmploymentType)>> = Lazy::new(|| {
    EMPLOYMENT_TYPE_RULES
        .iter()
        .map(|(pattern, kind)| (Regex::new(pattern).unwrap(), *kind))
        .collect()
});

static SALARY_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(SALARY_NUMBER_PATTERN).unwrap());

fn join_lowercase(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .map(|p| p.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Seniority from title and description. Defaults to `Mid`.
pub fn parse_seniority(title: &str, description: Option<&str>) -> Seniority {
    let text = join_lowercase(&[Some(title), description]);
    SENIORITY_RES
        .iter()
        .find(|(re, _)| re.is_match(&text))
        .map(|(_, level)| *level)
        .unwrap_or_default()
}

/// Employment type from an optional feed label, title and description. Defaults to
/// `FullTime`.
pub fn parse_employment_type(
    job_type: Option<&str>,
    title: Option<&str>,
    description: Option<&str>,
) -> EmploymentType {
    let text = join_lowercase(&[job_type, title, description]);
    EMPLOYMENT_TYPE_RES
        .iter()
        .find(|(re, _)| re.is_match(&text))
        .map(|(_, kind)| *kind)
        .unwrap_or_default()
}

/// Reads a salary range out of free text such as "$80k - $120k" or "€50,000 per year".
///
/// Absent or empty text yields an empty range. Otherwise the currency is always set
/// (USD unless a marker says otherwise) and numbers at or below the salary floor are
/// ignored, so "5 years experience, $50,000" gives a minimum of 50000 only.
pub fn parse_salary(salary_text: Option<&str>) -> SalaryRange {
    let raw = match salary_text {
        Some(t) if !t.is_empty() => t,
        _ => return SalaryRange::default(),
    };

    let text = raw.to_lowercase().replace(',', "");

    let mut currency = DEFAULT_CURRENCY;
    for (markers, code) in CURRENCY_MARKERS.iter() {
        if markers.iter().any(|m| text.contains(*m)) {
            currency = *code;
        }
    }

    let mut numbers: Vec<f64> = SALARY_NUMBER_RE
        .captures_iter(&text)
        .filter_map(|caps| {
            let value: f64 = caps.get(1)?.as_str().parse().ok()?;
            let thousands = caps.get(2).map_or(false, |k| !k.as_str().is_empty());
            Some(if thousands { value * 1000.0 } else { value })
        })
        .filter(|n| *n > SALARY_FLOOR)
        .collect();
    numbers.sort_by(|a, b| a.total_cmp(b));

    let currency = Some(currency.to_string());
    match numbers.as_slice() {
        [] => SalaryRange {
            currency,
            ..Default::default()
        },
        [only] => SalaryRange {
            min: Some(*only),
            max: None,
            currency,
        },
        [first, .., last] => SalaryRange {
            min: Some(*first),
            max: Some(*last),
            currency,
        },
    }
}

/// Merges existing tags with design keywords found in the title and description.
///
/// Existing tags come first (lower-cased, first occurrence kept), then keywords in
/// vocabulary order. Tags shorter than three characters are dropped and the result is
/// capped at ten entries in insertion order.
pub fn extract_discipline_tags(
    title: &str,
    description: Option<&str>,
    existing_tags: Option<&[String]>,
) -> Vec<String> {
    let text = join_lowercase(&[Some(title), description]);

    let mut seen: HashSet<String> = HashSet::new();
    let mut tags: Vec<String> = Vec::new();
    let mut push = |tag: String| {
        if seen.insert(tag.clone()) {
            tags.push(tag);
        }
    };

    for tag in existing_tags.unwrap_or(&[]) {
        push(tag.to_lowercase());
    }
    for keyword in DESIGN_KEYWORDS.iter() {
        if text.contains(keyword) {
            push(keyword.to_string());
        }
    }

    tags.into_iter()
        .filter(|tag| tag.chars().count() >= MIN_TAG_LENGTH)
        .take(MAX_DISCIPLINE_TAGS)
        .collect()
}
