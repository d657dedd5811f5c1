// src/matching/location.rs
// Free-text location classification: remote flag, country, region and city

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ParsedLocation, Region};

const REMOTE_PATTERN: &str =
    r"\b(remote|anywhere|worldwide|global|distributed|work from home|wfh)\b";
const WORLDWIDE_PATTERN: &str = r"\b(worldwide|global)\b";
const CITY_EXCLUSION_PATTERN: &str = r"(?i)\b(remote|worldwide|global)\b";

// Order matters: the first matching entry wins. "us" and "america" are deliberately
// loose, so anything mentioning them lands in the United States before later entries
// get a chance.
const COUNTRY_PATTERNS: [(&str, &str); 28] = [
    // Americas
    ("United States", r"\b(usa?|united states|america|us\b)"),
    ("Canada", r"\b(canada|canadian)\b"),
    ("Mexico", r"\b(mexico|mexican)\b"),
    ("Brazil", r"\b(brazil|brazilian)\b"),
    ("Argentina", r"\b(argentina|argentinian)\b"),
    // EMEA
    ("United Kingdom", r"\b(uk|united kingdom|britain|british|england|scotland|wales)\b"),
    ("Germany", r"\b(germany|german|deutschland)\b"),
    ("France", r"\b(france|french)\b"),
    ("Netherlands", r"\b(netherlands|dutch|holland)\b"),
    ("Sweden", r"\b(sweden|swedish)\b"),
    ("Denmark", r"\b(denmark|danish)\b"),
    ("Norway", r"\b(norway|norwegian)\b"),
    ("Finland", r"\b(finland|finnish)\b"),
    ("Ireland", r"\b(ireland|irish)\b"),
    ("Switzerland", r"\b(switzerland|swiss)\b"),
    ("Austria", r"\b(austria|austrian)\b"),
    ("Spain", r"\b(spain|spanish)\b"),
    ("Italy", r"\b(italy|italian)\b"),
    ("Poland", r"\b(poland|polish)\b"),
    ("Czech Republic", r"\b(czech republic|czechia|czech)\b"),
    ("Portugal", r"\b(portugal|portuguese)\b"),
    ("Belgium", r"\b(belgium|belgian)\b"),
    // APAC
    ("Australia", r"\b(australia|australian|aus)\b"),
    ("Singapore", r"\b(singapore|singaporean)\b"),
    ("Japan", r"\b(japan|japanese)\b"),
    ("South Korea", r"\b(south korea|korea|korean)\b"),
    ("India", r"\b(india|indian)\b"),
    ("New Zealand", r"\b(new zealand|nz)\b"),
];

const COUNTRY_REGIONS: [(&str, Region); 28] = [
    ("United States", Region::Americas),
    ("Canada", Region::Americas),
    ("Mexico", Region::Americas),
    ("Brazil", Region::Americas),
    ("Argentina", Region::Americas),
    ("United Kingdom", Region::Emea),
    ("Germany", Region::Emea),
    ("France", Region::Emea),
    ("Netherlands", Region::Emea),
    ("Sweden", Region::Emea),
    ("Denmark", Region::Emea),
    ("Norway", Region::Emea),
    ("Finland", Region::Emea),
    ("Ireland", Region::Emea),
    ("Switzerland", Region::Emea),
    ("Austria", Region::Emea),
    ("Spain", Region::Emea),
    ("Italy", Region::Emea),
    ("Poland", Region::Emea),
    ("Czech Republic", Region::Emea),
    ("Portugal", Region::Emea),
    ("Belgium", Region::Emea),
    ("Australia", Region::Apac),
    ("Singapore", Region::Apac),
    ("Japan", Region::Apac),
    ("South Korea", Region::Apac),
    ("India", Region::Apac),
    ("New Zealand", Region::Apac),
];

const REGION_PATTERNS: [(Region, &str); 3] = [
    (Region::Emea, r"\b(emea|europe|european|eu)\b"),
    (Region::Americas, r"\b(americas?|north america|south america|latam)\b"),
    (Region::Apac, r"\b(apac|asia pacific|asian)\b"),
];

static REMOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(REMOTE_PATTERN).unwrap());
static WORLDWIDE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(WORLDWIDE_PATTERN).unwrap());
static CITY_EXCLUSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(CITY_EXCLUSION_PATTERN).unwrap());

static COUNTRY_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    COUNTRY_PATTERNS
        .iter()
        .map(|(country, pattern)| (*country, Regex::new(pattern).unwrap()))
        .collect()
});

static REGION_RES: Lazy<Vec<(Region, Regex)>> = Lazy::new(|| {
    REGION_PATTERNS
        .iter()
        .map(|(region, pattern)| (*region, Regex::new(pattern).unwrap()))
        .collect()
});

/// Region for a canonical country name from the static lookup table.
pub fn region_for_country(country: &str) -> Option<Region> {
    COUNTRY_REGIONS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, region)| *region)
}

/// Canonical spelling for a country name known to the lookup table, matched
/// case-insensitively.
pub fn canonical_country(country: &str) -> Option<&'static str> {
    COUNTRY_REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country.trim()))
        .map(|(name, _)| *name)
}

/// Classifies a free-text location. Never fails; missing signal leaves fields empty.
pub fn parse_location(location_raw: &str) -> ParsedLocation {
    let location = location_raw.trim().to_lowercase();

    let remote = REMOTE_RE.is_match(&location);

    let mut country = None;
    let mut region = None;

    if let Some((name, _)) = COUNTRY_RES.iter().find(|(_, re)| re.is_match(&location)) {
        country = Some(*name);
        region = region_for_country(name);
    }

    if region.is_none() {
        region = REGION_RES
            .iter()
            .find(|(_, re)| re.is_match(&location))
            .map(|(region, _)| *region);
    }

    // Worldwide remote postings are not pinned to a country's region.
    if remote && WORLDWIDE_RE.is_match(&location) {
        region = Some(Region::Worldwide);
    }

    let city = if remote {
        None
    } else {
        extract_city(location_raw)
    };

    ParsedLocation {
        city,
        country,
        region,
        remote,
    }
}

fn extract_city(location_raw: &str) -> Option<String> {
    let parts: Vec<&str> = location_raw.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }
    let first = parts[0];
    if first.is_empty() || CITY_EXCLUSION_RE.is_match(first) {
        return None;
    }
    Some(first.to_string())
}
