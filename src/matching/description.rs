// src/matching/description.rs
// Job description text helpers: entity decoding for normalization, plain-text previews
// for terminal output

use once_cell::sync::Lazy;
use regex::Regex;

// Decoded in this order, so "&amp;lt;" ends up as "<".
const BASIC_ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

const EXTENDED_ENTITIES: [(&str, &str); 3] = [("&quot;", "\""), ("&#x27;", "'"), ("&#x2F;", "/")];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

fn decode_entities(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Light cleanup applied during normalization: decodes `&nbsp;`, `&amp;`, `&lt;` and
/// `&gt;`, collapses whitespace runs and trims. Markup is left in place.
pub fn clean_job_description(html: &str) -> String {
    collapse_whitespace(&decode_entities(html, &BASIC_ENTITIES))
}

/// Strips tags and decodes entities, leaving single-spaced plain text.
pub fn plain_text_from_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = decode_entities(&decode_entities(&without_tags, &BASIC_ENTITIES), &EXTENDED_ENTITIES);
    collapse_whitespace(&decoded)
}

/// Short summary of a description: whole sentences while they fit in `max_len`
/// characters, otherwise the text cut at the last word boundary with an ellipsis.
pub fn extract_preview(html: &str, max_len: usize) -> String {
    let plain = plain_text_from_html(html);
    if plain.chars().count() <= max_len {
        return plain;
    }

    let mut preview = String::new();
    for sentence in SENTENCE_SPLIT_RE.split(&plain) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let candidate_len = preview.chars().count() + 1 + sentence.chars().count();
        if candidate_len > max_len {
            break;
        }
        if !preview.is_empty() {
            preview.push(' ');
        }
        preview.push_str(sentence);
        preview.push('.');
    }

    if preview.is_empty() {
        let head: String = plain.chars().take(max_len).collect();
        let mut words: Vec<&str> = head.split(' ').collect();
        if words.len() > 1 {
            words.pop();
        }
        preview = format!("{}...", words.join(" "));
    }

    preview
}
