// src/matching/similarity.rs

use strsim::levenshtein;

/// Normalized edit-distance similarity on a 0-100 scale.
///
/// Both inputs are lower-cased and trimmed first. Identical strings score 100 and an
/// empty side scores 0; otherwise the score is
/// `round(100 * (max_len - levenshtein) / max_len)` with lengths counted in chars.
pub fn calculate_similarity(s1: &str, s2: &str) -> u32 {
    let s1 = s1.trim().to_lowercase();
    let s2 = s2.trim().to_lowercase();

    if s1 == s2 {
        return 100;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0;
    }

    let distance = levenshtein(&s1, &s2);
    let max_len = s1.chars().count().max(s2.chars().count());

    (((max_len - distance) as f64 / max_len as f64) * 100.0).round() as u32
}
