// src/utils/format.rs

use crate::models::CanonicalJob;

/// 140000.0 -> "140,000". Fractions are rounded away.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// "💰 $140,000 - $200,000 USD", shown only when both bounds are known.
pub fn format_salary(job: &CanonicalJob) -> Option<String> {
    let (min, max) = (job.salary_min?, job.salary_max?);
    Some(format!(
        "💰 ${} - ${} {}",
        group_thousands(min),
        group_thousands(max),
        job.currency.as_deref().unwrap_or("USD")
    ))
}
