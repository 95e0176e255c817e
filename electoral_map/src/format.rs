// Display helpers for the tables and the statistics.

/// Formats a count with comma thousand separators: 1234567 -> "1,234,567".
pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

/// Formats `part / total` as a percentage with one decimal: "12.5%".
/// A total of 0 gives "0%".
pub fn format_percentage(part: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format_share(part as f64 / total as f64)
}

/// Formats a share in [0, 1] as a percentage with one decimal.
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}
