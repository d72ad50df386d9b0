//! Shared formatting helpers for the text views

/// Truncate to at most `max_chars` characters, marking the cut with `…`.
///
/// Counts `char`s, not bytes, so accented names (common in operator names)
/// are never split mid-character.
///
/// # Examples
///
/// ```
/// use operadoras::util::truncate_chars;
///
/// assert_eq!(truncate_chars("ASSOCIAÇÃO", 20), "ASSOCIAÇÃO");
/// assert_eq!(truncate_chars("ASSOCIAÇÃO", 6), "ASSOC…");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Format an amount as Brazilian reais: `R$ 1.234.567,89`
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    // Group thousands with '.'
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!(
        "{}R$ {},{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}
