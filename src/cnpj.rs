//! CNPJ helpers
//!
//! The API accepts CNPJs with or without punctuation and normalises them
//! server-side. These helpers mirror that behaviour on the client so views
//! can format numbers and the CLI can warn about obviously broken input.

/// Number of digits in a CNPJ
pub const CNPJ_LEN: usize = 14;

const FIRST_DIGIT_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_DIGIT_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strip everything that is not an ASCII digit.
///
/// ```text
/// "12.345.678/0001-95" -> "12345678000195"
/// ```
pub fn normalize(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Format a CNPJ as `XX.XXX.XXX/XXXX-XX`.
///
/// Input that does not normalise to exactly 14 digits is returned unchanged.
pub fn format(value: &str) -> String {
    let digits = normalize(value);
    if digits.len() != CNPJ_LEN {
        return value.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

/// Check length and both verification digits.
pub fn is_valid(value: &str) -> bool {
    let digits: Vec<u32> = normalize(value)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    if digits.len() != CNPJ_LEN {
        return false;
    }

    let first = check_digit(&digits[..12], &FIRST_DIGIT_WEIGHTS);
    let second = check_digit(&digits[..13], &SECOND_DIGIT_WEIGHTS);
    digits[12] == first && digits[13] == second
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}
