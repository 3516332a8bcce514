// utils.rs - Number and currency formatting helpers

/// Currency symbol used in every user-facing amount
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format a number with comma thousands separators and a fixed number of decimals.
///
/// `format_thousands(1234567.891, 2)` gives `"1,234,567.89"`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let digits: Vec<char> = integer.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    // "-0" after rounding is just zero
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Whole-rupee amount, e.g. `₹248,570`
pub fn format_rupees(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_thousands(amount, 0))
}

/// Rupee amount with paise, e.g. `₹12,428.50`
pub fn format_rupees_precise(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_thousands(amount, 2))
}
