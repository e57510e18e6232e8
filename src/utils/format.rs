//! Number formatting for report adapters
//!
//! Report metrics display as `19,936 gal` and `$109.96`.

/// Format a value rounded to `decimals` places with comma thousands separators
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // Rounding can turn a tiny negative into "0"
    let is_zero = grouped.chars().all(|c| c == '0' || c == ',' || c == '.');
    if value.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }

    grouped
}

/// Whole gallons, e.g. "19,936 gal"
pub fn format_gallons(gallons: f64) -> String {
    format!("{} gal", format_thousands(gallons, 0))
}

/// Dollars and cents, e.g. "$109.96" or "-$12.50"
pub fn format_dollars(amount: f64) -> String {
    let formatted = format_thousands(amount, 2);
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", formatted),
    }
}
