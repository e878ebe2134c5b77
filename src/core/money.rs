//! Minor-currency-unit display helpers.
//!
//! Every monetary figure in the dashboard payload is an integer in minor
//! units (cents). These helpers convert to display form; no currency
//! conversion happens anywhere in this crate.

/// Formats a minor-unit amount for display, without a currency symbol.
///
/// Grouping follows the currency's conventional locale: `123456` renders as
/// `1.234,56` for BRL and `1,234.56` for USD-style currencies.
#[must_use]
pub fn format_minor_units(amount: i64, currency: &str) -> String {
    let (thousands_sep, decimal_sep) = separators_for(currency);

    let magnitude = amount.unsigned_abs();
    let major = group_thousands(magnitude / 100, thousands_sep);
    let minor = magnitude % 100;

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{major}{decimal_sep}{minor:02}")
}

/// Converts a minor-unit amount to major units for chart scales.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn to_major_units(amount: i64) -> f64 {
    amount as f64 / 100.0
}

fn separators_for(currency: &str) -> (char, char) {
    match currency {
        "BRL" | "EUR" => ('.', ','),
        _ => (',', '.'),
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped
}
