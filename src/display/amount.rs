//! Amount formatting
//!
//! Renders money the way the user configured it: symbol, grouping
//! separator, decimal separator and number of fractional digits.

use crate::config::settings::Settings;
use crate::models::Money;

/// Format an amount for display, e.g. `Rp 1.234.567`
///
/// Fractional digits beyond `decimal_places` are rounded half away from
/// zero.
pub fn format_amount(amount: Money, settings: &Settings) -> String {
    let places = u32::from(settings.decimal_places.min(2));
    let scale = 10u64.pow(2 - places);
    let rounded = (amount.cents().unsigned_abs() + scale / 2) / scale;

    let unit_size = 10u64.pow(places);
    let units = rounded / unit_size;
    let fraction = rounded % unit_size;

    let mut output = String::new();
    if amount.is_negative() && rounded > 0 {
        output.push('-');
    }
    if !settings.currency_symbol.is_empty() {
        output.push_str(&settings.currency_symbol);
        output.push(' ');
    }
    output.push_str(&group_thousands(units, &settings.thousands_separator));
    if places > 0 {
        output.push_str(&settings.decimal_separator);
        output.push_str(&format!("{:0width$}", fraction, width = places as usize));
    }

    output
}

fn group_thousands(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    grouped
}
