//! Summary display formatting

use super::amount::format_amount;
use crate::config::settings::Settings;
use crate::services::Summary;

/// Format the three totals, one per line
pub fn format_summary(summary: &Summary, settings: &Settings) -> String {
    let rows = [
        ("Total income", summary.total_income),
        ("Total expense", summary.total_expense),
        ("Balance", summary.balance),
    ];

    let amounts: Vec<String> = rows
        .iter()
        .map(|(_, amount)| format_amount(*amount, settings))
        .collect();
    let width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

    let mut output = String::new();
    for ((label, _), amount) in rows.iter().zip(&amounts) {
        output.push_str(&format!("{:<14} {:>width$}\n", format!("{}:", label), amount, width = width));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_format_summary() {
        let summary = Summary {
            total_income: Money::from_units(125),
            total_expense: Money::from_units(40),
            balance: Money::from_units(85),
        };
        let output = format_summary(&summary, &Settings::default());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Total income:  Rp 125");
        assert_eq!(lines[1], "Total expense:  Rp 40");
        assert_eq!(lines[2], "Balance:        Rp 85");
    }

    #[test]
    fn test_negative_balance() {
        let summary = Summary {
            total_income: Money::zero(),
            total_expense: Money::from_units(1500),
            balance: Money::from_units(-1500),
        };
        let output = format_summary(&summary, &Settings::default());
        assert!(output.contains("Balance:       -Rp 1.500"));
    }
}
