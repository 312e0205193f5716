//! Discount rule and rupee amounts.
//!
//! Amounts are plain `f64` values. The discount is computed in floating
//! point with no internal rounding; only display rounds.

/// Fixed discount applied to every recharge (3.3 %).
pub const DISCOUNT_RATE: f64 = 0.033;

/// Wallet balance used when nothing has been persisted yet.
pub const DEFAULT_BALANCE: f64 = 5000.0;

/// Returns the discount granted on a recharge of `amount`.
pub fn discount(amount: f64) -> f64 {
    amount * DISCOUNT_RATE
}

/// Returns the amount payable for a recharge of `amount`.
///
/// Callers are responsible for passing a positive, finite amount.
pub fn discounted_amount(amount: f64) -> f64 {
    amount - amount * DISCOUNT_RATE
}

/// Parses user input into a finite amount.
///
/// Returns `None` for empty, non-numeric, infinite or NaN input. The sign is
/// not checked here.
pub fn parse_amount(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats an amount in rupees with a fixed number of decimal places.
pub fn format_rupees(amount: f64, decimals: usize) -> String {
    format!("₹{:.*}", decimals, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_amount_matches_formula() {
        for amount in [1.0, 10.0, 99.99, 100.0, 192.433, 6000.0, 123456.789] {
            assert_eq!(discounted_amount(amount), amount - amount * 0.033);
        }
    }

    #[test]
    fn test_hundred_rupee_recharge() {
        assert!((discounted_amount(100.0) - 96.7).abs() < 1e-9);
        assert!((discount(100.0) - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount("  250.5 "), Some(250.5));
        assert_eq!(parse_amount("-5"), Some(-5.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(5000.0, 2), "₹5000.00");
        assert_eq!(format_rupees(96.7, 3), "₹96.700");
    }
}
