use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::iter::Sum;
use std::ops::Add;

/// Cents per dollar
const MINOR_UNITS: Decimal = dec!(100);

/// A whole number of cents.
///
/// Every figure that feeds a total passes through `Cents` so that sums are
/// exact. Conversions from dollars and rate applications round half away from
/// zero, so a value and its negation always round to the same magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(Decimal);

impl Cents {
    pub const ZERO: Cents = Cents(Decimal::ZERO);

    /// Convert a dollar amount, rounding to the nearest cent.
    pub fn from_dollars(amount: Decimal) -> Self {
        Self::round(amount.saturating_mul(MINOR_UNITS))
    }

    /// Multiply by a fractional rate, rounding the product to the nearest cent.
    pub fn apply_rate(self, rate: Decimal) -> Self {
        Self::round(self.0.saturating_mul(rate))
    }

    /// Back to dollars, always at two decimal places.
    pub fn to_dollars(self) -> Decimal {
        let mut dollars = self.0 / MINOR_UNITS;
        dollars.rescale(2);
        dollars
    }

    fn round(value: Decimal) -> Self {
        Cents(value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}

impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}c", self.0)
    }
}

/// Format a dollar amount for display, e.g. `$4,233.45` or `-$12.00`.
pub fn format_aud(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars_round_to_nearest_cent() {
        assert_eq!(Cents::from_dollars(dec!(10.45)).to_dollars(), dec!(10.45));
        assert_eq!(Cents::from_dollars(dec!(10.454)).to_dollars(), dec!(10.45));
        assert_eq!(Cents::from_dollars(dec!(10.456)).to_dollars(), dec!(10.46));
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(Cents::from_dollars(dec!(0.005)).to_dollars(), dec!(0.01));
        assert_eq!(Cents::from_dollars(dec!(0.015)).to_dollars(), dec!(0.02));
        assert_eq!(Cents::from_dollars(dec!(-0.005)).to_dollars(), dec!(-0.01));
    }

    #[test]
    fn rate_application_rounds_product() {
        // 1459c * 0.10 = 145.9c
        let base = Cents::from_dollars(dec!(14.59));
        assert_eq!(base.apply_rate(dec!(0.10)).to_dollars(), dec!(1.46));
        // 1459c * 0.11 = 160.49c
        assert_eq!(base.apply_rate(dec!(0.11)).to_dollars(), dec!(1.60));
    }

    #[test]
    fn to_dollars_has_two_places() {
        let dollars = Cents::from_dollars(dec!(12000)).to_dollars();
        assert_eq!(dollars.scale(), 2);
        assert_eq!(dollars.to_string(), "12000.00");
    }

    #[test]
    fn sum_is_exact() {
        let total: Cents = [dec!(0.10), dec!(0.20), dec!(0.30)]
            .into_iter()
            .map(Cents::from_dollars)
            .sum();
        assert_eq!(total.to_dollars(), dec!(0.60));
    }

    #[test]
    fn format_aud_groups_thousands() {
        assert_eq!(format_aud(dec!(0)), "$0.00");
        assert_eq!(format_aud(dec!(999.5)), "$999.50");
        assert_eq!(format_aud(dec!(4233.45)), "$4,233.45");
        assert_eq!(format_aud(dec!(1000000)), "$1,000,000.00");
        assert_eq!(format_aud(dec!(-12)), "-$12.00");
    }
}
