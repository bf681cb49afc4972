//! Exact-decimal money amounts.
//!
//! Amounts are stored as integer minor units (cents) so that discount
//! arithmetic and aggregation never pick up floating-point drift. Only the
//! display helpers produce currency strings; everything upstream stays in
//! minor units.

use serde::{Deserialize, Serialize};

/// Scale factor between minor units and major units (cents per dollar).
const MINOR_PER_MAJOR: i64 = 100;

/// Basis points in a whole (10000 bps = 100%).
pub const BPS_SCALE: u32 = 10_000;

/// A monetary amount in integer minor units of a single currency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create an amount from minor units (e.g. cents).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole major units (e.g. dollars).
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Check if this amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Check if this amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Add two amounts, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Multiply by a basis-point rate, rounding half away from zero at
    /// minor-unit precision.
    ///
    /// `amount.apply_rate_bps(8000)` is 80% of the amount. This is the
    /// per-line primitive the cost calculator uses for cycle discounts;
    /// rounding happens here, independently for each line.
    #[must_use]
    pub fn apply_rate_bps(self, rate_bps: u32) -> Self {
        let scaled = i128::from(self.0) * i128::from(rate_bps);
        let quotient = scaled / i128::from(BPS_SCALE);
        let remainder = scaled % i128::from(BPS_SCALE);
        let rounded = if remainder.unsigned_abs() * 2 >= u128::from(BPS_SCALE) {
            quotient + scaled.signum()
        } else {
            quotient
        };
        Self(rounded as i64)
    }

    /// Round to the nearest whole major unit, half away from zero.
    #[must_use]
    pub const fn round_to_major(self) -> i64 {
        let quotient = self.0 / MINOR_PER_MAJOR;
        let remainder = self.0 % MINOR_PER_MAJOR;
        if remainder.abs() * 2 >= MINOR_PER_MAJOR {
            quotient + remainder.signum()
        } else {
            quotient
        }
    }

    /// Format as a whole-unit currency string with thousands separators,
    /// e.g. `"$1,500"`.
    ///
    /// Fractional amounts are rounded to the nearest whole unit, half away
    /// from zero; this is the display transform applied to every figure the
    /// cost calculator returns.
    #[must_use]
    pub fn format_whole(self) -> String {
        self.format_whole_with("$")
    }

    /// Format as a whole-unit currency string with an explicit symbol.
    #[must_use]
    pub fn format_whole_with(self, symbol: &str) -> String {
        let major = self.round_to_major();
        let sign = if major < 0 { "-" } else { "" };
        format!("{sign}{symbol}{}", group_thousands(major.unsigned_abs()))
    }

    /// Format preserving cents when present, e.g. `"$0.05"` or `"$49"`.
    #[must_use]
    pub fn format_exact(self) -> String {
        self.format_exact_with("$")
    }

    /// Format preserving cents when present, with an explicit symbol.
    #[must_use]
    pub fn format_exact_with(self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let cents = abs % MINOR_PER_MAJOR as u64;
        if cents == 0 {
            format!("{sign}{symbol}{}", group_thousands(major))
        } else {
            format!("{sign}{symbol}{}.{cents:02}", group_thousands(major))
        }
    }

    /// Parse a price display string such as `"$1,500"`, `"49.50"` or
    /// `"$49/month"`.
    ///
    /// Strips one leading currency symbol, thousands separators, and a
    /// trailing `/...` period suffix, then requires a plain decimal with at
    /// most two fractional digits. Returns `None` for anything else
    /// (e.g. `"Contact Sales"`); callers treat an unparsable price as a
    /// zero contribution, never an error.
    #[must_use]
    pub fn parse_display(raw: &str) -> Option<Self> {
        let mut s = raw.trim();
        if let Some((head, _)) = s.split_once('/') {
            s = head.trim_end();
        }
        for symbol in ["$", "£", "€"] {
            if let Some(rest) = s.strip_prefix(symbol) {
                s = rest.trim_start();
                break;
            }
        }
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }

        let (int_part, frac_part) = match cleaned.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (cleaned.as_str(), None),
        };
        if !int_part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };

        let cents: i64 = match frac_part {
            None => 0,
            Some(frac) => {
                if frac.is_empty()
                    || frac.len() > 2
                    || !frac.chars().all(|c| c.is_ascii_digit())
                {
                    return None;
                }
                let value: i64 = frac.parse().ok()?;
                if frac.len() == 1 { value * 10 } else { value }
            }
        };

        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(cents))
            .map(Self)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(other)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

/// Display symbol for a lowercase ISO 4217 currency code.
///
/// Unrecognised codes fall back to the code itself.
#[must_use]
pub fn currency_symbol(code: &str) -> &str {
    match code {
        "usd" => "$",
        "gbp" => "£",
        "eur" => "€",
        _ => code,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major(1500).minor(), 150_000);
        assert_eq!(Money::from_minor(55_920).minor(), 55_920);
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_apply_rate_bps() {
        // 80% of $699 is $559.20 exactly.
        assert_eq!(
            Money::from_major(699).apply_rate_bps(8000),
            Money::from_minor(55_920)
        );
        // Half rounds away from zero at minor-unit precision.
        assert_eq!(
            Money::from_minor(5).apply_rate_bps(5000),
            Money::from_minor(3)
        );
        assert_eq!(
            Money::from_minor(-5).apply_rate_bps(5000),
            Money::from_minor(-3)
        );
        assert_eq!(Money::from_major(100).apply_rate_bps(0), Money::zero());
        assert_eq!(
            Money::from_major(100).apply_rate_bps(BPS_SCALE),
            Money::from_major(100)
        );
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(Money::from_major(1500).format_whole(), "$1,500");
        assert_eq!(Money::from_major(0).format_whole(), "$0");
        assert_eq!(Money::from_major(1_234_567).format_whole(), "$1,234,567");
        // 559.2 rounds down, 569.6 rounds up.
        assert_eq!(Money::from_minor(55_920).format_whole(), "$559");
        assert_eq!(Money::from_minor(56_960).format_whole(), "$570");
        // Exactly .50 rounds away from zero.
        assert_eq!(Money::from_minor(1_050).format_whole(), "$11");
        assert_eq!(Money::from_minor(-1_050).format_whole(), "-$11");
    }

    #[test]
    fn test_format_exact() {
        assert_eq!(Money::from_minor(5).format_exact(), "$0.05");
        assert_eq!(Money::from_major(49).format_exact(), "$49");
        assert_eq!(Money::from_minor(4_950).format_exact(), "$49.50");
        assert_eq!(Money::from_major(1500).format_exact_with("£"), "£1,500");
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(Money::parse_display("$1,500"), Some(Money::from_major(1500)));
        assert_eq!(Money::parse_display("$49/month"), Some(Money::from_major(49)));
        assert_eq!(Money::parse_display("49"), Some(Money::from_major(49)));
        assert_eq!(Money::parse_display("  $0.05"), Some(Money::from_minor(5)));
        assert_eq!(Money::parse_display("7.5"), Some(Money::from_minor(750)));
        assert_eq!(Money::parse_display("£250/mo"), Some(Money::from_major(250)));

        assert_eq!(Money::parse_display("Contact Sales"), None);
        assert_eq!(Money::parse_display("Included"), None);
        assert_eq!(Money::parse_display(""), None);
        assert_eq!(Money::parse_display("$"), None);
        assert_eq!(Money::parse_display("12.345"), None);
        assert_eq!(Money::parse_display("-5"), None);
    }

    #[test]
    fn test_sum_and_add() {
        let total: Money = [Money::from_major(10), Money::from_major(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_major(15));
        assert_eq!(
            Money::from_major(1) + Money::from_minor(50),
            Money::from_minor(150)
        );
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("usd"), "$");
        assert_eq!(currency_symbol("gbp"), "£");
        assert_eq!(currency_symbol("eur"), "€");
        assert_eq!(currency_symbol("sek"), "sek");
    }
}
