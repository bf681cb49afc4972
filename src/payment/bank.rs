//! Bank routing-number and account-number validation and masking.

use super::FieldCheck;

/// Required digit count for an ABA routing number.
const ROUTING_DIGITS: usize = 9;

/// Inclusive length bounds for a bank account number.
const ACCOUNT_MIN_DIGITS: usize = 4;
const ACCOUNT_MAX_DIGITS: usize = 17;

/// ABA checksum weights, applied positionally and repeating.
const ABA_WEIGHTS: [u32; 3] = [3, 7, 1];

/// Validate a US bank routing number.
///
/// Whitespace and dashes are stripped; any other character is left in
/// place so that, say, a letter fails the nine-digit shape test rather
/// than being silently discarded. A well-shaped number must then pass the
/// ABA checksum: with digits `d0..d8`,
/// `3*(d0+d3+d6) + 7*(d1+d4+d7) + (d2+d5+d8)` must be divisible by 10.
///
/// Shape and checksum failures carry distinct messages so forms can report
/// "too short" differently from "mistyped".
#[must_use]
pub fn validate_routing_number(raw: &str) -> FieldCheck {
    let cleaned = strip_separators(raw);

    if cleaned.len() != ROUTING_DIGITS || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return FieldCheck::Shape {
            message: "must be exactly 9 digits",
        };
    }

    let sum: u32 = cleaned
        .chars()
        .enumerate()
        .map(|(i, c)| ABA_WEIGHTS[i % 3] * c.to_digit(10).unwrap_or(0))
        .sum();

    if sum % 10 == 0 {
        FieldCheck::Valid
    } else {
        FieldCheck::Checksum {
            message: "invalid routing number format",
        }
    }
}

/// Validate a bank account number.
///
/// Whitespace and dashes are stripped. The result must be non-empty,
/// all digits, and between 4 and 17 digits inclusive. There is no checksum
/// for account numbers; every failure here is a shape failure.
#[must_use]
pub fn validate_account_number(raw: &str) -> FieldCheck {
    let cleaned = strip_separators(raw);

    if cleaned.is_empty() {
        return FieldCheck::Shape {
            message: "account number is required",
        };
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return FieldCheck::Shape {
            message: "must contain only numbers",
        };
    }
    if cleaned.len() < ACCOUNT_MIN_DIGITS || cleaned.len() > ACCOUNT_MAX_DIGITS {
        return FieldCheck::Shape {
            message: "must be between 4 and 17 digits",
        };
    }
    FieldCheck::Valid
}

/// Strip non-digits and cap at 9 digits for interactive routing input.
#[must_use]
pub fn format_routing_number(raw: &str) -> String {
    digits_capped(raw, ROUTING_DIGITS)
}

/// Strip non-digits and cap at 17 digits for interactive account input.
#[must_use]
pub fn format_account_number(raw: &str) -> String {
    digits_capped(raw, ACCOUNT_MAX_DIGITS)
}

fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

fn digits_capped(raw: &str, cap: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(cap)
        .collect()
}
