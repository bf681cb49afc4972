//! Credit-card number validation, network classification, and masking.

use serde::{Deserialize, Serialize};

/// Minimum digit count for a plausible card number.
const MIN_CARD_DIGITS: usize = 13;

/// Maximum digit count kept by the input mask.
const MAX_CARD_DIGITS: usize = 19;

/// Validate a card number with the Luhn checksum.
///
/// All non-digit characters are stripped first, so `"4532 0151 1283 0366"`
/// and `"4532015112830366"` validate identically. Inputs with fewer than 13
/// digits fail closed. Never panics; malformed input simply yields `false`.
#[must_use]
pub fn validate_card_number(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < MIN_CARD_DIGITS {
        return false;
    }

    // Right to left, doubling every second digit starting with the
    // second-from-rightmost; doubled values above 9 drop 9.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Strip non-digits and cap at the longest valid card length.
///
/// An input-masking transform for interactive entry, not a validation
/// signal.
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_CARD_DIGITS)
        .collect()
}

/// Card network inferred from a number's leading digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardNetwork {
    /// Classify a card number by its issuer prefix.
    ///
    /// Prefixes are tested in declaration order and the first match wins:
    /// `4` is Visa, `51`–`55` is Mastercard, `34`/`37` is Amex, and
    /// `6011`/`65` is Discover. The checksum is not consulted; callers that
    /// care about validity check [`validate_card_number`] separately.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if digits.starts_with('4') {
            return Self::Visa;
        }
        if matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55")) {
            return Self::Mastercard;
        }
        if matches!(digits.get(..2), Some("34" | "37")) {
            return Self::Amex;
        }
        if digits.starts_with("6011") || digits.starts_with("65") {
            return Self::Discover;
        }
        Self::Unknown
    }

    /// Convert to a lowercase string tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
