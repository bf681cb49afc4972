//! Validation and input masking for user-entered payment identifiers.
//!
//! Everything in this module is a pure, total function: same input, same
//! output, no I/O, no panics. A failed check is an ordinary return value,
//! never an error — these results drive inline form feedback, and a form
//! must always be able to render. Raw identifiers are validated in memory
//! for the duration of a single call and are never stored or logged.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerline::payment::{bank, card, CardNetwork};
//!
//! if card::validate_card_number(input) {
//!     let network = CardNetwork::classify(input);
//! }
//!
//! let check = bank::validate_routing_number("021000021");
//! assert!(check.is_valid());
//! ```

pub mod bank;
pub mod card;

pub use bank::{
    format_account_number, format_routing_number, validate_account_number,
    validate_routing_number,
};
pub use card::{format_card_number, validate_card_number, CardNetwork};

/// Outcome of validating a single payment input field.
///
/// Shape failures (wrong length or character set) and checksum failures
/// (right shape, fails the arithmetic check) are kept distinct so callers
/// can surface different messages for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    /// The field passed validation.
    Valid,
    /// The field has the wrong length or character set.
    Shape { message: &'static str },
    /// The field is well-formed but fails its checksum.
    Checksum { message: &'static str },
}

impl FieldCheck {
    /// Check if the field passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The human-readable failure reason, if any.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::Shape { message } | Self::Checksum { message } => Some(message),
        }
    }

    /// Check if the failure was a checksum failure.
    #[must_use]
    pub fn is_checksum_failure(&self) -> bool {
        matches!(self, Self::Checksum { .. })
    }
}
