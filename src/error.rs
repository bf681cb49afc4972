//! Error types for billing catalog and selection operations.
//!
//! Validation of user-entered payment input never produces an error value
//! from this module: those outcomes back live form rendering and are
//! reported as data (see [`crate::payment::FieldCheck`]). `BillingError` is
//! reserved for programmer-facing failures: malformed catalog entries,
//! references to plans or add-ons that do not exist, and storage backend
//! failures while persisting a selection.

use thiserror::Error;

/// The main error type for billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The plan ID is invalid.
    #[error("Invalid plan ID '{id}': {reason}")]
    InvalidPlanId { id: String, reason: String },

    /// The add-on ID is invalid.
    #[error("Invalid add-on ID '{id}': {reason}")]
    InvalidAddOnId { id: String, reason: String },

    /// The specified plan does not exist in the catalog.
    #[error("Plan not found: {plan_id}")]
    PlanNotFound { plan_id: String },

    /// The specified add-on does not exist in the catalog.
    #[error("Add-on not found: {add_on_id}")]
    AddOnNotFound { add_on_id: String },

    /// The currency code is not a recognised ISO 4217 code.
    #[error("Unknown currency '{currency}', must be a valid ISO 4217 code")]
    UnknownCurrency { currency: String },

    /// The selection storage backend failed.
    #[error("Selection storage error: {message}")]
    Storage { message: String },

    /// A persisted selection snapshot could not be encoded.
    #[error("Selection serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BillingError {
    /// Create a storage error from any backend failure message.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Check if this error was caused by bad caller input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPlanId { .. }
                | Self::InvalidAddOnId { .. }
                | Self::PlanNotFound { .. }
                | Self::AddOnNotFound { .. }
                | Self::UnknownCurrency { .. }
        )
    }

    /// Check if this error originated in the storage backend.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage { .. } | Self::Serialization(_))
    }
}

/// Result type alias for billing operations.
pub type Result<T> = std::result::Result<T, BillingError>;
