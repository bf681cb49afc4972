//! Input validation for catalog entries.
//!
//! Catalog IDs end up in storage keys, audit logs, and API paths, so they
//! are restricted to a safe character set and bounded lengths before a
//! catalog accepts them.

use crate::error::{BillingError, Result};

use super::addons::{AddOnCatalog, AddOnConfig, AddOnPrice};
use super::plans::{PlanCatalog, PlanConfig};

/// Maximum length for plan and add-on IDs.
const MAX_CATALOG_ID_LENGTH: usize = 64;

/// Maximum length for display names.
const MAX_DISPLAY_NAME_LENGTH: usize = 128;

/// Maximum length for descriptions.
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Valid ISO 4217 currency codes (lowercase).
const VALID_CURRENCIES: &[&str] = &[
    "usd", "eur", "gbp", "cad", "aud", "jpy", "chf", "sek", "nok", "dkk",
    "nzd", "sgd", "hkd", "inr", "brl", "mxn", "pln", "czk", "huf", "ron",
];

/// Validate a plan ID.
///
/// Plan IDs must:
/// - Not be empty
/// - Not exceed 64 characters
/// - Contain only alphanumeric characters, underscores, and hyphens
///
/// # Errors
///
/// Returns `BillingError::InvalidPlanId` if validation fails.
pub fn validate_plan_id(id: &str) -> Result<()> {
    check_id(id).map_err(|reason| BillingError::InvalidPlanId {
        id: sanitize_for_error(id),
        reason,
    })
}

/// Validate an add-on ID.
///
/// Same rules as [`validate_plan_id`].
///
/// # Errors
///
/// Returns `BillingError::InvalidAddOnId` if validation fails.
pub fn validate_add_on_id(id: &str) -> Result<()> {
    check_id(id).map_err(|reason| BillingError::InvalidAddOnId {
        id: sanitize_for_error(id),
        reason,
    })
}

fn check_id(id: &str) -> std::result::Result<(), String> {
    if id.is_empty() {
        return Err("cannot be empty".to_string());
    }
    if id.len() > MAX_CATALOG_ID_LENGTH {
        return Err(format!(
            "exceeds maximum length of {MAX_CATALOG_ID_LENGTH}"
        ));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
                .to_string(),
        );
    }
    Ok(())
}

/// Validate a complete plan entry.
///
/// Checks the ID format, name/description length caps, non-negative
/// prices, and the currency code.
///
/// # Errors
///
/// Returns `BillingError::InvalidPlanId` or `BillingError::UnknownCurrency`
/// with details if validation fails.
pub fn validate_plan(plan: &PlanConfig) -> Result<()> {
    validate_plan_id(&plan.id)?;

    if let Some(ref name) = plan.display_name {
        if name.is_empty() || name.len() > MAX_DISPLAY_NAME_LENGTH {
            return Err(BillingError::InvalidPlanId {
                id: plan.id.clone(),
                reason: format!(
                    "display name must be 1-{MAX_DISPLAY_NAME_LENGTH} characters"
                ),
            });
        }
    }

    if let Some(ref desc) = plan.description {
        if desc.len() > MAX_DESCRIPTION_LENGTH {
            return Err(BillingError::InvalidPlanId {
                id: plan.id.clone(),
                reason: format!(
                    "description exceeds maximum length of {MAX_DESCRIPTION_LENGTH}"
                ),
            });
        }
    }

    if plan.monthly_price.is_negative() {
        return Err(BillingError::InvalidPlanId {
            id: plan.id.clone(),
            reason: "monthly price cannot be negative".to_string(),
        });
    }
    if plan.annual_price.is_some_and(|p| p.is_negative()) {
        return Err(BillingError::InvalidPlanId {
            id: plan.id.clone(),
            reason: "annual price cannot be negative".to_string(),
        });
    }

    let currency = plan.currency.to_lowercase();
    if !VALID_CURRENCIES.contains(&currency.as_str()) {
        return Err(BillingError::UnknownCurrency {
            currency: sanitize_for_error(&plan.currency),
        });
    }

    Ok(())
}

/// Validate a complete add-on entry.
///
/// Checks the ID format, name/description length caps, every plan key in
/// the price table, and that flat/per-unit amounts are non-negative.
///
/// # Errors
///
/// Returns `BillingError::InvalidAddOnId` with details if validation fails.
pub fn validate_add_on(add_on: &AddOnConfig) -> Result<()> {
    validate_add_on_id(&add_on.id)?;

    if let Some(ref name) = add_on.display_name {
        if name.is_empty() || name.len() > MAX_DISPLAY_NAME_LENGTH {
            return Err(BillingError::InvalidAddOnId {
                id: add_on.id.clone(),
                reason: format!(
                    "display name must be 1-{MAX_DISPLAY_NAME_LENGTH} characters"
                ),
            });
        }
    }

    if let Some(ref desc) = add_on.description {
        if desc.len() > MAX_DESCRIPTION_LENGTH {
            return Err(BillingError::InvalidAddOnId {
                id: add_on.id.clone(),
                reason: format!(
                    "description exceeds maximum length of {MAX_DESCRIPTION_LENGTH}"
                ),
            });
        }
    }

    for (plan_id, price) in &add_on.prices_by_plan {
        if check_id(plan_id).is_err() {
            return Err(BillingError::InvalidAddOnId {
                id: add_on.id.clone(),
                reason: format!(
                    "price table references invalid plan ID '{}'",
                    sanitize_for_error(plan_id)
                ),
            });
        }
        let negative = match price {
            AddOnPrice::Flat(amount) | AddOnPrice::PerUnit(amount) => amount.is_negative(),
            AddOnPrice::Included | AddOnPrice::Custom(_) => false,
        };
        if negative {
            return Err(BillingError::InvalidAddOnId {
                id: add_on.id.clone(),
                reason: format!("price for plan '{plan_id}' cannot be negative"),
            });
        }
    }

    Ok(())
}

/// Validate a plan catalog and add-on catalog together.
///
/// Every entry must pass its own validation. Price-table keys that
/// reference plans missing from the plan catalog are allowed — they simply
/// never contribute — but are logged at WARN since they usually indicate a
/// stale table.
///
/// # Errors
///
/// Returns the first entry-level validation failure.
pub fn validate_catalogs(plans: &PlanCatalog, add_ons: &AddOnCatalog) -> Result<()> {
    for (_, plan) in plans.iter() {
        validate_plan(plan)?;
    }
    for (_, add_on) in add_ons.iter() {
        validate_add_on(add_on)?;
        for plan_id in add_on.prices_by_plan.keys() {
            if !plans.contains(plan_id) {
                tracing::warn!(
                    target: "ledgerline::catalog",
                    add_on_id = %add_on.id,
                    plan_id = %plan_id,
                    "add-on price table references a plan that is not in the catalog"
                );
            }
        }
    }
    Ok(())
}

/// Sanitize a string for error messages to prevent log injection.
fn sanitize_for_error(s: &str) -> String {
    let sanitized: String = s
        .chars()
        .take(50)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '?'
            }
        })
        .collect();

    if s.len() > 50 {
        format!("{sanitized}...")
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AddOnCatalog, PlanCatalog};
    use crate::money::Money;

    #[test]
    fn test_validate_id_valid() {
        assert!(validate_plan_id("starter").is_ok());
        assert!(validate_plan_id("pro-monthly").is_ok());
        assert!(validate_add_on_id("extra_events").is_ok());
    }

    #[test]
    fn test_validate_id_invalid() {
        assert!(validate_plan_id("").is_err());
        assert!(validate_plan_id("plan with spaces").is_err());
        assert!(validate_plan_id(&"a".repeat(100)).is_err());
        assert!(validate_add_on_id("addon<script>").is_err());
    }

    #[test]
    fn test_sanitize_for_error() {
        assert_eq!(sanitize_for_error("valid_id"), "valid_id");
        assert_eq!(sanitize_for_error("has<script>chars"), "has?script?chars");

        let long = "a".repeat(100);
        let result = sanitize_for_error(&long);
        assert!(result.ends_with("..."));
        assert!(result.len() <= 53);
    }

    fn make_plan(id: &str) -> PlanConfig {
        PlanConfig {
            id: id.to_string(),
            display_name: Some("Starter".to_string()),
            description: None,
            monthly_price: Money::from_major(699),
            annual_price: None,
            currency: "usd".to_string(),
            features: Default::default(),
            trial_days: None,
            sort_order: 0,
        }
    }

    #[test]
    fn test_validate_plan() {
        assert!(validate_plan(&make_plan("starter")).is_ok());

        let mut plan = make_plan("starter");
        plan.monthly_price = Money::from_minor(-1);
        assert!(validate_plan(&plan).is_err());

        let mut plan = make_plan("starter");
        plan.currency = "xyz".to_string();
        assert!(matches!(
            validate_plan(&plan),
            Err(BillingError::UnknownCurrency { .. })
        ));

        let mut plan = make_plan("starter");
        plan.display_name = Some(String::new());
        assert!(validate_plan(&plan).is_err());
    }

    #[test]
    fn test_validate_plan_currency_case_insensitive() {
        for currency in ["usd", "EUR", "GBP", "cad"] {
            let mut plan = make_plan("starter");
            plan.currency = currency.to_string();
            assert!(validate_plan(&plan).is_ok(), "currency {currency}");
        }
    }

    #[test]
    fn test_validate_add_on() {
        let add_ons = AddOnCatalog::builder()
            .add_on("priority-support")
            .flat_price("starter", Money::from_major(49))
            .done()
            .build();
        assert!(validate_add_on(add_ons.get("priority-support").unwrap()).is_ok());

        let bad = AddOnCatalog::builder()
            .add_on("priority-support")
            .flat_price("bad plan", Money::from_major(49))
            .done()
            .build();
        assert!(validate_add_on(bad.get("priority-support").unwrap()).is_err());

        let negative = AddOnCatalog::builder()
            .add_on("priority-support")
            .flat_price("starter", Money::from_minor(-100))
            .done()
            .build();
        assert!(validate_add_on(negative.get("priority-support").unwrap()).is_err());
    }

    #[test]
    fn test_validate_catalogs() {
        let plans = PlanCatalog::from_entries(vec![make_plan("starter")]);
        let add_ons = AddOnCatalog::builder()
            .add_on("priority-support")
            .flat_price("starter", Money::from_major(49))
            // References a plan the catalog does not have; allowed, warned.
            .flat_price("legacy", Money::from_major(29))
            .done()
            .build();

        assert!(validate_catalogs(&plans, &add_ons).is_ok());
    }
}
