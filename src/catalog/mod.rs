//! Static plan and add-on catalogs.
//!
//! Catalogs are code-configured through builders or deserialized from
//! stored entries; the cost calculator and selection session read them but
//! never mutate them.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerline::catalog::{AddOnCatalog, BillingType, PlanCatalog};
//! use ledgerline::money::Money;
//!
//! let plans = PlanCatalog::builder()
//!     .plan("starter")
//!         .display_name("Starter")
//!         .monthly_price_major(699)
//!         .features(["basic_reports", "email_support"])
//!         .done()
//!     .plan("growth")
//!         .display_name("Growth")
//!         .monthly_price_major(1500)
//!         .features(["basic_reports", "advanced_reports", "api_access"])
//!         .done()
//!     .build();
//!
//! let add_ons = AddOnCatalog::builder()
//!     .add_on("priority-support")
//!         .billing(BillingType::Subscription)
//!         .flat_price("starter", Money::from_major(49))
//!         .included("growth")
//!         .done()
//!     .build();
//! ```

pub mod addons;
pub mod plans;
pub mod validation;

pub use addons::{AddOnBuilder, AddOnCatalog, AddOnCatalogBuilder, AddOnConfig, AddOnPrice, BillingType};
pub use plans::{PlanBuilder, PlanCatalog, PlanCatalogBuilder, PlanConfig, ENTERPRISE_PLAN_ID, FREE_PLAN_ID};
pub use validation::{validate_add_on, validate_add_on_id, validate_catalogs, validate_plan, validate_plan_id};
