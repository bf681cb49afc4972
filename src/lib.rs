//! Ledgerline - billing core for SaaS plan and usage dashboards
//!
//! Ledgerline provides the deterministic pieces a billing dashboard needs
//! behind its plan wizard and payment forms: payment input validation,
//! plan/add-on catalogs, and subscription cost quoting. Everything that
//! backs live rendering is total — bad input comes back as data, never as
//! a panic or an error the UI has to swallow.
//!
//! # Features
//!
//! - **Payment input**: Luhn card validation, card-network detection, ABA
//!   routing-number and account-number checks, input masking
//! - **Catalogs**: code-configured plan and add-on catalogs with builders
//!   and entry validation
//! - **Pricing**: exact minor-unit money, configurable annual discounting,
//!   cost breakdowns with defined fallbacks
//! - **Sessions**: pluggable key-value persistence for in-progress
//!   selections, with trait-based audit logging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ledgerline::{
//!     BillingCycle, CostCalculator, PlanCatalog, AddOnCatalog,
//! };
//!
//! let plans = PlanCatalog::builder()
//!     .plan("starter").monthly_price_major(699).done()
//!     .plan("growth").monthly_price_major(1500).done()
//!     .build();
//! let add_ons = AddOnCatalog::builder().build();
//!
//! let breakdown = CostCalculator::new(&plans, &add_ons)
//!     .calculate("growth", Vec::<String>::new(), BillingCycle::Annual);
//! assert_eq!(breakdown.total, "$1,200");
//! ```

#![allow(async_fn_in_trait)] // async_trait macro handles Send/Sync bounds properly

pub mod audit;
pub mod catalog;
mod error;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod selection;
pub mod session;
pub mod store;

// Re-exports for public API
pub use audit::{AuditEvent, AuditLogger, NoOpAuditLogger, TracingAuditLogger};
pub use catalog::{
    AddOnCatalog, AddOnConfig, AddOnPrice, BillingType, PlanCatalog, PlanConfig,
    ENTERPRISE_PLAN_ID, FREE_PLAN_ID,
};
pub use error::{BillingError, Result};
pub use money::Money;
pub use payment::{CardNetwork, FieldCheck};
pub use pricing::{BillingCycle, CostBreakdown, CostCalculator, DiscountPolicy};
pub use selection::SubscriptionSelection;
pub use session::{SelectionSession, DEFAULT_SELECTION_KEY};
pub use store::{InMemorySelectionStore, SelectionStore};
