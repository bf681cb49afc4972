//! Plan catalog configuration and definitions.
//!
//! Define your subscription tiers with pricing, features, and display
//! metadata:
//!
//! ```rust,ignore
//! use ledgerline::catalog::PlanCatalog;
//!
//! let plans = PlanCatalog::builder()
//!     .plan("starter")
//!         .display_name("Starter")
//!         .monthly_price_major(699)
//!         .trial_days(14)
//!         .done()
//!     .plan("growth")
//!         .display_name("Growth")
//!         .monthly_price_major(1500)
//!         .annual_price_major(14_400)
//!         .done()
//!     .build();
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Plan ID whose pricing is negotiated, never computed.
pub const ENTERPRISE_PLAN_ID: &str = "enterprise";

/// Plan ID of the zero-priced tier.
pub const FREE_PLAN_ID: &str = "free";

/// A collection of plan configurations, keyed by unique plan ID.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanCatalog {
    plans: HashMap<String, PlanConfig>,
}

impl PlanCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a catalog.
    #[must_use]
    pub fn builder() -> PlanCatalogBuilder {
        PlanCatalogBuilder::new()
    }

    /// Create a catalog from a list of plan entries.
    ///
    /// Later entries overwrite earlier entries with the same ID.
    #[must_use]
    pub fn from_entries(entries: Vec<PlanConfig>) -> Self {
        let plans = entries
            .into_iter()
            .map(|plan| (plan.id.clone(), plan))
            .collect();
        Self { plans }
    }

    /// Merge plans from another catalog.
    ///
    /// Plans from `other` overwrite plans with the same ID.
    pub fn merge(&mut self, other: PlanCatalog) {
        self.plans.extend(other.plans);
    }

    /// Add a single plan config.
    pub fn add(&mut self, config: PlanConfig) {
        self.plans.insert(config.id.clone(), config);
    }

    /// Get a plan by ID.
    #[must_use]
    pub fn get(&self, plan_id: &str) -> Option<&PlanConfig> {
        self.plans.get(plan_id)
    }

    /// Check if a plan exists.
    #[must_use]
    pub fn contains(&self, plan_id: &str) -> bool {
        self.plans.contains_key(plan_id)
    }

    /// Get all plan IDs.
    #[must_use]
    pub fn plan_ids(&self) -> Vec<&str> {
        self.plans.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of plans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Check if there are no plans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Iterate over all plans.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlanConfig)> {
        self.plans.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Plans in display order (by `sort_order`, then ID).
    #[must_use]
    pub fn sorted_for_display(&self) -> Vec<&PlanConfig> {
        let mut plans: Vec<&PlanConfig> = self.plans.values().collect();
        plans.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
        plans
    }
}

/// Configuration for a single plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Plan identifier (e.g. "starter", "growth").
    pub id: String,
    /// Display name shown to users.
    pub display_name: Option<String>,
    /// Description of the plan.
    pub description: Option<String>,
    /// Nominal monthly price.
    pub monthly_price: Money,
    /// Tabulated annual price, when one exists.
    ///
    /// When absent, the calculator derives the annual price from the
    /// monthly price via the active discount policy.
    pub annual_price: Option<Money>,
    /// Lowercase ISO 4217 currency code.
    pub currency: String,
    /// Features available on this plan.
    pub features: HashSet<String>,
    /// Trial period in days (None = no trial).
    pub trial_days: Option<u32>,
    /// Sort order for display.
    pub sort_order: i32,
}

impl PlanConfig {
    /// Check if this plan has a specific feature.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Check if this is the negotiated-pricing tier.
    #[must_use]
    pub fn is_custom_priced(&self) -> bool {
        self.id == ENTERPRISE_PLAN_ID
    }

    /// The monthly price formatted for display (e.g. "$1,500").
    #[must_use]
    pub fn formatted_monthly_price(&self) -> String {
        self.monthly_price
            .format_whole_with(crate::money::currency_symbol(&self.currency))
    }
}

/// Builder for constructing a plan catalog.
#[derive(Debug, Default)]
pub struct PlanCatalogBuilder {
    plans: HashMap<String, PlanConfig>,
}

impl PlanCatalogBuilder {
    /// Create a new catalog builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start defining a new plan.
    #[must_use]
    pub fn plan(self, id: &str) -> PlanBuilder {
        PlanBuilder {
            parent: self,
            id: id.to_string(),
            display_name: None,
            description: None,
            monthly_price: Money::zero(),
            annual_price: None,
            currency: "usd".to_string(),
            features: HashSet::new(),
            trial_days: None,
            sort_order: 0,
        }
    }

    /// Build the catalog.
    #[must_use]
    pub fn build(self) -> PlanCatalog {
        PlanCatalog { plans: self.plans }
    }

    fn add_plan(mut self, config: PlanConfig) -> Self {
        self.plans.insert(config.id.clone(), config);
        self
    }
}

/// Builder for a single plan configuration.
#[derive(Debug)]
pub struct PlanBuilder {
    parent: PlanCatalogBuilder,
    id: String,
    display_name: Option<String>,
    description: Option<String>,
    monthly_price: Money,
    annual_price: Option<Money>,
    currency: String,
    features: HashSet<String>,
    trial_days: Option<u32>,
    sort_order: i32,
}

impl PlanBuilder {
    /// Set the monthly price.
    #[must_use]
    pub fn monthly_price(mut self, price: Money) -> Self {
        self.monthly_price = price;
        self
    }

    /// Set the monthly price in whole major units.
    #[must_use]
    pub fn monthly_price_major(self, major: i64) -> Self {
        self.monthly_price(Money::from_major(major))
    }

    /// Set a tabulated annual price.
    #[must_use]
    pub fn annual_price(mut self, price: Money) -> Self {
        self.annual_price = Some(price);
        self
    }

    /// Set a tabulated annual price in whole major units.
    #[must_use]
    pub fn annual_price_major(self, major: i64) -> Self {
        self.annual_price(Money::from_major(major))
    }

    /// Set the currency code (e.g. "usd", "gbp", "eur").
    #[must_use]
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_lowercase();
        self
    }

    /// Add features to this plan.
    #[must_use]
    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Add a single feature to this plan.
    #[must_use]
    pub fn feature(mut self, feature: &str) -> Self {
        self.features.insert(feature.to_string());
        self
    }

    /// Set the trial period in days.
    #[must_use]
    pub fn trial_days(mut self, days: u32) -> Self {
        self.trial_days = Some(days);
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Set the display sort order.
    #[must_use]
    pub fn sort_order(mut self, order: i32) -> Self {
        self.sort_order = order;
        self
    }

    /// Finish defining this plan and return to the parent builder.
    #[must_use]
    pub fn done(self) -> PlanCatalogBuilder {
        let config = PlanConfig {
            id: self.id,
            display_name: self.display_name,
            description: self.description,
            monthly_price: self.monthly_price,
            annual_price: self.annual_price,
            currency: self.currency,
            features: self.features,
            trial_days: self.trial_days,
            sort_order: self.sort_order,
        };
        self.parent.add_plan(config)
    }
}
