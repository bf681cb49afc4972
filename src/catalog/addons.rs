//! Add-on catalog configuration.
//!
//! An add-on is an optional feature purchasable alongside a plan. Its price
//! can differ per plan, and some cells are not numbers at all ("Included",
//! "Contact Sales"), so the per-plan price table is an explicit enum with a
//! defined missing-key ⇒ zero-contribution contract rather than a bag of
//! strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// How an add-on bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    /// Flat recurring fee, aggregated into the subscription total.
    Subscription,
    /// Per-unit usage billing; never aggregated into the flat total.
    Metered,
}

impl BillingType {
    /// Convert to string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscription => "subscription",
            Self::Metered => "metered",
        }
    }
}

impl std::fmt::Display for BillingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cell of an add-on's per-plan price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnPrice {
    /// A flat recurring amount. The only variant that can contribute to a
    /// subscription total.
    Flat(Money),
    /// A per-unit rate for metered add-ons; display-only.
    PerUnit(Money),
    /// Included with the plan at no extra charge.
    Included,
    /// A non-numeric sentinel such as "Contact Sales"; contributes nothing.
    Custom(String),
}

impl AddOnPrice {
    /// Parse a legacy price display string.
    ///
    /// Recognises flat amounts (`"$49/month"`), per-unit rates
    /// (`"$0.05 each"`), and the `"Included"` sentinel; anything else is
    /// kept verbatim as [`AddOnPrice::Custom`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("included") {
            return Self::Included;
        }

        let lower = trimmed.to_ascii_lowercase();
        for suffix in [" each", " per unit", "/unit"] {
            if let Some(head) = lower.strip_suffix(suffix) {
                if let Some(amount) = Money::parse_display(&trimmed[..head.len()]) {
                    return Self::PerUnit(amount);
                }
            }
        }

        match Money::parse_display(trimmed) {
            Some(amount) => Self::Flat(amount),
            None => Self::Custom(trimmed.to_string()),
        }
    }

    /// Render the cell back to a display string.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Flat(amount) => format!("{}/month", amount.format_exact()),
            Self::PerUnit(amount) => format!("{} each", amount.format_exact()),
            Self::Included => "Included".to_string(),
            Self::Custom(text) => text.clone(),
        }
    }

    /// The flat recurring amount, if this cell has one.
    #[must_use]
    pub fn flat_amount(&self) -> Option<Money> {
        match self {
            Self::Flat(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// Configuration for a single add-on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnConfig {
    /// Add-on identifier (e.g. "priority-support").
    pub id: String,
    /// Display name shown to users.
    pub display_name: Option<String>,
    /// Description of the add-on.
    pub description: Option<String>,
    /// How this add-on bills.
    pub billing: BillingType,
    /// Per-plan price table.
    pub prices_by_plan: HashMap<String, AddOnPrice>,
}

impl AddOnConfig {
    /// The price cell for a plan.
    ///
    /// A missing key means the add-on has no recurring price for that plan
    /// and contributes zero; callers treat `None` and non-flat cells alike.
    #[must_use]
    pub fn price_for(&self, plan_id: &str) -> Option<&AddOnPrice> {
        self.prices_by_plan.get(plan_id)
    }

    /// Check if this add-on bills by usage.
    #[must_use]
    pub fn is_metered(&self) -> bool {
        self.billing == BillingType::Metered
    }
}

/// A collection of add-on configurations, keyed by unique add-on ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddOnCatalog {
    add_ons: HashMap<String, AddOnConfig>,
}

impl AddOnCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a catalog.
    #[must_use]
    pub fn builder() -> AddOnCatalogBuilder {
        AddOnCatalogBuilder::new()
    }

    /// Create a catalog from a list of add-on entries.
    ///
    /// Later entries overwrite earlier entries with the same ID.
    #[must_use]
    pub fn from_entries(entries: Vec<AddOnConfig>) -> Self {
        let add_ons = entries
            .into_iter()
            .map(|add_on| (add_on.id.clone(), add_on))
            .collect();
        Self { add_ons }
    }

    /// Add a single add-on config.
    pub fn add(&mut self, config: AddOnConfig) {
        self.add_ons.insert(config.id.clone(), config);
    }

    /// Get an add-on by ID.
    #[must_use]
    pub fn get(&self, add_on_id: &str) -> Option<&AddOnConfig> {
        self.add_ons.get(add_on_id)
    }

    /// Check if an add-on exists.
    #[must_use]
    pub fn contains(&self, add_on_id: &str) -> bool {
        self.add_ons.contains_key(add_on_id)
    }

    /// Get all add-on IDs.
    #[must_use]
    pub fn add_on_ids(&self) -> Vec<&str> {
        self.add_ons.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of add-ons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.add_ons.len()
    }

    /// Check if there are no add-ons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add_ons.is_empty()
    }

    /// Iterate over all add-ons.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AddOnConfig)> {
        self.add_ons.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Builder for constructing an add-on catalog.
#[derive(Debug, Default)]
pub struct AddOnCatalogBuilder {
    add_ons: HashMap<String, AddOnConfig>,
}

impl AddOnCatalogBuilder {
    /// Create a new catalog builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start defining a new add-on.
    #[must_use]
    pub fn add_on(self, id: &str) -> AddOnBuilder {
        AddOnBuilder {
            parent: self,
            id: id.to_string(),
            display_name: None,
            description: None,
            billing: BillingType::Subscription,
            prices_by_plan: HashMap::new(),
        }
    }

    /// Build the catalog.
    #[must_use]
    pub fn build(self) -> AddOnCatalog {
        AddOnCatalog {
            add_ons: self.add_ons,
        }
    }

    fn add_entry(mut self, config: AddOnConfig) -> Self {
        self.add_ons.insert(config.id.clone(), config);
        self
    }
}

/// Builder for a single add-on configuration.
#[derive(Debug)]
pub struct AddOnBuilder {
    parent: AddOnCatalogBuilder,
    id: String,
    display_name: Option<String>,
    description: Option<String>,
    billing: BillingType,
    prices_by_plan: HashMap<String, AddOnPrice>,
}

impl AddOnBuilder {
    /// Set how this add-on bills (default: subscription).
    #[must_use]
    pub fn billing(mut self, billing: BillingType) -> Self {
        self.billing = billing;
        self
    }

    /// Mark this add-on as usage-billed.
    #[must_use]
    pub fn metered(self) -> Self {
        self.billing(BillingType::Metered)
    }

    /// Set an explicit price cell for a plan.
    #[must_use]
    pub fn price(mut self, plan_id: &str, price: AddOnPrice) -> Self {
        self.prices_by_plan.insert(plan_id.to_string(), price);
        self
    }

    /// Set a flat recurring price for a plan.
    #[must_use]
    pub fn flat_price(self, plan_id: &str, amount: Money) -> Self {
        self.price(plan_id, AddOnPrice::Flat(amount))
    }

    /// Set a per-unit rate for a plan.
    #[must_use]
    pub fn per_unit_price(self, plan_id: &str, amount: Money) -> Self {
        self.price(plan_id, AddOnPrice::PerUnit(amount))
    }

    /// Mark this add-on as included with a plan.
    #[must_use]
    pub fn included(self, plan_id: &str) -> Self {
        self.price(plan_id, AddOnPrice::Included)
    }

    /// Set a price cell from a legacy display string.
    #[must_use]
    pub fn price_str(self, plan_id: &str, raw: &str) -> Self {
        self.price(plan_id, AddOnPrice::parse(raw))
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

    /// Finish defining this add-on and return to the parent builder.
    #[must_use]
    pub fn done(self) -> AddOnCatalogBuilder {
        let config = AddOnConfig {
            id: self.id,
            display_name: self.display_name,
            description: self.description,
            billing: self.billing,
            prices_by_plan: self.prices_by_plan,
        };
        self.parent.add_entry(config)
    }
}
