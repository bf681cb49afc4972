//! Subscription cost calculation.
//!
//! Computes a deterministic recurring-cost breakdown for a proposed
//! selection against static plan/add-on catalogs. The calculator backs live
//! UI rendering, so it never fails: unknown plans degrade to a zero
//! breakdown and negotiated tiers short-circuit to custom pricing.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerline::pricing::{BillingCycle, CostCalculator};
//!
//! let calculator = CostCalculator::new(&plans, &add_ons);
//! let breakdown = calculator.calculate(
//!     "growth",
//!     ["priority-support"],
//!     BillingCycle::Annual,
//! );
//! println!("{} total", breakdown.total);
//! ```
//!
//! Discounting is applied per line (base plan and each add-on
//! independently) before the total is summed, so the displayed figures
//! reproduce the per-line rounding of the dashboard they back.

use serde::{Deserialize, Serialize};

use crate::catalog::{AddOnCatalog, AddOnPrice, PlanCatalog, ENTERPRISE_PLAN_ID};
use crate::money::{currency_symbol, Money, BPS_SCALE};
use crate::selection::SubscriptionSelection;

/// Billing cycle for a subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    /// Billed monthly.
    #[default]
    Monthly,
    /// Billed annually, at a discount when no annual price is tabulated.
    Annual,
}

impl BillingCycle {
    /// Convert from string. Unrecognised values default to monthly.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s {
            "annual" | "annually" | "year" | "yearly" => Self::Annual,
            _ => Self::Monthly,
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discount policy applied when billing annually.
///
/// The rate is a named parameter rather than a constant because the flat
/// default is a business rule pending confirmation; deployments can tune
/// it without touching the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Annual discount in basis points (2000 = 20% off).
    ///
    /// Applied to the monthly price of any plan without a tabulated annual
    /// price, and to every flat recurring add-on when billing annually.
    pub annual_discount_bps: u32,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            annual_discount_bps: 2000,
        }
    }
}

impl DiscountPolicy {
    /// Create a policy with an explicit annual discount rate.
    ///
    /// Rates above 100% are clamped to 100%.
    #[must_use]
    pub fn new(annual_discount_bps: u32) -> Self {
        Self {
            annual_discount_bps: annual_discount_bps.min(BPS_SCALE),
        }
    }

    /// Apply the annual discount to an amount.
    #[must_use]
    pub fn apply_annual(&self, amount: Money) -> Money {
        amount.apply_rate_bps(BPS_SCALE - self.annual_discount_bps.min(BPS_SCALE))
    }

    /// Discount an amount for a billing cycle (monthly amounts pass
    /// through unchanged).
    #[must_use]
    pub fn for_cycle(&self, amount: Money, cycle: BillingCycle) -> Money {
        match cycle {
            BillingCycle::Monthly => amount,
            BillingCycle::Annual => self.apply_annual(amount),
        }
    }
}

/// A formatted cost breakdown for display.
///
/// All three figures are currency strings (e.g. `"$1,500"`); the negotiated
/// tier renders as `"Custom"` / `"Custom pricing"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// The plan's own recurring price.
    pub base_price: String,
    /// The summed flat recurring add-on prices.
    pub total_add_ons: String,
    /// Base plus add-ons.
    pub total: String,
}

impl CostBreakdown {
    /// The all-zero breakdown used when the plan is unknown.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            base_price: "$0".to_string(),
            total_add_ons: "$0".to_string(),
            total: "$0".to_string(),
        }
    }

    /// The negotiated-pricing breakdown.
    #[must_use]
    pub fn custom() -> Self {
        Self {
            base_price: "Custom".to_string(),
            total_add_ons: "Custom".to_string(),
            total: "Custom pricing".to_string(),
        }
    }

    /// Check if this is the negotiated-pricing breakdown.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.total == "Custom pricing"
    }
}

/// Computes cost breakdowns for subscription selections.
///
/// Borrows the catalogs; construction is free and the calculator can be
/// rebuilt per call.
#[derive(Debug, Clone, Copy)]
pub struct CostCalculator<'a> {
    plans: &'a PlanCatalog,
    add_ons: &'a AddOnCatalog,
    policy: DiscountPolicy,
}

impl<'a> CostCalculator<'a> {
    /// Create a calculator with the default discount policy.
    #[must_use]
    pub fn new(plans: &'a PlanCatalog, add_ons: &'a AddOnCatalog) -> Self {
        Self {
            plans,
            add_ons,
            policy: DiscountPolicy::default(),
        }
    }

    /// Override the discount policy.
    #[must_use]
    pub fn with_policy(mut self, policy: DiscountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compute the cost breakdown for a selection.
    #[must_use]
    pub fn calculate_for(&self, selection: &SubscriptionSelection) -> CostBreakdown {
        self.calculate(
            &selection.plan_id,
            selection.add_on_ids.iter().map(String::as_str),
            selection.cycle,
        )
    }

    /// Compute the cost breakdown for a plan, a set of active add-ons, and
    /// a billing cycle.
    ///
    /// Defined fallbacks, in order:
    /// - the negotiated tier always yields [`CostBreakdown::custom`],
    ///   whatever the add-ons or cycle;
    /// - an unknown plan yields [`CostBreakdown::zero`];
    /// - unknown add-on IDs, missing price cells, `Included` cells,
    ///   non-numeric cells, and metered add-ons all contribute nothing.
    ///
    /// The annual discount is applied to each line independently; each
    /// displayed figure is then rounded to the nearest whole unit, half
    /// away from zero.
    #[must_use]
    pub fn calculate<I, S>(
        &self,
        plan_id: &str,
        active_add_on_ids: I,
        cycle: BillingCycle,
    ) -> CostBreakdown
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Negotiated pricing is never derived arithmetically, even when the
        // catalog has no row for the tier.
        if plan_id == ENTERPRISE_PLAN_ID {
            return CostBreakdown::custom();
        }

        let Some(plan) = self.plans.get(plan_id) else {
            return CostBreakdown::zero();
        };
        let symbol = currency_symbol(&plan.currency);

        let base = match cycle {
            BillingCycle::Monthly => plan.monthly_price,
            BillingCycle::Annual => plan
                .annual_price
                .unwrap_or_else(|| self.policy.apply_annual(plan.monthly_price)),
        };

        let mut add_on_total = Money::zero();
        for id in active_add_on_ids {
            let Some(add_on) = self.add_ons.get(id.as_ref()) else {
                continue;
            };
            // Metered add-ons bill by usage and never enter the flat
            // recurring total.
            if add_on.is_metered() {
                continue;
            }
            let Some(amount) = add_on.price_for(&plan.id).and_then(AddOnPrice::flat_amount)
            else {
                continue;
            };
            add_on_total = add_on_total.saturating_add(self.policy.for_cycle(amount, cycle));
        }

        let total = base.saturating_add(add_on_total);
        CostBreakdown {
            base_price: base.format_whole_with(symbol),
            total_add_ons: add_on_total.format_whole_with(symbol),
            total: total.format_whole_with(symbol),
        }
    }
}
