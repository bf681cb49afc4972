//! The ephemeral subscription selection a user builds up in the plan
//! wizard.
//!
//! A selection is plain data: the chosen plan, the active add-ons, and the
//! billing cycle. It is owned by the caller (or a
//! [`SelectionSession`](crate::session::SelectionSession)) and passed to
//! the cost calculator by reference; nothing here touches storage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::FREE_PLAN_ID;
use crate::pricing::BillingCycle;

/// A proposed subscription: plan, active add-ons, billing cycle.
///
/// Add-on IDs are kept in a `BTreeSet` so persisted snapshots serialize
/// deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSelection {
    /// The selected plan ID.
    pub plan_id: String,
    /// IDs of the active add-ons.
    pub add_on_ids: BTreeSet<String>,
    /// The selected billing cycle.
    pub cycle: BillingCycle,
}

impl Default for SubscriptionSelection {
    /// The free plan, billed monthly, with no add-ons.
    fn default() -> Self {
        Self::new(FREE_PLAN_ID)
    }
}

impl SubscriptionSelection {
    /// Create a monthly selection of a plan with no add-ons.
    #[must_use]
    pub fn new(plan_id: impl Into<String>) -> Self {
        Self {
            plan_id: plan_id.into(),
            add_on_ids: BTreeSet::new(),
            cycle: BillingCycle::Monthly,
        }
    }

    /// Set the billing cycle.
    #[must_use]
    pub fn with_cycle(mut self, cycle: BillingCycle) -> Self {
        self.cycle = cycle;
        self
    }

    /// Activate a set of add-ons.
    #[must_use]
    pub fn with_add_ons<I, S>(mut self, add_on_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_on_ids
            .extend(add_on_ids.into_iter().map(Into::into));
        self
    }

    /// Check if an add-on is active.
    #[must_use]
    pub fn has_add_on(&self, add_on_id: &str) -> bool {
        self.add_on_ids.contains(add_on_id)
    }

    /// Flip an add-on on or off; returns whether it is now active.
    pub fn toggle_add_on(&mut self, add_on_id: &str) -> bool {
        if self.add_on_ids.remove(add_on_id) {
            false
        } else {
            self.add_on_ids.insert(add_on_id.to_string());
            true
        }
    }

    /// Check if the selection bills annually.
    #[must_use]
    pub fn is_annual(&self) -> bool {
        self.cycle == BillingCycle::Annual
    }
}
