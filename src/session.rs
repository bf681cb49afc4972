//! Selection session: the stateful wizard layer around the pure pricing
//! core.
//!
//! A [`SelectionSession`] owns the catalogs, a [`SelectionStore`] for
//! persistence, and the user's current [`SubscriptionSelection`]. Every
//! mutation validates against the catalogs, persists a snapshot, and emits
//! an audit event. The pricing and payment validation modules stay
//! storage-free; this is the only place selections touch a backend.
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerline::session::SelectionSession;
//! use ledgerline::store::InMemorySelectionStore;
//!
//! let mut session = SelectionSession::new(InMemorySelectionStore::new(), plans, add_ons);
//! session.restore().await?;
//! session.select_plan("growth").await?;
//! session.toggle_add_on("priority-support").await?;
//! let breakdown = session.quote().await;
//! ```

use crate::audit::{AuditEvent, AuditLogger, NoOpAuditLogger};
use crate::catalog::{validate_add_on_id, validate_plan_id, AddOnCatalog, PlanCatalog};
use crate::error::{BillingError, Result};
use crate::pricing::{BillingCycle, CostBreakdown, CostCalculator, DiscountPolicy};
use crate::selection::SubscriptionSelection;
use crate::store::SelectionStore;

/// Default storage key for the persisted selection snapshot.
pub const DEFAULT_SELECTION_KEY: &str = "billing.selection";

/// Stateful wizard session over a selection store and static catalogs.
pub struct SelectionSession<S: SelectionStore, A: AuditLogger = NoOpAuditLogger> {
    store: S,
    audit: A,
    key: String,
    plans: PlanCatalog,
    add_ons: AddOnCatalog,
    policy: DiscountPolicy,
    selection: SubscriptionSelection,
}

impl<S: SelectionStore> SelectionSession<S, NoOpAuditLogger> {
    /// Create a session with the default key, policy, and no audit
    /// logging.
    #[must_use]
    pub fn new(store: S, plans: PlanCatalog, add_ons: AddOnCatalog) -> Self {
        Self {
            store,
            audit: NoOpAuditLogger,
            key: DEFAULT_SELECTION_KEY.to_string(),
            plans,
            add_ons,
            policy: DiscountPolicy::default(),
            selection: SubscriptionSelection::default(),
        }
    }
}

impl<S: SelectionStore, A: AuditLogger> SelectionSession<S, A> {
    /// Use a different storage key (e.g. to scope per account).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Override the discount policy used for quotes.
    #[must_use]
    pub fn with_policy(mut self, policy: DiscountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach an audit logger.
    #[must_use]
    pub fn with_audit<B: AuditLogger>(self, audit: B) -> SelectionSession<S, B> {
        SelectionSession {
            store: self.store,
            audit,
            key: self.key,
            plans: self.plans,
            add_ons: self.add_ons,
            policy: self.policy,
            selection: self.selection,
        }
    }

    /// The current in-memory selection.
    #[must_use]
    pub fn selection(&self) -> &SubscriptionSelection {
        &self.selection
    }

    /// The plan catalog this session validates against.
    #[must_use]
    pub fn plans(&self) -> &PlanCatalog {
        &self.plans
    }

    /// The add-on catalog this session validates against.
    #[must_use]
    pub fn add_ons(&self) -> &AddOnCatalog {
        &self.add_ons
    }

    /// Restore the persisted selection from the store.
    ///
    /// A missing snapshot yields the default selection; a corrupt snapshot
    /// is discarded (with a warning) rather than surfaced, because the
    /// wizard must always be able to render.
    ///
    /// # Errors
    ///
    /// Returns an error only when the storage backend itself fails.
    pub async fn restore(&mut self) -> Result<&SubscriptionSelection> {
        self.selection = match self.store.get(&self.key).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(selection) => selection,
                Err(err) => {
                    tracing::warn!(
                        target: "ledgerline::session",
                        error = %err,
                        "discarding corrupt selection snapshot"
                    );
                    SubscriptionSelection::default()
                }
            },
            None => SubscriptionSelection::default(),
        };

        self.audit
            .log(AuditEvent::SelectionRestored {
                plan_id: self.selection.plan_id.clone(),
                add_on_count: self.selection.add_on_ids.len(),
            })
            .await;
        Ok(&self.selection)
    }

    /// Select a plan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPlanId` for a malformed ID, `PlanNotFound` when the
    /// catalog has no such plan, or a storage error if persisting fails.
    pub async fn select_plan(&mut self, plan_id: &str) -> Result<()> {
        validate_plan_id(plan_id)?;
        if !self.plans.contains(plan_id) {
            return Err(BillingError::PlanNotFound {
                plan_id: plan_id.to_string(),
            });
        }

        self.selection.plan_id = plan_id.to_string();
        self.persist().await?;
        self.audit
            .log(AuditEvent::PlanSelected {
                plan_id: plan_id.to_string(),
                cycle: self.selection.cycle,
            })
            .await;
        Ok(())
    }

    /// Flip an add-on on or off; returns whether it is now active.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddOnId` for a malformed ID, `AddOnNotFound` when
    /// the catalog has no such add-on, or a storage error if persisting
    /// fails.
    pub async fn toggle_add_on(&mut self, add_on_id: &str) -> Result<bool> {
        validate_add_on_id(add_on_id)?;
        if !self.add_ons.contains(add_on_id) {
            return Err(BillingError::AddOnNotFound {
                add_on_id: add_on_id.to_string(),
            });
        }

        let enabled = self.selection.toggle_add_on(add_on_id);
        self.persist().await?;
        let event = if enabled {
            AuditEvent::AddOnEnabled {
                add_on_id: add_on_id.to_string(),
                plan_id: self.selection.plan_id.clone(),
            }
        } else {
            AuditEvent::AddOnDisabled {
                add_on_id: add_on_id.to_string(),
                plan_id: self.selection.plan_id.clone(),
            }
        };
        self.audit.log(event).await;
        Ok(enabled)
    }

    /// Switch the billing cycle.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails.
    pub async fn set_cycle(&mut self, cycle: BillingCycle) -> Result<()> {
        if self.selection.cycle == cycle {
            return Ok(());
        }
        self.selection.cycle = cycle;
        self.persist().await?;
        self.audit.log(AuditEvent::CycleChanged { cycle }).await;
        Ok(())
    }

    /// Reset to the default selection and drop the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails to delete.
    pub async fn clear(&mut self) -> Result<()> {
        self.selection = SubscriptionSelection::default();
        self.store.remove(&self.key).await
    }

    /// Compute the cost breakdown for the current selection.
    ///
    /// Never fails; unknown entries degrade to the calculator's defined
    /// fallbacks.
    pub async fn quote(&self) -> CostBreakdown {
        let breakdown = CostCalculator::new(&self.plans, &self.add_ons)
            .with_policy(self.policy)
            .calculate_for(&self.selection);
        self.audit
            .log(AuditEvent::QuoteComputed {
                plan_id: self.selection.plan_id.clone(),
                cycle: self.selection.cycle,
                total: breakdown.total.clone(),
            })
            .await;
        breakdown
    }

    async fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.selection)?;
        self.store.set(&self.key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BillingType;
    use crate::money::Money;
    use crate::store::InMemorySelectionStore;

    fn plans() -> PlanCatalog {
        PlanCatalog::builder()
            .plan("free")
            .done()
            .plan("growth")
            .monthly_price_major(1500)
            .done()
            .build()
    }

    fn add_ons() -> AddOnCatalog {
        AddOnCatalog::builder()
            .add_on("priority-support")
            .flat_price("growth", Money::from_major(99))
            .done()
            .add_on("extra-events")
            .billing(BillingType::Metered)
            .per_unit_price("growth", Money::from_minor(5))
            .done()
            .build()
    }

    fn session() -> SelectionSession<InMemorySelectionStore> {
        SelectionSession::new(InMemorySelectionStore::new(), plans(), add_ons())
    }

    #[tokio::test]
    async fn test_restore_missing_snapshot() {
        let mut session = session();
        let selection = session.restore().await.unwrap();
        assert_eq!(selection, &SubscriptionSelection::default());
    }

    #[tokio::test]
    async fn test_restore_corrupt_snapshot() {
        let store = InMemorySelectionStore::new();
        store
            .set(DEFAULT_SELECTION_KEY, "not json at all")
            .await
            .unwrap();

        let mut session = SelectionSession::new(store, plans(), add_ons());
        let selection = session.restore().await.unwrap();
        assert_eq!(selection, &SubscriptionSelection::default());
    }

    #[tokio::test]
    async fn test_select_plan_persists() {
        let mut session = session();
        session.select_plan("growth").await.unwrap();
        assert_eq!(session.selection().plan_id, "growth");

        // A fresh session over the same store sees the change.
        let raw = session
            .store
            .get(DEFAULT_SELECTION_KEY)
            .await
            .unwrap()
            .unwrap();
        let restored: SubscriptionSelection = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored.plan_id, "growth");
    }

    #[tokio::test]
    async fn test_select_unknown_plan() {
        let mut session = session();
        let err = session.select_plan("nonexistent").await.unwrap_err();
        assert!(matches!(err, BillingError::PlanNotFound { .. }));

        let err = session.select_plan("bad id").await.unwrap_err();
        assert!(matches!(err, BillingError::InvalidPlanId { .. }));
    }

    #[tokio::test]
    async fn test_toggle_add_on() {
        let mut session = session();
        session.select_plan("growth").await.unwrap();

        assert!(session.toggle_add_on("priority-support").await.unwrap());
        assert!(session.selection().has_add_on("priority-support"));
        assert!(!session.toggle_add_on("priority-support").await.unwrap());
        assert!(!session.selection().has_add_on("priority-support"));

        let err = session.toggle_add_on("nonexistent").await.unwrap_err();
        assert!(matches!(err, BillingError::AddOnNotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_cycle_idempotent() {
        let mut session = session();
        session.set_cycle(BillingCycle::Monthly).await.unwrap();
        // Nothing persisted for a no-op change.
        assert!(session.store.is_empty());

        session.set_cycle(BillingCycle::Annual).await.unwrap();
        assert!(session.selection().is_annual());
        assert!(!session.store.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let mut session = session();
        session.select_plan("growth").await.unwrap();
        session.clear().await.unwrap();
        assert_eq!(session.selection(), &SubscriptionSelection::default());
        assert!(session.store.is_empty());
    }

    #[tokio::test]
    async fn test_quote_for_current_selection() {
        let mut session = session();
        session.select_plan("growth").await.unwrap();
        session.toggle_add_on("priority-support").await.unwrap();

        let breakdown = session.quote().await;
        assert_eq!(breakdown.base_price, "$1,500");
        assert_eq!(breakdown.total_add_ons, "$99");
        assert_eq!(breakdown.total, "$1,599");
    }
}
