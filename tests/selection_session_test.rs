use std::sync::Arc;

use tokio::sync::Mutex;

use ledgerline::{
    AddOnCatalog, AuditEvent, AuditLogger, BillingCycle, BillingError, InMemorySelectionStore,
    Money, PlanCatalog, SelectionSession, SubscriptionSelection, DEFAULT_SELECTION_KEY,
};
use ledgerline::store::SelectionStore;

/// Audit logger that captures events for assertions.
#[derive(Clone, Default)]
struct CapturingAuditLogger {
    events: Arc<Mutex<Vec<AuditEvent>>>,
}

impl AuditLogger for CapturingAuditLogger {
    async fn log(&self, event: AuditEvent) {
        self.events.lock().await.push(event);
    }
}

fn plans() -> PlanCatalog {
    PlanCatalog::builder()
        .plan("free")
        .done()
        .plan("starter")
        .monthly_price_major(699)
        .done()
        .plan("growth")
        .monthly_price_major(1500)
        .done()
        .build()
}

fn add_ons() -> AddOnCatalog {
    AddOnCatalog::builder()
        .add_on("priority-support")
        .flat_price("starter", Money::from_major(49))
        .flat_price("growth", Money::from_major(99))
        .done()
        .build()
}

#[tokio::test]
async fn wizard_flow_survives_a_restart() {
    let store = Arc::new(InMemorySelectionStore::new());

    {
        let mut session = SelectionSession::new(store.clone(), plans(), add_ons());
        session.restore().await.unwrap();
        session.select_plan("growth").await.unwrap();
        session.toggle_add_on("priority-support").await.unwrap();
        session.set_cycle(BillingCycle::Annual).await.unwrap();
    }

    // A new session over the same store picks the selection back up.
    let mut session = SelectionSession::new(store, plans(), add_ons());
    let selection = session.restore().await.unwrap();
    assert_eq!(selection.plan_id, "growth");
    assert!(selection.has_add_on("priority-support"));
    assert!(selection.is_annual());

    let breakdown = session.quote().await;
    // 1500*0.8 = 1200 base, 99*0.8 = 79.2 -> $79 add-ons, exact sum 1279.2.
    assert_eq!(breakdown.base_price, "$1,200");
    assert_eq!(breakdown.total_add_ons, "$79");
    assert_eq!(breakdown.total, "$1,279");
}

#[tokio::test]
async fn corrupt_snapshot_degrades_to_default() {
    let store = InMemorySelectionStore::new();
    store
        .set(DEFAULT_SELECTION_KEY, "{\"plan_id\": 42}")
        .await
        .unwrap();

    let mut session = SelectionSession::new(store, plans(), add_ons());
    let selection = session.restore().await.unwrap();
    assert_eq!(selection, &SubscriptionSelection::default());
}

#[tokio::test]
async fn unknown_ids_are_rejected_with_typed_errors() {
    let mut session = SelectionSession::new(InMemorySelectionStore::new(), plans(), add_ons());

    assert!(matches!(
        session.select_plan("premium").await.unwrap_err(),
        BillingError::PlanNotFound { .. }
    ));
    assert!(matches!(
        session.select_plan("bad plan!").await.unwrap_err(),
        BillingError::InvalidPlanId { .. }
    ));
    assert!(matches!(
        session.toggle_add_on("premium-support").await.unwrap_err(),
        BillingError::AddOnNotFound { .. }
    ));

    // Nothing was persisted by the failed mutations.
    assert_eq!(session.selection(), &SubscriptionSelection::default());
}

#[tokio::test]
async fn audit_trail_captures_the_flow() {
    let logger = CapturingAuditLogger::default();
    let mut session = SelectionSession::new(InMemorySelectionStore::new(), plans(), add_ons())
        .with_audit(logger.clone());

    session.restore().await.unwrap();
    session.select_plan("starter").await.unwrap();
    session.toggle_add_on("priority-support").await.unwrap();
    session.toggle_add_on("priority-support").await.unwrap();
    session.set_cycle(BillingCycle::Annual).await.unwrap();
    session.quote().await;

    let events = logger.events.lock().await;
    assert!(matches!(events[0], AuditEvent::SelectionRestored { .. }));
    assert!(matches!(
        events[1],
        AuditEvent::PlanSelected { ref plan_id, .. } if plan_id == "starter"
    ));
    assert!(matches!(events[2], AuditEvent::AddOnEnabled { .. }));
    assert!(matches!(events[3], AuditEvent::AddOnDisabled { .. }));
    assert!(matches!(
        events[4],
        AuditEvent::CycleChanged {
            cycle: BillingCycle::Annual
        }
    ));
    assert!(matches!(
        events[5],
        AuditEvent::QuoteComputed { ref total, .. } if total == "$559"
    ));
}

#[tokio::test]
async fn scoped_session_keys_do_not_collide() {
    let store = Arc::new(InMemorySelectionStore::new());

    let mut alice = SelectionSession::new(store.clone(), plans(), add_ons())
        .with_key("billing.selection.alice");
    let mut bob = SelectionSession::new(store.clone(), plans(), add_ons())
        .with_key("billing.selection.bob");

    alice.select_plan("growth").await.unwrap();
    bob.select_plan("starter").await.unwrap();

    alice.restore().await.unwrap();
    bob.restore().await.unwrap();
    assert_eq!(alice.selection().plan_id, "growth");
    assert_eq!(bob.selection().plan_id, "starter");
}
