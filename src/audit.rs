//! Audit logging for selection changes.
//!
//! Provides a trait-based audit logging system for tracking what a user
//! did to their subscription selection. Events carry plan and add-on IDs
//! and formatted totals only — raw payment input never reaches this
//! module.

use std::fmt;

use crate::pricing::BillingCycle;

/// Audit event types for selection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// A plan was selected.
    PlanSelected {
        plan_id: String,
        cycle: BillingCycle,
    },
    /// An add-on was switched on.
    AddOnEnabled {
        add_on_id: String,
        plan_id: String,
    },
    /// An add-on was switched off.
    AddOnDisabled {
        add_on_id: String,
        plan_id: String,
    },
    /// The billing cycle changed.
    CycleChanged { cycle: BillingCycle },
    /// A persisted selection was restored from storage.
    SelectionRestored {
        plan_id: String,
        add_on_count: usize,
    },
    /// A cost breakdown was computed for the current selection.
    QuoteComputed {
        plan_id: String,
        cycle: BillingCycle,
        total: String,
    },
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlanSelected { plan_id, cycle } => {
                write!(f, "Plan selected: plan={plan_id}, cycle={cycle}")
            }
            Self::AddOnEnabled { add_on_id, plan_id } => {
                write!(f, "Add-on enabled: add_on={add_on_id}, plan={plan_id}")
            }
            Self::AddOnDisabled { add_on_id, plan_id } => {
                write!(f, "Add-on disabled: add_on={add_on_id}, plan={plan_id}")
            }
            Self::CycleChanged { cycle } => {
                write!(f, "Billing cycle changed: cycle={cycle}")
            }
            Self::SelectionRestored {
                plan_id,
                add_on_count,
            } => {
                write!(
                    f,
                    "Selection restored: plan={plan_id}, add_ons={add_on_count}"
                )
            }
            Self::QuoteComputed {
                plan_id,
                cycle,
                total,
            } => {
                write!(
                    f,
                    "Quote computed: plan={plan_id}, cycle={cycle}, total={total}"
                )
            }
        }
    }
}

/// Trait for audit logging backends.
///
/// Implementations should handle failures gracefully (e.g. log to stderr)
/// rather than disrupting the selection flow.
#[allow(async_fn_in_trait)]
pub trait AuditLogger: Send + Sync {
    /// Log a selection audit event.
    async fn log(&self, event: AuditEvent);
}

/// No-op audit logger that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditLogger;

impl AuditLogger for NoOpAuditLogger {
    async fn log(&self, _event: AuditEvent) {
        // No-op
    }
}

/// Tracing-based audit logger.
///
/// Logs audit events using the `tracing` crate at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLogger;

impl AuditLogger for TracingAuditLogger {
    async fn log(&self, event: AuditEvent) {
        tracing::info!(
            target: "ledgerline::audit",
            event_type = %event_kind(&event),
            "{}", event
        );
    }
}

/// Get the event kind as a string for structured logging.
fn event_kind(event: &AuditEvent) -> &'static str {
    match event {
        AuditEvent::PlanSelected { .. } => "plan_selected",
        AuditEvent::AddOnEnabled { .. } => "add_on_enabled",
        AuditEvent::AddOnDisabled { .. } => "add_on_disabled",
        AuditEvent::CycleChanged { .. } => "cycle_changed",
        AuditEvent::SelectionRestored { .. } => "selection_restored",
        AuditEvent::QuoteComputed { .. } => "quote_computed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Test audit logger that captures events.
    #[derive(Default)]
    pub struct TestAuditLogger {
        pub events: Arc<Mutex<Vec<AuditEvent>>>,
    }

    impl AuditLogger for TestAuditLogger {
        async fn log(&self, event: AuditEvent) {
            self.events.lock().await.push(event);
        }
    }

    #[test]
    fn test_event_display() {
        let event = AuditEvent::PlanSelected {
            plan_id: "growth".to_string(),
            cycle: BillingCycle::Annual,
        };
        assert_eq!(event.to_string(), "Plan selected: plan=growth, cycle=annual");

        let event = AuditEvent::QuoteComputed {
            plan_id: "growth".to_string(),
            cycle: BillingCycle::Monthly,
            total: "$1,599".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "Quote computed: plan=growth, cycle=monthly, total=$1,599"
        );
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(
            event_kind(&AuditEvent::CycleChanged {
                cycle: BillingCycle::Monthly
            }),
            "cycle_changed"
        );
        assert_eq!(
            event_kind(&AuditEvent::SelectionRestored {
                plan_id: "free".to_string(),
                add_on_count: 0
            }),
            "selection_restored"
        );
    }

    #[tokio::test]
    async fn test_capture_events() {
        let logger = TestAuditLogger::default();
        logger
            .log(AuditEvent::AddOnEnabled {
                add_on_id: "sso".to_string(),
                plan_id: "growth".to_string(),
            })
            .await;
        let events = logger.events.lock().await;
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_noop_logger() {
        NoOpAuditLogger
            .log(AuditEvent::CycleChanged {
                cycle: BillingCycle::Annual,
            })
            .await;
    }
}
