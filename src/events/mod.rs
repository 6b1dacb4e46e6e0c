use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::alert::{Alert, AlertStatus};
use crate::models::security::SecurityStatus;

#[derive(Debug, Clone, Serialize)]
pub struct DomainEvent {
    pub id: Uuid,
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub subject_id: Option<Uuid>,
    pub payload: SimulationEvent,
}

impl DomainEvent {
    pub fn new(occurred_at: DateTime<Utc>, payload: SimulationEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: payload.name(),
            occurred_at,
            subject_id: payload.subject_id(),
            payload,
        }
    }
}

/// Everything a simulation session reports to the outside world.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimulationEvent {
    SessionStarted,
    SessionStopped,
    AlertCreated { alert: Alert },
    StatusChanged { alert_id: Uuid, from: AlertStatus, to: AlertStatus },
    AlertDismissed { alert_id: Uuid },
    AlertEscalated { alert: Alert },
    AlertsEvicted { alert_ids: Vec<Uuid> },
    ToastRaised { alert_id: Uuid },
    InsightGenerated,
    SecurityStatusChanged { from: SecurityStatus, to: SecurityStatus },
}

impl SimulationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimulationEvent::SessionStarted => "session.started",
            SimulationEvent::SessionStopped => "session.stopped",
            SimulationEvent::AlertCreated { .. } => "alert.created",
            SimulationEvent::StatusChanged { .. } => "alert.status_changed",
            SimulationEvent::AlertDismissed { .. } => "alert.dismissed",
            SimulationEvent::AlertEscalated { .. } => "alert.escalated",
            SimulationEvent::AlertsEvicted { .. } => "alert.evicted",
            SimulationEvent::ToastRaised { .. } => "toast.raised",
            SimulationEvent::InsightGenerated => "insight.generated",
            SimulationEvent::SecurityStatusChanged { .. } => "security.status_changed",
        }
    }

    pub fn subject_id(&self) -> Option<Uuid> {
        match self {
            SimulationEvent::AlertCreated { alert } | SimulationEvent::AlertEscalated { alert } => Some(alert.id),
            SimulationEvent::StatusChanged { alert_id, .. }
            | SimulationEvent::AlertDismissed { alert_id }
            | SimulationEvent::ToastRaised { alert_id } => Some(*alert_id),
            _ => None,
        }
    }
}

pub type EventBus = broadcast::Sender<DomainEvent>;

pub fn init_event_bus() -> (EventBus, broadcast::Receiver<DomainEvent>) {
    broadcast::channel(1024)
}

/// Drains the bus into the trace log until every sender is gone.
pub async fn start_event_listener(mut rx: broadcast::Receiver<DomainEvent>) {
    tracing::info!("Simulation event listener started");
    loop {
        match rx.recv().await {
            Ok(event) => log_event(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event listener lagged behind the simulation");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::info!("Simulation event listener stopped");
}

fn log_event(event: &DomainEvent) {
    match &event.payload {
        SimulationEvent::AlertCreated { alert } => tracing::info!(
            event = event.name,
            alert_id = %alert.id,
            vehicle = %alert.vehicle_id,
            severity = alert.severity.as_str(),
            "{}",
            alert.issue
        ),
        SimulationEvent::StatusChanged { alert_id, from, to } => tracing::debug!(
            event = event.name,
            %alert_id,
            from = from.as_str(),
            to = to.as_str(),
            "alert status advanced"
        ),
        SimulationEvent::AlertEscalated { alert } => {
            tracing::warn!(event = event.name, alert_id = %alert.id, "alert escalated to critical")
        }
        SimulationEvent::SecurityStatusChanged { from, to } => tracing::info!(
            event = event.name,
            from = from.as_str(),
            to = to.as_str(),
            "{}",
            to.title()
        ),
        SimulationEvent::AlertsEvicted { alert_ids } => {
            tracing::debug!(event = event.name, count = alert_ids.len(), "resolved alerts retired")
        }
        _ => tracing::debug!(event = event.name, subject = ?event.subject_id, "simulation event"),
    }
}
