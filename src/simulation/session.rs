use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::SimulationConfig;
use crate::errors::AppError;
use crate::events::{DomainEvent, EventBus, SimulationEvent};
use crate::models::activity::{ActivityKind, ActivityLogEntry};
use crate::models::alert::{Alert, AlertStatus, Severity};
use crate::models::counters::{LiveCounters, Statistics, Toast};
use crate::models::security::SecurityStatus;
use crate::simulation::catalog;
use crate::simulation::feed::RollingBuffer;
use crate::simulation::random::RandomSource;
use crate::simulation::timers::{duration_ms, TimerKind, TimerSet};
use crate::utils::utc_now;

/// Point-in-time copy of everything the dashboard renders.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SimulationSnapshot {
    pub running: bool,
    pub elapsed_ms: u64,
    pub now: DateTime<Utc>,
    pub alerts: Vec<Alert>,
    pub activity: Vec<ActivityLogEntry>,
    pub counters: LiveCounters,
    pub statistics: Statistics,
    pub security_status: SecurityStatus,
    pub toast: Option<Toast>,
}

/// One alert simulation, owning its clock, timers and random source.
///
/// Time only moves through [`advance`](Self::advance). Every timer that
/// falls due inside the advanced window fires in due-time order, so a test
/// can drive the session tick by tick without real timers.
pub struct SimulationSession {
    config: SimulationConfig,
    rng: Box<dyn RandomSource>,
    epoch: DateTime<Utc>,
    elapsed_ms: u64,
    timers: TimerSet,
    bootstrap_remaining: u32,
    running: bool,
    alerts: RollingBuffer<Alert>,
    activity: RollingBuffer<ActivityLogEntry>,
    counters: LiveCounters,
    statistics: Statistics,
    security_status: SecurityStatus,
    toast: Option<Toast>,
    events: Option<EventBus>,
}

impl SimulationSession {
    pub fn new(config: SimulationConfig, rng: Box<dyn RandomSource>) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            alerts: RollingBuffer::new(config.max_alerts),
            activity: RollingBuffer::new(config.max_log_entries),
            config,
            rng,
            epoch: utc_now(),
            elapsed_ms: 0,
            timers: TimerSet::new(),
            bootstrap_remaining: 0,
            running: false,
            counters: LiveCounters::default(),
            statistics: Statistics::default(),
            security_status: SecurityStatus::default(),
            toast: None,
            events: None,
        })
    }

    /// Anchors session time 0 at `epoch` instead of construction time.
    pub fn with_epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.epoch + chrono::Duration::milliseconds(self.elapsed_ms as i64)
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    /// Arms every timer. The startup burst is due immediately.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        let now = self.elapsed_ms;

        self.bootstrap_remaining = self.config.bootstrap_alerts;
        if self.bootstrap_remaining > 0 {
            self.timers.arm(TimerKind::Bootstrap, now);
        }
        let first_generation = self.draw_generation_interval();
        self.timers.arm_after(TimerKind::Generation, now, first_generation);
        self.timers.arm_after(TimerKind::Progression, now, self.config.progression_interval);
        self.timers.arm_after(TimerKind::Eviction, now, self.config.eviction_interval);
        self.timers.arm_after(TimerKind::Counters, now, self.config.counter_interval);
        self.timers.arm_after(TimerKind::Insights, now, self.config.insight_interval);
        self.timers.arm_after(TimerKind::Security, now, self.config.security_interval);

        tracing::debug!(elapsed_ms = now, "simulation session started");
        self.publish(SimulationEvent::SessionStarted);
    }

    /// Cancels every timer. Later calls to `advance` only move the clock.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.timers.cancel_all();
        self.bootstrap_remaining = 0;
        tracing::debug!(elapsed_ms = self.elapsed_ms, "simulation session stopped");
        self.publish(SimulationEvent::SessionStopped);
    }

    pub fn advance(&mut self, dt: Duration) {
        let target = self.elapsed_ms.saturating_add(duration_ms(dt));
        while let Some((kind, at)) = self.timers.next_due(target) {
            self.elapsed_ms = self.elapsed_ms.max(at);
            self.fire(kind);
            self.expire_toast();
        }
        self.elapsed_ms = target;
        self.expire_toast();
    }

    fn fire(&mut self, kind: TimerKind) {
        let now = self.elapsed_ms;
        match kind {
            TimerKind::Bootstrap => {
                self.emit_alert();
                self.bootstrap_remaining = self.bootstrap_remaining.saturating_sub(1);
                if self.bootstrap_remaining > 0 {
                    self.timers.arm_after(kind, now, self.config.bootstrap_stagger);
                } else {
                    self.timers.cancel(kind);
                }
            }
            TimerKind::Generation => {
                self.emit_alert();
                let next = self.draw_generation_interval();
                self.timers.arm_after(kind, now, next);
            }
            TimerKind::Progression => {
                self.progress_statuses();
                self.timers.arm_after(kind, now, self.config.progression_interval);
            }
            TimerKind::Eviction => {
                self.evict_resolved();
                self.timers.arm_after(kind, now, self.config.eviction_interval);
            }
            TimerKind::Counters => {
                self.refresh_counters();
                self.timers.arm_after(kind, now, self.config.counter_interval);
            }
            TimerKind::Insights => {
                self.maybe_generate_insight();
                self.timers.arm_after(kind, now, self.config.insight_interval);
            }
            TimerKind::Security => {
                self.maybe_change_security_status();
                self.timers.arm_after(kind, now, self.config.security_interval);
            }
        }
    }

    fn draw_generation_interval(&mut self) -> Duration {
        let low = duration_ms(self.config.generation_min);
        let high = duration_ms(self.config.generation_max);
        Duration::from_millis(self.rng.range_inclusive(low, high))
    }

    /// Generates one alert and pushes it onto the feed.
    pub fn emit_alert(&mut self) -> Alert {
        let now = self.now();
        let alert = catalog::generate_alert(self.rng.as_mut(), now);

        self.statistics.total_alerts += 1;
        if alert.severity == Severity::Critical {
            self.statistics.critical_alerts += 1;
            self.raise_toast(alert.clone());
        }

        let evicted = self.alerts.push(alert.clone());
        for old in &evicted {
            self.release_call(old);
        }
        self.log(ActivityKind::Data, catalog::scanning_message(&alert));
        self.publish(SimulationEvent::AlertCreated { alert: alert.clone() });
        alert
    }

    fn progress_statuses(&mut self) {
        let now = self.now();
        let p = self.config.transition_probability;

        let mut transitions = Vec::new();
        for alert in self.alerts.iter_mut() {
            if alert.is_resolved() {
                continue;
            }
            if !self.rng.chance(p) {
                continue;
            }
            let from = alert.status;
            if let Some(to) = alert.advance(now) {
                transitions.push((alert.clone(), from, to));
            }
        }

        for (alert, from, to) in transitions {
            match to {
                AlertStatus::CallingCustomer => self.statistics.calls_in_progress += 1,
                AlertStatus::AppointmentScheduled => {
                    self.release_call_count();
                    self.statistics.predicted_failures += 1;
                    self.statistics.vehicles_scheduled += 1;
                }
                AlertStatus::Resolved => self.statistics.calls_completed += 1,
                AlertStatus::Analyzing => {}
            }
            if let Some(message) = catalog::transition_message(&alert, to) {
                self.log(ActivityKind::Customer, message);
            }
            self.publish(SimulationEvent::StatusChanged {
                alert_id: alert.id,
                from,
                to,
            });
        }
    }

    fn evict_resolved(&mut self) {
        let now = self.now();
        let retention = to_chrono(self.config.resolved_retention);

        let mut retired = Vec::new();
        self.alerts.retain(|alert| {
            let expired = match (alert.status, alert.resolved_at) {
                (AlertStatus::Resolved, Some(at)) => now.signed_duration_since(at) >= retention,
                _ => false,
            };
            if expired {
                retired.push(alert.id);
            }
            !expired
        });

        if !retired.is_empty() {
            self.publish(SimulationEvent::AlertsEvicted { alert_ids: retired });
        }
    }

    fn refresh_counters(&mut self) {
        let vehicles = self.counters.vehicles_monitored + self.rng.range_inclusive(0, 2) as u32;
        let calls = if self.statistics.calls_in_progress > 0 {
            self.statistics.calls_in_progress
        } else {
            self.rng.range_inclusive(0, 4) as u32
        };
        let predictions = self.counters.todays_predictions + self.rng.range_inclusive(0, 1) as u32;

        self.counters = LiveCounters {
            vehicles_monitored: vehicles.min(self.config.vehicles_monitored_ceiling),
            active_alerts: self.active_alert_count() as u32,
            calls_in_progress: calls,
            todays_predictions: predictions.min(self.config.predictions_ceiling),
        };
    }

    fn maybe_generate_insight(&mut self) {
        if !self.rng.chance(self.config.insight_probability) {
            return;
        }
        self.statistics.manufacturing_insights += 1;
        self.log(ActivityKind::Security, catalog::INSIGHT_MESSAGE);
        self.publish(SimulationEvent::InsightGenerated);
    }

    /// Draws a candidate status first, then gates the change on the configured probability.
    fn maybe_change_security_status(&mut self) {
        let candidate = SecurityStatus::ALL[self.rng.index(SecurityStatus::ALL.len())];
        if !self.rng.chance(self.config.security_probability) {
            return;
        }
        let from = self.security_status;
        self.security_status = candidate;
        if from != candidate {
            self.publish(SimulationEvent::SecurityStatusChanged { from, to: candidate });
        }
    }

    /// Removes the alert whatever its state. Returns whether it was present.
    pub fn dismiss(&mut self, alert_id: Uuid) -> bool {
        let Some(alert) = self.alerts.iter().find(|a| a.id == alert_id).cloned() else {
            return false;
        };
        self.release_call(&alert);
        self.alerts.retain(|a| a.id != alert_id);
        self.publish(SimulationEvent::AlertDismissed { alert_id });
        true
    }

    /// Forces the alert to critical severity and raises a toast for it.
    /// Status and timestamps are left untouched.
    pub fn escalate(&mut self, alert_id: Uuid) -> Option<Alert> {
        let escalated = {
            let alert = self.alerts.iter_mut().find(|a| a.id == alert_id)?;
            alert.severity = Severity::Critical;
            alert.clone()
        };
        self.log(ActivityKind::Security, catalog::escalation_message(&escalated));
        self.raise_toast(escalated.clone());
        self.publish(SimulationEvent::AlertEscalated {
            alert: escalated.clone(),
        });
        Some(escalated)
    }

    pub fn alert(&self, alert_id: Uuid) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == alert_id)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.to_vec()
    }

    pub fn alerts_with_severity(&self, severity: Option<Severity>) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|a| severity.map_or(true, |s| a.severity == s))
            .cloned()
            .collect()
    }

    pub fn active_alert_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_resolved()).count()
    }

    pub fn activity(&self) -> Vec<ActivityLogEntry> {
        self.activity.to_vec()
    }

    pub fn counters(&self) -> LiveCounters {
        self.counters
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn security_status(&self) -> SecurityStatus {
        self.security_status
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            running: self.running,
            elapsed_ms: self.elapsed_ms,
            now: self.now(),
            alerts: self.alerts(),
            activity: self.activity(),
            counters: self.counters,
            statistics: self.statistics,
            security_status: self.security_status,
            toast: self.toast.clone(),
        }
    }

    fn release_call(&mut self, alert: &Alert) {
        if alert.status == AlertStatus::CallingCustomer {
            self.release_call_count();
        }
    }

    fn release_call_count(&mut self) {
        let calls = &mut self.statistics.calls_in_progress;
        *calls = calls.saturating_sub(1);
    }

    fn raise_toast(&mut self, alert: Alert) {
        let raised_at = self.now();
        let alert_id = alert.id;
        self.toast = Some(Toast {
            alert,
            raised_at,
            expires_at: raised_at + to_chrono(self.config.toast_duration),
        });
        self.publish(SimulationEvent::ToastRaised { alert_id });
    }

    fn expire_toast(&mut self) {
        let now = self.now();
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    fn log(&mut self, kind: ActivityKind, action: impl Into<String>) {
        let entry = ActivityLogEntry::new(kind, action, self.now());
        self.activity.push(entry);
    }

    fn publish(&self, event: SimulationEvent) {
        if let Some(bus) = &self.events {
            // no subscribers is not an error
            let _ = bus.send(DomainEvent::new(self.now(), event));
        }
    }
}

fn to_chrono(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or_else(|_| chrono::Duration::days(365_000))
}
