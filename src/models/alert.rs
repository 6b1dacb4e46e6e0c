use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Severity class of a vehicle alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Severity::Critical),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Lifecycle of an alert. Variants are declared in lifecycle order, `Resolved` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Analyzing,
    CallingCustomer,
    AppointmentScheduled,
    Resolved,
}

impl AlertStatus {
    pub const LIFECYCLE: [AlertStatus; 4] = [
        AlertStatus::Analyzing,
        AlertStatus::CallingCustomer,
        AlertStatus::AppointmentScheduled,
        AlertStatus::Resolved,
    ];

    /// The following state, or `None` for the terminal state.
    pub fn next(&self) -> Option<Self> {
        match self {
            AlertStatus::Analyzing => Some(AlertStatus::CallingCustomer),
            AlertStatus::CallingCustomer => Some(AlertStatus::AppointmentScheduled),
            AlertStatus::AppointmentScheduled => Some(AlertStatus::Resolved),
            AlertStatus::Resolved => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AlertStatus::Resolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Analyzing => "analyzing",
            AlertStatus::CallingCustomer => "calling_customer",
            AlertStatus::AppointmentScheduled => "appointment_scheduled",
            AlertStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub id: Uuid,
    #[schema(example = "VEH427")]
    pub vehicle_id: String,
    #[schema(example = "2022 Tata Nexon EV")]
    pub vehicle_model: String,
    pub severity: Severity,
    #[schema(example = "Brake temperature spike detected")]
    pub issue: String,
    #[schema(example = "Pune, Maharashtra")]
    pub location: String,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves the alert one step along its lifecycle and returns the new status.
    /// `resolved_at` is stamped exactly once, when the terminal state is entered.
    pub(crate) fn advance(&mut self, now: DateTime<Utc>) -> Option<AlertStatus> {
        let next = self.status.next()?;
        self.status = next;
        if next.is_terminal() && self.resolved_at.is_none() {
            self.resolved_at = Some(now);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_linear_and_terminates() {
        let mut seen = vec![AlertStatus::Analyzing];
        let mut current = AlertStatus::Analyzing;
        while let Some(next) = current.next() {
            assert!(next > current);
            seen.push(next);
            current = next;
        }
        assert_eq!(seen, AlertStatus::LIFECYCLE.to_vec());
        assert!(AlertStatus::Resolved.next().is_none());
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Some(Severity::Critical));
        assert_eq!(Severity::parse(" low "), Some(Severity::Low));
        assert_eq!(Severity::parse("urgent"), None);
    }

    #[test]
    fn status_serializes_snake_case() {
        let v = serde_json::to_value(AlertStatus::AppointmentScheduled).unwrap();
        assert_eq!(v, "appointment_scheduled");
    }
}
