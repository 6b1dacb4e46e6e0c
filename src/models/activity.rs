use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Category tag of an activity log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Data,
    Diagnosis,
    Customer,
    Appointment,
    Security,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Data => "data",
            ActivityKind::Diagnosis => "diagnosis",
            ActivityKind::Customer => "customer",
            ActivityKind::Appointment => "appointment",
            ActivityKind::Security => "security",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "Customer Agent calling 2021 Kia Seltos owner")]
    pub action: String,
    pub kind: ActivityKind,
}

impl ActivityLogEntry {
    pub fn new(kind: ActivityKind, action: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            action: action.into(),
            kind,
        }
    }
}
