use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::alert::Alert;

/// Display counters refreshed on the counter tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LiveCounters {
    pub vehicles_monitored: u32,
    pub active_alerts: u32,
    pub calls_in_progress: u32,
    pub todays_predictions: u32,
}

impl Default for LiveCounters {
    fn default() -> Self {
        Self {
            vehicles_monitored: 187,
            active_alerts: 0,
            calls_in_progress: 3,
            todays_predictions: 342,
        }
    }
}

/// Session statistics shown beside the alert feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Statistics {
    pub total_alerts: u32,
    pub critical_alerts: u32,
    pub predicted_failures: u32,
    pub calls_in_progress: u32,
    pub calls_completed: u32,
    pub vehicles_scheduled: u32,
    pub manufacturing_insights: u32,
}

/// Transient notification for a critical or escalated alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Toast {
    pub alert: Alert,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
