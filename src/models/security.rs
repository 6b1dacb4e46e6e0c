use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Agent behaviour status shown on the security console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SecurityStatus {
    #[default]
    Normal,
    Suspicious,
    Blocked,
}

impl SecurityStatus {
    /// Candidates for the periodic status draw, picked uniformly.
    pub const ALL: [SecurityStatus; 3] = [
        SecurityStatus::Normal,
        SecurityStatus::Suspicious,
        SecurityStatus::Blocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityStatus::Normal => "normal",
            SecurityStatus::Suspicious => "suspicious",
            SecurityStatus::Blocked => "blocked",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SecurityStatus::Normal => "Security Normal",
            SecurityStatus::Suspicious => "Suspicious Activity",
            SecurityStatus::Blocked => "Threat Blocked",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SecurityStatus::Normal => "All agents operating within normal parameters",
            SecurityStatus::Suspicious => "Unusual agent behavior detected - monitoring",
            SecurityStatus::Blocked => "Malicious action blocked - agent quarantined",
        }
    }
}
