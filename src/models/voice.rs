use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard views the shell can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Vehicles,
    Scheduling,
    Analytics,
    CarOwner,
    Ueba,
    Manufacturing,
    Feedback,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Vehicles => "vehicles",
            View::Scheduling => "scheduling",
            View::Analytics => "analytics",
            View::CarOwner => "car_owner",
            View::Ueba => "ueba",
            View::Manufacturing => "manufacturing",
            View::Feedback => "feedback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TranscriptTurn {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VoiceCommandRequest {
    #[schema(example = "schedule appointment")]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoiceCommandResponse {
    /// Name of the rule that matched, `fallback` when none did.
    pub rule: String,
    pub response: String,
    pub view: Option<View>,
    /// View active after the command was applied.
    pub active_view: View,
}
