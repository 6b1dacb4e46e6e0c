use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    DataAnalysis,
    Diagnosis,
    CustomerEngagement,
    Scheduling,
    Feedback,
    Manufacturing,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::DataAnalysis,
        AgentKind::Diagnosis,
        AgentKind::CustomerEngagement,
        AgentKind::Scheduling,
        AgentKind::Feedback,
        AgentKind::Manufacturing,
    ];

    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "data_analysis" => Some(AgentKind::DataAnalysis),
            "diagnosis" => Some(AgentKind::Diagnosis),
            "customer_engagement" => Some(AgentKind::CustomerEngagement),
            "scheduling" => Some(AgentKind::Scheduling),
            "feedback" => Some(AgentKind::Feedback),
            "manufacturing" => Some(AgentKind::Manufacturing),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            AgentKind::DataAnalysis => "data_analysis",
            AgentKind::Diagnosis => "diagnosis",
            AgentKind::CustomerEngagement => "customer_engagement",
            AgentKind::Scheduling => "scheduling",
            AgentKind::Feedback => "feedback",
            AgentKind::Manufacturing => "manufacturing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::DataAnalysis => "Data Analysis Agent",
            AgentKind::Diagnosis => "Diagnosis Agent",
            AgentKind::CustomerEngagement => "Customer Engagement Agent",
            AgentKind::Scheduling => "Scheduling Agent",
            AgentKind::Feedback => "Feedback Agent",
            AgentKind::Manufacturing => "Manufacturing Insights",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentReport {
    #[schema(example = "diagnosis")]
    pub agent_id: String,
    pub agent_name: Option<String>,
    #[schema(example = "VEH001")]
    pub vehicle_id: String,
    pub report: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReportQuestion {
    #[schema(example = "how much will it cost?")]
    pub question: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportAnswer {
    pub question: String,
    pub answer: String,
}
