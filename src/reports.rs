//! Canned agent reports.
//!
//! No analysis runs here: each agent id maps to a fixed report templated
//! with the vehicle, and follow-up questions are answered from a small
//! keyword rule table.

use crate::models::report::{AgentKind, AgentReport};
use crate::models::vehicle::Vehicle;
use crate::voice::rules::{CommandOutcome, CommandRule, Reply, RuleTable};

pub const REPORT_NOT_AVAILABLE: &str = "Report not available";

pub fn render_report(agent: AgentKind, vehicle: &Vehicle) -> String {
    let model = &vehicle.model;
    let owner = &vehicle.owner;
    match agent {
        AgentKind::DataAnalysis => format!(
            "DATA ANALYSIS REPORT
Vehicle: {model} ({id})
Owner: {owner}

SENSOR READINGS:
- Battery Voltage: 12.2V (LOW - Normal: 13.5V+)
- Engine Temperature: 105°C (HIGH - Normal: 85-95°C)
- Oil Pressure: 35 PSI (LOW - Normal: 40-60 PSI)
- Brake Wear: 78% (CRITICAL - Replace immediately)

ANOMALIES DETECTED:
1. Critical brake pad wear - Immediate attention required
2. Battery charging system showing degradation
3. Oil pressure below optimal range

Overall Health Score: 45/100",
            id = vehicle.vehicle_id
        ),
        AgentKind::Diagnosis => format!(
            "DIAGNOSTIC REPORT
Vehicle: {model}

PRIMARY DIAGNOSIS:
Component: Front & Rear Brake Pads
Status: CRITICAL - 78% Wear
Failure Probability: 90%
Time to Failure: 7-10 days
Estimated Cost: ₹5,000 - 8,000
Safety Risk: HIGH
Urgency: IMMEDIATE ACTION REQUIRED

TOTAL ESTIMATED COST: ₹10,000 - 17,000"
        ),
        AgentKind::CustomerEngagement => format!(
            "CUSTOMER CALL SCRIPT
Customer: {owner}
Vehicle: {model}

Opening:
\"Hello {owner}! This is Maya from your vehicle's AI assistant.\"

Issue:
\"Your {model} has critical brake wear at 78%.\"

Cost:
\"Estimated cost: ₹5,000-8,000\"

Appointment:
\"Available slots: Tomorrow 10 AM, 2 PM\""
        ),
        AgentKind::Scheduling => format!(
            "SCHEDULING REPORT
Vehicle: {model}

AVAILABLE APPOINTMENTS:
Tomorrow 10:00 AM - AutoCare Center
Tomorrow 2:00 PM - QuickFix Garage

ESTIMATED SERVICE TIME: 3-4 hours"
        ),
        AgentKind::Feedback => format!(
            "POST-SERVICE FEEDBACK
Vehicle: {model}

Satisfaction survey questions ready.
Awaiting service completion."
        ),
        AgentKind::Manufacturing => format!(
            "MANUFACTURING INSIGHTS
Model: {model}

RECURRING DEFECTS:
- Brake pad wear: 45% of fleet
- Battery issues: 32% of fleet

Data sent to OEM for quality improvement."
        ),
    }
}

/// Report for a raw agent id; unknown ids get the not-available text.
pub fn report_for(agent_id: &str, vehicle: &Vehicle) -> AgentReport {
    let agent = AgentKind::parse(agent_id);
    AgentReport {
        agent_id: agent_id.to_string(),
        agent_name: agent.map(|a| a.display_name().to_string()),
        vehicle_id: vehicle.vehicle_id.clone(),
        report: agent
            .map(|a| render_report(a, vehicle))
            .unwrap_or_else(|| REPORT_NOT_AVAILABLE.to_string()),
    }
}

/// What report follow-up handlers can read.
pub struct ReportContext {
    pub agent_name: String,
    pub vehicle_model: String,
    pub report: String,
}

impl ReportContext {
    pub fn new(report: &AgentReport, vehicle: &Vehicle) -> Self {
        Self {
            agent_name: report.agent_name.clone().unwrap_or_else(|| report.agent_id.clone()),
            vehicle_model: vehicle.model.clone(),
            report: report.report.clone(),
        }
    }
}

pub fn question_rules() -> RuleTable<ReportContext> {
    RuleTable::<ReportContext>::new(|ctx, _| {
        Reply::say(format!(
            "Based on the {}, the main concern is brake pad wear.",
            ctx.agent_name
        ))
    })
    .rule(CommandRule::keywords("summary", &["summary"], |ctx: &ReportContext, _: &str| {
        let head: Vec<&str> = ctx.report.lines().take(3).collect();
        Reply::say(format!("Summary for {}: {}", ctx.vehicle_model, head.join(". ")))
    }))
    .rule(CommandRule::keywords("problem", &["problem"], |_, _| {
        Reply::say("Main issues: Critical brake wear at 78%, low battery voltage.")
    }))
    .rule(CommandRule::keywords("cost", &["cost"], |_, _| {
        Reply::say("Estimated cost: ₹10,000 to 17,000 rupees.")
    }))
    .rule(CommandRule::keywords("urgent", &["urgent"], |_, _| {
        Reply::say("Yes, urgent. Brake pads could fail within 7-10 days.")
    }))
}

pub fn answer_question(ctx: &ReportContext, question: &str) -> CommandOutcome {
    question_rules().interpret(ctx, question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::find_vehicle;

    #[test]
    fn known_agents_render_vehicle_specific_reports() {
        let vehicle = find_vehicle("VEH002").unwrap();
        for agent in AgentKind::ALL {
            let report = report_for(agent.id(), &vehicle);
            assert_ne!(report.report, REPORT_NOT_AVAILABLE);
            assert!(report.report.contains(&vehicle.model), "{:?}", agent);
            assert_eq!(report.agent_name.as_deref(), Some(agent.display_name()));
        }
    }

    #[test]
    fn unknown_agent_has_no_report() {
        let vehicle = find_vehicle("VEH001").unwrap();
        let report = report_for("weather", &vehicle);
        assert_eq!(report.report, REPORT_NOT_AVAILABLE);
        assert!(report.agent_name.is_none());
    }

    #[test]
    fn follow_up_questions_route_by_keyword() {
        let vehicle = find_vehicle("VEH001").unwrap();
        let report = report_for("diagnosis", &vehicle);
        let ctx = ReportContext::new(&report, &vehicle);

        let summary = answer_question(&ctx, "Give me a SUMMARY");
        assert_eq!(summary.rule, "summary");
        assert!(summary.response.starts_with("Summary for 2020 Maruti Swift: DIAGNOSTIC REPORT"));

        assert_eq!(answer_question(&ctx, "what will it cost").rule, "cost");
        assert_eq!(answer_question(&ctx, "is this urgent?").rule, "urgent");

        let other = answer_question(&ctx, "tell me more");
        assert_eq!(other.rule, "fallback");
        assert_eq!(other.response, "Based on the Diagnosis Agent, the main concern is brake pad wear.");
    }
}
