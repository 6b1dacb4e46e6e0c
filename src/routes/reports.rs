use axum::extract::Path;
use axum::Json;

use crate::errors::{AppError, AppResult};
use crate::models::report::{AgentReport, ReportAnswer, ReportQuestion};
use crate::models::vehicle::{find_vehicle, Vehicle};
use crate::reports::{answer_question, report_for, ReportContext};

fn vehicle_or_404(vehicle_id: &str) -> AppResult<Vehicle> {
    find_vehicle(vehicle_id).ok_or_else(|| AppError::not_found(format!("vehicle {vehicle_id}")))
}

#[utoipa::path(
    get,
    path = "/api/agents/{agent_id}/report/{vehicle_id}",
    tag = "Agents",
    params(
        ("agent_id" = String, Path, description = "Agent id, e.g. diagnosis"),
        ("vehicle_id" = String, Path, description = "Vehicle id, e.g. VEH001")
    ),
    responses(
        (status = 200, description = "Agent report for the vehicle", body = AgentReport),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn get_report(Path((agent_id, vehicle_id)): Path<(String, String)>) -> AppResult<Json<AgentReport>> {
    let vehicle = vehicle_or_404(&vehicle_id)?;
    Ok(Json(report_for(&agent_id, &vehicle)))
}

#[utoipa::path(
    post,
    path = "/api/agents/{agent_id}/report/{vehicle_id}/ask",
    tag = "Agents",
    params(
        ("agent_id" = String, Path, description = "Agent id"),
        ("vehicle_id" = String, Path, description = "Vehicle id")
    ),
    request_body = ReportQuestion,
    responses(
        (status = 200, description = "Answer to a follow-up question", body = ReportAnswer),
        (status = 400, description = "Empty question"),
        (status = 404, description = "Unknown vehicle")
    )
)]
pub async fn ask_report(
    Path((agent_id, vehicle_id)): Path<(String, String)>,
    Json(payload): Json<ReportQuestion>,
) -> AppResult<Json<ReportAnswer>> {
    let question = payload.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request("question must not be empty"));
    }
    let vehicle = vehicle_or_404(&vehicle_id)?;
    let report = report_for(&agent_id, &vehicle);
    let outcome = answer_question(&ReportContext::new(&report, &vehicle), question);

    Ok(Json(ReportAnswer {
        question: question.to_string(),
        answer: outcome.response,
    }))
}
