use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityLogEntry;
use crate::models::alert::{Alert, Severity};
use crate::simulation::SimulationSnapshot;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertQuery {
    /// `critical`, `medium` or `low`; omitted or `all` returns every alert.
    pub severity: Option<String>,
}

impl AlertQuery {
    fn severity(&self) -> AppResult<Option<Severity>> {
        match self.severity.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(None),
            Some(raw) => Severity::parse(raw)
                .map(Some)
                .ok_or_else(|| AppError::bad_request(format!("unknown severity `{raw}`"))),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/simulation",
    tag = "Alerts",
    responses((status = 200, description = "Current simulation state", body = SimulationSnapshot))
)]
pub async fn get_simulation(State(state): State<AppState>) -> Json<SimulationSnapshot> {
    Json(state.session.lock().await.snapshot())
}

#[utoipa::path(
    get,
    path = "/api/alerts",
    tag = "Alerts",
    params(AlertQuery),
    responses(
        (status = 200, description = "Alert feed, newest first", body = [Alert]),
        (status = 400, description = "Unknown severity")
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> AppResult<Json<Vec<Alert>>> {
    let severity = query.severity()?;
    Ok(Json(state.session.lock().await.alerts_with_severity(severity)))
}

#[utoipa::path(
    delete,
    path = "/api/alerts/{id}",
    tag = "Alerts",
    params(("id" = Uuid, Path, description = "Alert id")),
    responses((status = 204, description = "Alert dismissed (or already gone)"))
)]
pub async fn dismiss_alert(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if !state.session.lock().await.dismiss(id) {
        tracing::debug!(alert_id = %id, "dismiss ignored for unknown alert");
    }
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/api/alerts/{id}/escalate",
    tag = "Alerts",
    params(("id" = Uuid, Path, description = "Alert id")),
    responses(
        (status = 200, description = "Alert escalated to critical", body = Alert),
        (status = 404, description = "Unknown alert")
    )
)]
pub async fn escalate_alert(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<Json<Alert>> {
    state
        .session
        .lock()
        .await
        .escalate(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("alert {id}")))
}

#[utoipa::path(
    get,
    path = "/api/activity",
    tag = "Alerts",
    responses((status = 200, description = "Activity log, newest first", body = [ActivityLogEntry]))
)]
pub async fn list_activity(State(state): State<AppState>) -> Json<Vec<ActivityLogEntry>> {
    Json(state.session.lock().await.activity())
}
