use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::voice::{VoiceCommandRequest, VoiceCommandResponse};

#[utoipa::path(
    post,
    path = "/api/voice/command",
    tag = "Voice",
    request_body = VoiceCommandRequest,
    responses(
        (status = 200, description = "Interpreted command", body = VoiceCommandResponse),
        (status = 400, description = "Empty command")
    )
)]
pub async fn voice_command(
    State(state): State<AppState>,
    Json(payload): Json<VoiceCommandRequest>,
) -> AppResult<Json<VoiceCommandResponse>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("text must not be empty"));
    }

    let mut assistant = state.voice.lock().await;
    let outcome = assistant.handle_command(text);
    assistant.finished_speaking();

    Ok(Json(VoiceCommandResponse {
        rule: outcome.rule.to_string(),
        response: outcome.response,
        view: outcome.view,
        active_view: assistant.active_view(),
    }))
}
