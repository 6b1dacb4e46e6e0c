use std::time::Duration;

use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

use fleetwatch::config::{AppConfig, SimulationConfig};
use fleetwatch::simulation::{ScriptedRandom, SimulationSession};
use fleetwatch::{create_app, AppState};

/// Router over a session holding five medium alerts, all analyzing.
fn test_app() -> Router {
    let config = SimulationConfig {
        bootstrap_stagger: Duration::ZERO,
        generation_min: Duration::from_secs(3600),
        generation_max: Duration::from_secs(3600),
        ..SimulationConfig::default()
    };
    let mut session = SimulationSession::new(config, Box::new(ScriptedRandom::constant(0.5))).unwrap();
    session.start();
    session.advance(Duration::ZERO);

    create_app(AppState::new(AppConfig::default(), session))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn first_alert_id(alerts: &Value) -> String {
    alerts[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_simulation_state() -> Result<()> {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/api/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["simulation_running"], true);
    assert_eq!(body["active_alerts"], 5);
    Ok(())
}

#[tokio::test]
async fn vehicle_catalog() -> Result<()> {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/vehicles", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    assert_eq!(body["vehicles"][1]["type"], "EV");

    let (status, body) = send(&app, "GET", "/api/vehicles/veh002", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vehicle"]["model"], "2022 Tata Nexon EV");

    let (status, body) = send(&app, "GET", "/api/vehicles/VEH999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn alert_feed_filters_by_severity() -> Result<()> {
    let app = test_app();

    let (status, all) = send(&app, "GET", "/api/alerts", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 5);
    assert_eq!(all[0]["status"], "analyzing");
    assert_eq!(all[0]["severity"], "medium");

    let (_, medium) = send(&app, "GET", "/api/alerts?severity=medium", None).await?;
    assert_eq!(medium.as_array().unwrap().len(), 5);

    let (_, critical) = send(&app, "GET", "/api/alerts?severity=critical", None).await?;
    assert!(critical.as_array().unwrap().is_empty());

    let (status, body) = send(&app, "GET", "/api/alerts?severity=urgent", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    Ok(())
}

#[tokio::test]
async fn escalate_then_filter_critical() -> Result<()> {
    let app = test_app();
    let (_, alerts) = send(&app, "GET", "/api/alerts", None).await?;
    let id = first_alert_id(&alerts);

    let (status, escalated) = send(&app, "POST", &format!("/api/alerts/{id}/escalate"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(escalated["severity"], "critical");
    assert_eq!(escalated["status"], "analyzing");

    let (_, critical) = send(&app, "GET", "/api/alerts?severity=critical", None).await?;
    assert_eq!(critical.as_array().unwrap().len(), 1);
    assert_eq!(critical[0]["id"], id.as_str());

    let (_, snapshot) = send(&app, "GET", "/api/simulation", None).await?;
    assert_eq!(snapshot["toast"]["alert"]["id"], id.as_str());

    let (status, _) = send(&app, "POST", &format!("/api/alerts/{}/escalate", Uuid::new_v4()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn dismiss_is_idempotent() -> Result<()> {
    let app = test_app();
    let (_, alerts) = send(&app, "GET", "/api/alerts", None).await?;
    let id = first_alert_id(&alerts);

    let (status, _) = send(&app, "DELETE", &format!("/api/alerts/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/api/alerts/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, alerts) = send(&app, "GET", "/api/alerts", None).await?;
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 4);
    assert!(alerts.iter().all(|a| a["id"] != id.as_str()));
    Ok(())
}

#[tokio::test]
async fn snapshot_and_activity() -> Result<()> {
    let app = test_app();

    let (status, snapshot) = send(&app, "GET", "/api/simulation", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["running"], true);
    assert_eq!(snapshot["alerts"].as_array().unwrap().len(), 5);
    assert_eq!(snapshot["counters"]["vehicles_monitored"], 187);
    assert_eq!(snapshot["statistics"]["total_alerts"], 5);
    assert_eq!(snapshot["security_status"], "normal");
    assert!(snapshot["toast"].is_null());

    let (status, activity) = send(&app, "GET", "/api/activity", None).await?;
    assert_eq!(status, StatusCode::OK);
    let activity = activity.as_array().unwrap();
    assert_eq!(activity.len(), 5);
    assert_eq!(activity[0]["kind"], "data");
    assert!(activity[0]["action"].as_str().unwrap().starts_with("Scanning "));
    Ok(())
}

#[tokio::test]
async fn voice_command_navigates() -> Result<()> {
    let app = test_app();

    let command = json!({ "text": "schedule appointment" });
    let (status, body) = send(&app, "POST", "/api/voice/command", Some(command)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], "scheduling");
    assert_eq!(body["view"], "scheduling");
    assert_eq!(body["active_view"], "scheduling");
    assert!(body["response"].as_str().unwrap().to_lowercase().contains("scheduling"));

    // a reply without navigation keeps the view from the previous command
    let (_, body) = send(&app, "POST", "/api/voice/command", Some(json!({ "text": "help" }))).await?;
    assert!(body["view"].is_null());
    assert_eq!(body["active_view"], "scheduling");

    let (status, _) = send(&app, "POST", "/api/voice/command", Some(json!({ "text": "   " }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn agent_reports() -> Result<()> {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/agents/diagnosis/report/VEH001", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["agent_name"], "Diagnosis Agent");
    assert!(body["report"].as_str().unwrap().starts_with("DIAGNOSTIC REPORT\nVehicle: 2020 Maruti Swift"));

    let (status, body) = send(&app, "GET", "/api/agents/weather/report/VEH001", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"], "Report not available");

    let (status, _) = send(&app, "GET", "/api/agents/diagnosis/report/VEH404", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/agents/diagnosis/report/VEH002/ask",
        Some(json!({ "question": "Is it urgent?" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Yes, urgent. Brake pads could fail within 7-10 days.");
    Ok(())
}
