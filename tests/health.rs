use std::time::Duration;

use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use fleetwatch::config::AppConfig;
use fleetwatch::simulation::SimulationDriver;
use fleetwatch::{create_app, AppState};

async fn health(app: &Router) -> Result<Value> {
    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .body(Body::empty())?;

    let resp: Response = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK, "health endpoint did not return 200");

    let body_bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    Ok(serde_json::from_slice(&body_bytes)?)
}

#[tokio::test]
async fn health_follows_the_driven_session() -> Result<()> {
    let state = AppState::from_config(AppConfig::default(), None)?;
    let app = create_app(state.clone());

    let v = health(&app).await?;
    assert_eq!(v["status"], "ok");
    assert_eq!(v["simulation_running"], false, "session must not run before the driver starts");

    let driver = SimulationDriver::start(state.session.clone(), Duration::from_millis(10)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(driver.is_active());

    let v = health(&app).await?;
    assert_eq!(v["simulation_running"], true);
    assert!(v["active_alerts"].as_u64().unwrap_or(0) >= 1, "startup alert missing: {}", v);

    driver.shutdown().await;
    let v = health(&app).await?;
    assert_eq!(v["simulation_running"], false);
    assert_eq!(state.session.lock().await.timers().armed_count(), 0);

    Ok(())
}
