use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fleetwatch::client::{ApiClient, ClientError};
use fleetwatch::models::vehicle::{find_vehicle, fleet, VehicleListResponse, VehicleResponse};

/// Minimal stand-in for the maintenance backend.
async fn spawn_backend() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/api/health", get(|| async { Json(json!({ "status": "healthy", "agents": 6 })) }))
        .route(
            "/api/vehicles",
            get(|| async {
                let vehicles = fleet();
                Json(VehicleListResponse {
                    success: true,
                    count: vehicles.len(),
                    vehicles,
                })
            }),
        )
        .route(
            "/api/vehicles/:id",
            get(|Path(id): Path<String>| async move {
                match find_vehicle(&id) {
                    Some(vehicle) => Ok(Json(VehicleResponse { success: true, vehicle })),
                    None => Err((StatusCode::NOT_FOUND, "vehicle not found")),
                }
            }),
        )
        .route(
            "/api/analyze",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "vehicle_id": body["vehicle_id"], "health_score": 45 }))
            }),
        )
        .route(
            "/api/schedule",
            post(|Json(body): Json<Value>| async move { Json(json!({ "booked_for": body["preferred_time"] })) }),
        )
        .route(
            "/api/complete-workflow/:id",
            post(|Path(id): Path<String>| async move { Json(json!({ "vehicle_id": id, "steps": 3 })) }),
        )
        .route("/api/feedback", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "agent offline") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn client_for(addr: SocketAddr) -> Result<ApiClient> {
    Ok(ApiClient::new(format!("http://{addr}/"), Duration::from_secs(5))?)
}

#[tokio::test]
async fn typed_catalog_calls() -> Result<()> {
    let client = client_for(spawn_backend().await?)?;

    let health = client.health().await?;
    assert_eq!(health["status"], "healthy");

    let vehicles = client.vehicles().await?;
    assert_eq!(vehicles.len(), 3);
    assert_eq!(vehicles[2].vehicle_id, "VEH003");

    let vehicle = client.vehicle("VEH002").await?;
    assert_eq!(vehicle.owner, "Ms. Priya Patel");
    Ok(())
}

#[tokio::test]
async fn agent_calls_send_expected_payloads() -> Result<()> {
    let client = client_for(spawn_backend().await?)?;

    let analysis = client.analyze("VEH001").await?;
    assert_eq!(analysis["vehicle_id"], "VEH001");

    let booking = client.schedule("Rajesh Sharma", "+91-9876543210", "tomorrow 10 AM").await?;
    assert_eq!(booking["booked_for"], "tomorrow 10 AM");

    let workflow = client.complete_workflow("VEH003").await?;
    assert_eq!(workflow["vehicle_id"], "VEH003");
    Ok(())
}

#[tokio::test]
async fn non_success_status_is_a_typed_error() -> Result<()> {
    let client = client_for(spawn_backend().await?)?;

    match client.vehicle("VEH404").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "vehicle not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }

    match client.feedback_survey().await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status.as_u16(), 503),
        other => panic!("expected status error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() -> Result<()> {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}"), Duration::from_secs(2))?;
    assert!(matches!(client.health().await, Err(ClientError::Network(_))));
    Ok(())
}
