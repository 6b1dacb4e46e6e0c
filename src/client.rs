//! Async client for the maintenance backend.
//!
//! Agent endpoints return free-form JSON, so they come back as
//! `serde_json::Value`; the vehicle catalog is typed.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{AppConfig, DEFAULT_BACKEND_URL};
use crate::models::vehicle::{Vehicle, VehicleListResponse, VehicleResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fleetwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        Self::new(config.backend_url.clone(), config.backend_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> ClientResult<Value> {
        self.get("/api/health").await
    }

    pub async fn vehicles(&self) -> ClientResult<Vec<Vehicle>> {
        let list: VehicleListResponse = self.get("/api/vehicles").await?;
        Ok(list.vehicles)
    }

    pub async fn vehicle(&self, vehicle_id: &str) -> ClientResult<Vehicle> {
        let found: VehicleResponse = self.get(&format!("/api/vehicles/{vehicle_id}")).await?;
        Ok(found.vehicle)
    }

    pub async fn analyze(&self, vehicle_id: &str) -> ClientResult<Value> {
        self.post("/api/analyze", &json!({ "vehicle_id": vehicle_id })).await
    }

    pub async fn diagnose(&self, vehicle_id: &str, analysis: &Value) -> ClientResult<Value> {
        self.post(
            "/api/diagnose",
            &json!({ "vehicle_id": vehicle_id, "analysis": analysis }),
        )
        .await
    }

    pub async fn call_script(&self, customer_name: &str, diagnosis: &Value) -> ClientResult<Value> {
        self.post(
            "/api/call-script",
            &json!({ "customer_name": customer_name, "diagnosis": diagnosis }),
        )
        .await
    }

    pub async fn schedule(&self, name: &str, phone: &str, preferred_time: &str) -> ClientResult<Value> {
        self.post(
            "/api/schedule",
            &json!({ "name": name, "phone": phone, "preferred_time": preferred_time }),
        )
        .await
    }

    pub async fn feedback_survey(&self) -> ClientResult<Value> {
        self.get("/api/feedback").await
    }

    /// Analysis, diagnosis and call script in one backend round trip.
    pub async fn complete_workflow(&self, vehicle_id: &str) -> ClientResult<Value> {
        self.post(&format!("/api/complete-workflow/{vehicle_id}"), &json!({}))
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ClientResult<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "backend request failed");
            return Err(ClientError::Status { status, body });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}
