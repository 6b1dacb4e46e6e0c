use std::sync::Arc;

use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::events::EventBus;
use crate::routes::{alerts, health, reports, vehicles, voice};
use crate::simulation::random::source_for;
use crate::simulation::{SharedSession, SimulationSession};
use crate::voice::assistant::TracingSynthesizer;
use crate::voice::VoiceAssistant;

#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub voice: Arc<Mutex<VoiceAssistant>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, session: SimulationSession) -> Self {
        let voice = VoiceAssistant::new(Some(Box::new(TracingSynthesizer))).without_recognition();
        Self {
            session: Arc::new(Mutex::new(session)),
            voice: Arc::new(Mutex::new(voice)),
            config: Arc::new(config),
        }
    }

    /// Builds a fresh session from `config`, publishing onto `bus` when given.
    pub fn from_config(config: AppConfig, bus: Option<EventBus>) -> Result<Self, AppError> {
        let mut session = SimulationSession::new(config.simulation.clone(), source_for(config.seed))?;
        if let Some(bus) = bus {
            session = session.with_event_bus(bus);
        }
        Ok(Self::new(config, session))
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles))
        .route("/:id", get(vehicles::get_vehicle));

    let alert_routes = Router::new()
        .route("/", get(alerts::list_alerts))
        .route("/:id", delete(alerts::dismiss_alert))
        .route("/:id/escalate", post(alerts::escalate_alert));

    let agent_routes = Router::new()
        .route("/:agent_id/report/:vehicle_id", get(reports::get_report))
        .route("/:agent_id/report/:vehicle_id/ask", post(reports::ask_report));

    let api = Router::new()
        .route("/health", get(health::health))
        .route("/simulation", get(alerts::get_simulation))
        .route("/activity", get(alerts::list_activity))
        .route("/voice/command", post(voice::voice_command))
        .nest("/vehicles", vehicle_routes)
        .nest("/alerts", alert_routes)
        .nest("/agents", agent_routes);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
