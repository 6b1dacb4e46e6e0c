use fleetwatch::app::{create_app, AppState};
use fleetwatch::config::AppConfig;
use fleetwatch::docs;
use fleetwatch::events::{init_event_bus, start_event_listener};
use fleetwatch::simulation::SimulationDriver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env();
    init_tracing();

    let config = AppConfig::from_env()?;
    let port = config.port;
    let tick = config.tick;
    if let Some(seed) = config.seed {
        tracing::info!(seed, "running with a fixed simulation seed");
    }

    let (bus, rx) = init_event_bus();
    let listener_task = tokio::spawn(start_event_listener(rx));

    let state = AppState::from_config(config, Some(bus))?;
    let driver = SimulationDriver::start(state.session.clone(), tick).await;

    let openapi = docs::build_openapi(port)?;
    let app = create_app(state).merge(docs::swagger_routes(openapi)?);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    driver.shutdown().await;
    listener_task.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    let _ = dotenvy::from_path(crate_env);
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
