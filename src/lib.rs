pub mod app;
pub mod client;
pub mod config;
pub mod docs;
pub mod errors;
pub mod events;
pub mod models;
pub mod reports;
pub mod routes;
pub mod simulation;
pub mod utils;
pub mod voice;

// Re-export commonly used items for tests
pub use app::{create_app, AppState};
