use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::simulation::session::SimulationSession;

pub type SharedSession = Arc<Mutex<SimulationSession>>;

/// Drives a shared session from the wall clock.
///
/// Dropping the driver aborts the ticking task; [`shutdown`](Self::shutdown)
/// additionally stops the session so its timers are cancelled.
pub struct SimulationDriver {
    session: SharedSession,
    handle: Option<JoinHandle<()>>,
}

impl SimulationDriver {
    pub async fn start(session: SharedSession, tick: Duration) -> Self {
        session.lock().await.start();

        let ticking = Arc::clone(&session);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                let dt = now.duration_since(last);
                last = now;
                ticking.lock().await.advance(dt);
            }
        });

        tracing::info!(tick_ms = tick.as_millis() as u64, "simulation driver started");
        Self {
            session,
            handle: Some(handle),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
        self.session.lock().await.stop();
        tracing::info!("simulation driver stopped");
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
