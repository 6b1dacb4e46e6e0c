use std::time::Duration;

use crate::errors::AppError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Upper bound for windows that get added to wall-clock timestamps.
pub const MAX_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Every constant the alert simulation runs on.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub max_alerts: usize,
    pub max_log_entries: usize,
    pub bootstrap_alerts: u32,
    pub bootstrap_stagger: Duration,
    pub generation_min: Duration,
    pub generation_max: Duration,
    pub progression_interval: Duration,
    pub transition_probability: f64,
    pub eviction_interval: Duration,
    pub resolved_retention: Duration,
    pub counter_interval: Duration,
    pub vehicles_monitored_ceiling: u32,
    pub predictions_ceiling: u32,
    pub insight_interval: Duration,
    pub insight_probability: f64,
    pub security_interval: Duration,
    pub security_probability: f64,
    pub toast_duration: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_alerts: 10,
            max_log_entries: 20,
            bootstrap_alerts: 5,
            bootstrap_stagger: Duration::from_secs(2),
            generation_min: Duration::from_secs(8),
            generation_max: Duration::from_secs(15),
            progression_interval: Duration::from_secs(5),
            transition_probability: 0.3,
            eviction_interval: Duration::from_secs(5),
            resolved_retention: Duration::from_secs(30),
            counter_interval: Duration::from_secs(3),
            vehicles_monitored_ceiling: 250,
            predictions_ceiling: 500,
            insight_interval: Duration::from_secs(15),
            insight_probability: 0.3,
            security_interval: Duration::from_secs(10),
            security_probability: 0.3,
            toast_duration: Duration::from_secs(5),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_alerts == 0 || self.max_log_entries == 0 {
            return Err(AppError::configuration("alert and activity caps must be positive"));
        }
        if self.generation_min > self.generation_max {
            return Err(AppError::configuration("generation_min must not exceed generation_max"));
        }
        for (name, p) in [
            ("transition_probability", self.transition_probability),
            ("insight_probability", self.insight_probability),
            ("security_probability", self.security_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AppError::configuration(format!("{name} must be within 0..=1")));
            }
        }
        let periods = [
            self.progression_interval,
            self.eviction_interval,
            self.counter_interval,
            self.insight_interval,
            self.security_interval,
        ];
        if periods.iter().any(Duration::is_zero) || self.generation_min.is_zero() {
            return Err(AppError::configuration("timer periods must be non-zero"));
        }
        for (name, window) in [
            ("toast_duration", self.toast_duration),
            ("resolved_retention", self.resolved_retention),
        ] {
            if window > MAX_WINDOW {
                return Err(AppError::configuration(format!("{name} must not exceed 24h")));
            }
        }
        Ok(())
    }
}

/// Process configuration read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub seed: Option<u64>,
    pub tick: Duration,
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed: None,
            tick: Duration::from_millis(250),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            backend_timeout: Duration::from_secs(10),
            simulation: SimulationConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let port = parse_var("APP_PORT")?.unwrap_or(defaults.port);
        let seed = parse_var::<u64>("SIM_SEED")?;
        let tick = parse_var::<u64>("SIM_TICK_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);
        if tick.is_zero() {
            return Err(AppError::configuration("SIM_TICK_MS must be greater than zero"));
        }
        let backend_url = std::env::var("BACKEND_URL").unwrap_or(defaults.backend_url);
        let backend_timeout = parse_var::<u64>("BACKEND_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.backend_timeout);

        let config = Self {
            port,
            seed,
            tick,
            backend_url,
            backend_timeout,
            simulation: defaults.simulation,
        };
        config.simulation.validate()?;
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match std::env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::configuration(format!("{name} must be a valid number"))),
        Err(_) => Ok(None),
    }
}
