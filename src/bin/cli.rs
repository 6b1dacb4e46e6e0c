use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use fleetwatch::client::ApiClient;
use fleetwatch::config::{AppConfig, SimulationConfig};
use fleetwatch::models::vehicle::{find_vehicle, fleet};
use fleetwatch::reports::{answer_question, report_for, ReportContext};
use fleetwatch::simulation::random::source_for;
use fleetwatch::simulation::{SimulationSession, SimulationSnapshot};
use fleetwatch::utils::format_relative;
use fleetwatch::voice::VoiceAssistant;

#[derive(Parser, Debug)]
#[command(author, version, about = "fleetwatch console tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the alert simulation offline on a manual clock and print the outcome
    Simulate {
        /// Simulated seconds to run
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Clock step in milliseconds
        #[arg(long, default_value_t = 1000)]
        step_ms: u64,
        /// Write the final snapshot as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interpret a voice command as typed text
    Voice { text: Vec<String> },
    /// Print an agent report for a vehicle, optionally answering a follow-up question
    Report {
        agent: String,
        vehicle: String,
        #[arg(long)]
        ask: Option<String>,
    },
    /// List the demo fleet
    Vehicles,
    /// Query the maintenance backend health endpoint
    Health {
        /// Overrides BACKEND_URL
        #[arg(long)]
        backend_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Try to load env from CWD, then fall back to the crate-local `.env`.
    if dotenv().is_err() {
        let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(crate_env);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seconds,
            seed,
            step_ms,
            out,
        } => {
            let snapshot = simulate(seconds, seed, step_ms)?;
            print_snapshot(&snapshot);
            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&snapshot)?;
                fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
                println!("wrote {}", path.display());
            }
        }
        Commands::Voice { text } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("nothing to interpret");
            }
            let mut assistant = VoiceAssistant::new(None);
            let outcome = assistant.handle_command(&text);
            println!("rule: {}", outcome.rule);
            println!("view: {}", assistant.active_view().as_str());
            println!("{}", outcome.response);
        }
        Commands::Report { agent, vehicle, ask } => {
            let vehicle = find_vehicle(&vehicle).with_context(|| format!("unknown vehicle {vehicle}"))?;
            let report = report_for(&agent, &vehicle);
            println!("{}", report.report);
            if let Some(question) = ask {
                let outcome = answer_question(&ReportContext::new(&report, &vehicle), &question);
                println!();
                println!("Q: {question}");
                println!("A: {}", outcome.response);
            }
        }
        Commands::Vehicles => {
            for v in fleet() {
                println!("{:<8} {:<20} {:<4} {}", v.vehicle_id, v.model, v.powertrain.as_str(), v.owner);
            }
        }
        Commands::Health { backend_url } => {
            let config = AppConfig::from_env()?;
            let url = backend_url.unwrap_or(config.backend_url);
            let client = ApiClient::new(url, config.backend_timeout)?;
            let health = client
                .health()
                .await
                .with_context(|| format!("backend at {} is unreachable", client.base_url()))?;
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
    }

    Ok(())
}

fn simulate(seconds: u64, seed: Option<u64>, step_ms: u64) -> anyhow::Result<SimulationSnapshot> {
    if step_ms == 0 {
        anyhow::bail!("--step-ms must be greater than zero");
    }
    let mut session = SimulationSession::new(SimulationConfig::default(), source_for(seed))?;
    session.start();

    let total = Duration::from_secs(seconds);
    let step = Duration::from_millis(step_ms);
    while session.elapsed() < total {
        let remaining = total - session.elapsed();
        session.advance(step.min(remaining));
    }

    let snapshot = session.snapshot();
    session.stop();
    Ok(snapshot)
}

fn print_snapshot(snapshot: &SimulationSnapshot) {
    let c = &snapshot.counters;
    let s = &snapshot.statistics;
    println!(
        "after {}s: {} alerts ({} critical total), {} calls in progress, {} scheduled",
        snapshot.elapsed_ms / 1000,
        snapshot.alerts.len(),
        s.critical_alerts,
        s.calls_in_progress,
        s.vehicles_scheduled
    );
    println!(
        "counters: monitored={} active={} calls={} predictions={}",
        c.vehicles_monitored, c.active_alerts, c.calls_in_progress, c.todays_predictions
    );
    println!(
        "security: {} ({})",
        snapshot.security_status.title(),
        snapshot.security_status.message()
    );
    for alert in &snapshot.alerts {
        println!(
            "  [{:<8}] {:<6} {:<22} {:<34} {}",
            alert.severity.as_str(),
            alert.vehicle_id,
            alert.vehicle_model,
            alert.issue,
            alert.status.as_str()
        );
    }
    println!("activity:");
    for entry in &snapshot.activity {
        println!(
            "  {:>9} {:<12} {}",
            format_relative(entry.timestamp, snapshot.now),
            entry.kind.as_str(),
            entry.action
        );
    }
}
