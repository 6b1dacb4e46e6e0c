use std::process::Command;

use anyhow::Result;
use serde_json::Value;
use tempfile::tempdir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fleetwatch-cli"))
}

#[test]
fn simulate_writes_a_snapshot() -> Result<()> {
    let dir = tempdir()?;
    let out = dir.path().join("snapshot.json");

    let output = cli()
        .args(["simulate", "--seconds", "90", "--seed", "42", "--out"])
        .arg(&out)
        .output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let snapshot: Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(snapshot["elapsed_ms"], 90_000);
    assert_eq!(snapshot["running"], true);
    let alerts = snapshot["alerts"].as_array().unwrap();
    assert!(!alerts.is_empty() && alerts.len() <= 10);
    assert!(snapshot["activity"].as_array().unwrap().len() <= 20);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("after 90s:"));
    Ok(())
}

#[test]
fn seeded_runs_are_reproducible() -> Result<()> {
    let dir = tempdir()?;
    let run = |name: &str| -> Result<Value> {
        let out = dir.path().join(name);
        let status = cli()
            .args(["simulate", "--seconds", "45", "--seed", "9", "--step-ms", "250", "--out"])
            .arg(&out)
            .status()?;
        assert!(status.success());
        Ok(serde_json::from_str(&std::fs::read_to_string(&out)?)?)
    };

    let strip = |v: &Value| -> Vec<(Value, Value, Value)> {
        v["alerts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| (a["vehicle_id"].clone(), a["issue"].clone(), a["status"].clone()))
            .collect()
    };
    assert_eq!(strip(&run("a.json")?), strip(&run("b.json")?));
    Ok(())
}

#[test]
fn voice_command_from_the_terminal() -> Result<()> {
    let output = cli().args(["voice", "schedule", "appointment"]).output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rule: scheduling"));
    assert!(stdout.contains("view: scheduling"));
    Ok(())
}

#[test]
fn report_with_follow_up_question() -> Result<()> {
    let output = cli()
        .args(["report", "data_analysis", "VEH003", "--ask", "what is the problem"])
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("DATA ANALYSIS REPORT"));
    assert!(stdout.contains("Vehicle: 2021 Hyundai Creta (VEH003)"));
    assert!(stdout.contains("A: Main issues: Critical brake wear at 78%, low battery voltage."));

    let output = cli().args(["report", "diagnosis", "VEH777"]).output()?;
    assert!(!output.status.success());
    Ok(())
}
