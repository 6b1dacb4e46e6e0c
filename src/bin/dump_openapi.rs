use std::fs;

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/fleetwatch-openapi.json".to_string());
    let doc = fleetwatch::docs::build_openapi(fleetwatch::config::DEFAULT_PORT)?;
    let s = serde_json::to_string_pretty(&doc)?;
    fs::write(&path, s)?;
    println!("wrote {}", path);
    Ok(())
}
