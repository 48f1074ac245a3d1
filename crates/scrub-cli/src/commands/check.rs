use anyhow::Result;
use scrub_engine::Engine;

pub fn handle(payload: &str) -> Result<()> {
    let verdict = Engine::new().scan_payload(payload);
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}
