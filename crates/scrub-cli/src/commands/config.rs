use anyhow::Result;
use scrub_config::Config;
use std::path::Path;

pub fn handle(explicit: Option<&Path>, config: &Config) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    println!("Config: {}", path.display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
