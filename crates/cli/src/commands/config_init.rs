//! `hemolink config-init` — Write a starter config file.

use std::path::Path;

use hemolink_config::AppConfig;

pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() {
        println!("Config file already exists: {}", config_path.display());
        return Ok(());
    }

    std::fs::write(config_path, AppConfig::default_toml())?;
    println!("✅ Wrote starter config: {}", config_path.display());
    println!("   Set api_key (or export GROQ_API_KEY) before serving.");

    Ok(())
}
