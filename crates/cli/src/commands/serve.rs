//! `hemolink serve` — Start the HTTP chatbot server.

use std::path::Path;

use hemolink_config::AppConfig;

pub async fn run(
    config_path: &Path,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config =
        AppConfig::load(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(host) = host_override {
        config.gateway.host = host;
    }
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🩸 Hemolink Chatbot Service");
    println!(
        "   Listening: {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!("   Model: {}", config.model);
    if !config.has_api_key() {
        println!("   Warning: no API key configured (set GROQ_API_KEY)");
    }

    hemolink_gateway::start(config).await?;

    Ok(())
}
