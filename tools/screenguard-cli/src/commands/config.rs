//! Show or initialize configuration.

use screenguard_common::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, init: bool) -> anyhow::Result<()> {
    if init {
        let path = config_file_path();
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        let path = AppConfig::default()
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
