use anyhow::Result;
use tracing::info;

use wheelpick_core::AppConfig;

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init() -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    AppConfig::default().save()?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote default config to {}", path.display());
    Ok(())
}
