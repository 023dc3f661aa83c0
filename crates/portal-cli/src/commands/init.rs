use anyhow::{Result, bail};
use std::path::Path;

use portal_access::PortalConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = PortalConfig::default_path(base_dir);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    let config = PortalConfig::default_config(base_dir);
    config.save(&config_path)?;
    tracing::info!(path = %config_path.display(), "config written");

    println!("Portal initialized.");
    println!("  Config:     {}", config_path.display());
    println!("  Principals: {}", config.web.db_path);
    println!();
    println!("  Change web.jwt_secret before running `portal serve`.");
    Ok(())
}
