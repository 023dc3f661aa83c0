use anyhow::{Context, Result};
use std::path::Path;

use portal_access::{PortalConfig, Role};

pub fn run(config: &PortalConfig, config_path: &Path) -> Result<()> {
    let policy = crate::load_policy(config)
        .with_context(|| format!("invalid access config in {}", config_path.display()))?;

    println!("Access config OK ({:?} matching).", policy.match_mode());
    println!("  Pages: {}", policy.catalog().len());
    for role in Role::ALL {
        let visible = policy.accessible_pages(role, &[]).len();
        println!("  {:<11} {visible} page(s)", role.as_str());
    }
    Ok(())
}
