use anyhow::Result;
use std::path::Path;

use portal_access::PortalConfig;

pub fn run(base_dir: &Path) -> Result<()> {
    let config_path = PortalConfig::default_path(base_dir);
    let config = PortalConfig::load(&config_path)?;

    println!("Config: {}", config_path.display());
    println!();
    println!("  Match mode:     {:?}", config.access.match_mode);
    println!("  Listen:         {}", config.web.listen_addr);
    println!("  Principals DB:  {}", config.web.db_path);
    println!("  Guarded:        {}", config.web.guarded_prefixes.join(", "));
    println!();

    if config.access.pages.is_empty() {
        println!("  Pages:          built-in catalog");
    } else {
        println!("  Pages ({}):", config.access.pages.len());
        for p in &config.access.pages {
            println!("    - {} ({}, {})", p.path, p.label, p.category);
        }
    }

    let defaults = &config.access.defaults;
    for (role, paths) in [
        ("admin", &defaults.admin),
        ("user", &defaults.user),
        ("guest", &defaults.guest),
    ] {
        if let Some(paths) = paths {
            println!("  Default {role}: {}", paths.join(", "));
        }
    }

    Ok(())
}
