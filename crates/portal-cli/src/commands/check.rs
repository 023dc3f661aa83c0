use anyhow::{Result, bail};

use portal_access::{PortalConfig, Role};

pub fn run(config: &PortalConfig, role: &str, permissions: &[String], path: &str) -> Result<()> {
    let policy = crate::load_policy(config)?;
    let role = Role::from_claim(Some(role));
    let allowed = policy.has_permission(role, permissions, path);

    println!("{}  {role} -> {path}", if allowed { "ALLOW" } else { "DENY " });
    if !allowed {
        bail!("{role} may not open {path}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_check_returns_error() {
        let config = PortalConfig::default();
        assert!(run(&config, "guest", &[], "/admin/dashboard").is_err());
        assert!(run(&config, "admin", &[], "/admin/settings").is_err());
    }

    #[test]
    fn allowed_check_returns_ok() {
        let config = PortalConfig::default();
        assert!(run(&config, "admin", &[], "/admin/dashboard").is_ok());
        assert!(run(&config, "user", &["/admin/reports".to_string()], "/admin/reports").is_ok());
    }
}
