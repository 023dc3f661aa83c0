use anyhow::Result;

use portal_access::{PortalConfig, Role};
use portal_auth::create_jwt;

pub fn run(
    config: &PortalConfig,
    subject: &str,
    role: Option<&str>,
    permissions: &[String],
    ttl: u64,
) -> Result<()> {
    // Reject typos here; at request time an unknown role silently becomes guest.
    let role = role.map(str::parse::<Role>).transpose()?;
    let permissions = (!permissions.is_empty()).then(|| permissions.to_vec());

    let token = create_jwt(
        subject,
        role.as_ref().map(Role::as_str),
        permissions,
        ttl,
        &config.web.jwt_secret,
    )?;
    println!("{token}");
    Ok(())
}
