use anyhow::Result;

use portal_access::PortalConfig;

pub async fn run(config: PortalConfig, listen: Option<String>) -> Result<()> {
    let policy = crate::load_policy(&config)?;
    let mut web = config.web;
    if let Some(addr) = listen {
        web.listen_addr = addr;
    }
    portal_web::start_web_server(web, policy).await
}
