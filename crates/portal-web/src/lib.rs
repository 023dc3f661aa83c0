mod guard;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use portal_access::{AccessPolicy, WebSettings};
use portal_auth::{PrincipalStore, SqlitePrincipalStore};

pub use routes::build_router;
pub use state::AppState;

/// Start the access guard server. Opens its own principal store at
/// `settings.db_path`.
pub async fn start_web_server(settings: WebSettings, policy: AccessPolicy) -> anyhow::Result<()> {
    let store = SqlitePrincipalStore::open(&settings.db_path)?;
    store.migrate().await?;

    let state = Arc::new(AppState {
        policy: Arc::new(policy),
        store: Arc::new(store),
        jwt_secret: settings.jwt_secret.clone(),
        guarded_prefixes: settings.guarded_prefixes.clone(),
    });

    let app = routes::build_router(state);

    let addr: SocketAddr = settings.listen_addr.parse()?;
    tracing::info!("Starting portal access guard on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
