pub mod access;
pub mod health;
pub mod pages;
pub mod principals;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::{Extension, Router, middleware};
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/api/access/me", get(access::me))
        .route("/api/access/pages", get(access::pages))
        .route("/api/access/check", get(access::check))
        .route("/api/principals", get(principals::list_principals))
        .route(
            "/api/principals/{subject}",
            put(principals::upsert_principal).delete(principals::delete_principal),
        )
        // Guarded page paths land here once the guard has let them through.
        .fallback(pages::show_page)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            guard::page_guard,
        ))
        .layer(Extension(state.auth_state()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
