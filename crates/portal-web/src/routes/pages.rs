use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::Uri;
use portal_access::PagePermission;
use portal_auth::{AuthError, Principal, require_page};

use crate::state::AppState;

/// Catalog entry for a page the caller may open. Stands in for the rendered
/// page; paths outside the catalog are 404.
///
/// Checked here as well as in the guard: a catalog page need not sit under
/// a guarded prefix.
pub async fn show_page(
    principal: Principal,
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Json<PagePermission>, AuthError> {
    let path = uri.path();
    require_page(&state.policy, &principal, path)?;

    state
        .policy
        .page(path)
        .cloned()
        .map(Json)
        .ok_or_else(|| AuthError::NotFound(format!("no page at {path}")))
}
