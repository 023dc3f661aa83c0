use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use portal_auth::{AuthError, Principal, require_page};

use crate::state::AppState;

/// Enforce page permissions on guarded paths. Other paths pass through and
/// authenticate in their own handlers.
pub async fn page_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path().to_string();
    if !state.is_guarded(&path) {
        return Ok(next.run(request).await);
    }

    let (mut parts, body) = request.into_parts();
    let principal = Principal::from_request_parts(&mut parts, &()).await?;
    require_page(&state.policy, &principal, &path)?;

    let request = Request::from_parts(parts, body);
    Ok(next.run(request).await)
}
