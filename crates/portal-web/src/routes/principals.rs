use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use portal_access::Role;
use portal_auth::{AuthError, Principal, PrincipalRecord, UpsertPrincipalRequest, require_page};

use crate::state::AppState;

/// Managing principal records is gated on the permissions page itself.
const MANAGE_PAGE: &str = "/admin/permissions";

pub async fn list_principals(
    principal: Principal,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrincipalRecord>>, AuthError> {
    require_page(&state.policy, &principal, MANAGE_PAGE)?;

    Ok(Json(state.store.list().await?))
}

pub async fn upsert_principal(
    principal: Principal,
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
    Json(req): Json<UpsertPrincipalRequest>,
) -> Result<Json<PrincipalRecord>, AuthError> {
    require_page(&state.policy, &principal, MANAGE_PAGE)?;

    let role: Role = req.role.parse()?;
    let record = state.store.upsert(&subject, role, &req.permissions).await?;
    tracing::info!(by = %principal.subject, subject = %record.subject, "principal updated");
    Ok(Json(record))
}

pub async fn delete_principal(
    principal: Principal,
    State(state): State<Arc<AppState>>,
    Path(subject): Path<String>,
) -> Result<StatusCode, AuthError> {
    require_page(&state.policy, &principal, MANAGE_PAGE)?;

    state.store.delete(&subject).await?;
    tracing::info!(by = %principal.subject, subject = %subject, "principal removed");
    Ok(StatusCode::NO_CONTENT)
}
