use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use portal_access::group_pages_by_category;
use portal_auth::Principal;

use crate::models::{CheckQuery, CheckResponse, MeResponse, PagesQuery, PagesResponse};
use crate::state::AppState;

pub async fn me(principal: Principal, State(state): State<Arc<AppState>>) -> Json<MeResponse> {
    let effective = state
        .policy
        .effective_permissions(principal.role, &principal.permissions)
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(MeResponse {
        subject: principal.subject,
        role: principal.role,
        explicit_permissions: principal.permissions,
        effective_permissions: effective,
    })
}

/// Navigation menu for the caller.
pub async fn pages(
    principal: Principal,
    State(state): State<Arc<AppState>>,
    Query(query): Query<PagesQuery>,
) -> Json<PagesResponse> {
    let pages = state
        .policy
        .accessible_pages(principal.role, &principal.permissions);

    if query.grouped {
        let grouped = group_pages_by_category(pages)
            .into_iter()
            .map(|(category, pages)| (category, pages.into_iter().cloned().collect()))
            .collect();
        Json(PagesResponse::Grouped(grouped))
    } else {
        Json(PagesResponse::Flat(pages.into_iter().cloned().collect()))
    }
}

pub async fn check(
    principal: Principal,
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckQuery>,
) -> Json<CheckResponse> {
    let allowed = state
        .policy
        .has_permission(principal.role, &principal.permissions, &query.path);
    Json(CheckResponse {
        path: query.path,
        allowed,
    })
}
