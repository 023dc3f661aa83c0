use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portal_access::{AccessPolicy, Role};
use serde::Serialize;

use crate::error::AuthError;
use crate::jwt::{PortalClaims, verify_jwt};
use crate::store::PrincipalStore;

/// The authenticated caller, with role and explicit permissions resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub store: Arc<dyn PrincipalStore>,
}

/// Fill in whatever the claims leave out from the stored record.
///
/// A role present in the claims wins even if it is unrecognised (it then
/// resolves to guest). No role anywhere means guest.
pub async fn resolve_principal(
    claims: PortalClaims,
    store: &dyn PrincipalStore,
) -> Result<Principal, AuthError> {
    let record = if claims.role.is_none() || claims.permissions.is_none() {
        store.get(&claims.sub).await?
    } else {
        None
    };

    let role = match (&claims.role, &record) {
        (Some(name), _) => Role::from_claim(Some(name.as_str())),
        (None, Some(r)) => r.role,
        (None, None) => Role::Guest,
    };
    let permissions = match (claims.permissions, record) {
        (Some(p), _) => p,
        (None, Some(r)) => r.permissions,
        (None, None) => Vec::new(),
    };

    Ok(Principal {
        subject: claims.sub,
        role,
        permissions,
    })
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by the page guard.
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or(AuthError::Internal("auth not configured".into()))?
            .clone();

        let bearer = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::Unauthorized)?;

        let claims = verify_jwt(bearer, &auth_state.jwt_secret)?;
        let principal = resolve_principal(claims, auth_state.store.as_ref()).await?;
        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

pub fn require_page(
    policy: &AccessPolicy,
    principal: &Principal,
    path: &str,
) -> Result<(), AuthError> {
    if policy.has_permission(principal.role, &principal.permissions, path) {
        Ok(())
    } else {
        tracing::debug!(
            subject = %principal.subject,
            role = %principal.role,
            path,
            "access denied"
        );
        Err(AuthError::Forbidden(format!("no access to {path}")))
    }
}
