use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Bearer token claims issued by the identity provider.
///
/// `role` and `permissions` are optional: when either is missing the
/// principal record store is consulted for `sub`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PortalClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_jwt(
    subject: &str,
    role: Option<&str>,
    permissions: Option<Vec<String>>,
    ttl_secs: u64,
    secret: &str,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = usize::try_from(ttl_secs)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .ok_or_else(|| AuthError::InvalidInput(format!("token lifetime too large: {ttl_secs}s")))?;
    let claims = PortalClaims {
        sub: subject.to_string(),
        role: role.map(str::to_string),
        permissions,
        exp,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode error: {e}")))
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<PortalClaims, AuthError> {
    let data = decode::<PortalClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::Unauthorized)?;
    Ok(data.claims)
}
