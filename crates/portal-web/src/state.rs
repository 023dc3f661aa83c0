use std::sync::Arc;

use portal_access::AccessPolicy;
use portal_auth::{AuthState, PrincipalStore};

pub struct AppState {
    pub policy: Arc<AccessPolicy>,
    pub store: Arc<dyn PrincipalStore>,
    pub jwt_secret: String,
    pub guarded_prefixes: Vec<String>,
}

impl AppState {
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt_secret: self.jwt_secret.clone(),
            store: self.store.clone(),
        }
    }

    /// Whether the page guard enforces `path`. Prefixes match on a `/`
    /// boundary so `/users` is not caught by `/user`.
    pub fn is_guarded(&self, path: &str) -> bool {
        self.guarded_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            match path.strip_prefix(prefix) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }
}
