pub mod error;
pub mod jwt;
pub mod middleware;
pub mod store;
pub mod types;

pub use error::AuthError;
pub use jwt::{PortalClaims, create_jwt, verify_jwt};
pub use middleware::{AuthState, Principal, require_page, resolve_principal};
pub use store::{PrincipalStore, SqlitePrincipalStore};
pub use types::*;
