pub mod sqlite;

pub use sqlite::SqlitePrincipalStore;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::types::PrincipalRecord;
use portal_access::Role;

/// Fallback source of a principal's role and explicit permissions, used
/// when bearer claims do not carry them.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn get(&self, subject: &str) -> Result<Option<PrincipalRecord>, AuthError>;
    async fn upsert(
        &self,
        subject: &str,
        role: Role,
        permissions: &[String],
    ) -> Result<PrincipalRecord, AuthError>;
    async fn delete(&self, subject: &str) -> Result<(), AuthError>;
    async fn list(&self) -> Result<Vec<PrincipalRecord>, AuthError>;

    // Lifecycle
    async fn migrate(&self) -> Result<(), AuthError>;
}
