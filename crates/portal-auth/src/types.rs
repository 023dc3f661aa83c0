use portal_access::Role;
use serde::{Deserialize, Serialize};

/// Stored role and explicit permissions for one external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalRecord {
    pub subject: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct UpsertPrincipalRequest {
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}
