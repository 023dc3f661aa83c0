use std::collections::BTreeMap;

use portal_access::{PageCategory, PagePermission, Role};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub subject: String,
    pub role: Role,
    pub explicit_permissions: Vec<String>,
    pub effective_permissions: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum PagesResponse {
    Flat(Vec<PagePermission>),
    Grouped(BTreeMap<PageCategory, Vec<PagePermission>>),
}

#[derive(Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub grouped: bool,
}

#[derive(Deserialize)]
pub struct CheckQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub path: String,
    pub allowed: bool,
}
