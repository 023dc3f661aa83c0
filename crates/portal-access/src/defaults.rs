use std::collections::BTreeMap;

use crate::catalog::PageCatalog;
use crate::role::Role;

const ADMIN_PAGES: &[&str] = &[
    "/admin/dashboard",
    "/admin/complaints",
    "/admin/equipment",
    "/admin/education",
    "/admin/satisfaction",
    "/admin/reports",
];

const USER_PAGES: &[&str] = &["/user/satisfaction"];

/// Paths each role may reach when a principal has no explicit permissions.
#[derive(Debug, Clone, Default)]
pub struct DefaultPermissions {
    table: BTreeMap<Role, Vec<String>>,
}

impl DefaultPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in table: superadmin gets every catalog path, guest gets nothing.
    pub fn builtin(catalog: &PageCatalog) -> Self {
        Self::new()
            .with(Role::Superadmin, catalog.paths().map(str::to_string).collect())
            .with(Role::Admin, to_owned(ADMIN_PAGES))
            .with(Role::User, to_owned(USER_PAGES))
            .with(Role::Guest, Vec::new())
    }

    pub fn with(mut self, role: Role, paths: Vec<String>) -> Self {
        self.table.insert(role, paths);
        self
    }

    /// Roles missing from the table have no default permissions.
    pub fn for_role(&self, role: Role) -> &[String] {
        self.table.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &[String])> {
        self.table.iter().map(|(r, p)| (*r, p.as_slice()))
    }
}

fn to_owned(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}
