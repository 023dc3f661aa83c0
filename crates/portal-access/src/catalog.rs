use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, Result};

/// Navigation bucket a page is listed under.
///
/// Declaration order is the order menus are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageCategory {
    Settings,
    Management,
    Reports,
    User,
}

impl fmt::Display for PageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PageCategory::Settings => "settings",
            PageCategory::Management => "management",
            PageCategory::Reports => "reports",
            PageCategory::User => "user",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePermission {
    pub path: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub category: PageCategory,
}

/// (path, label, icon, description, category)
const BUILTIN_PAGES: &[(&str, &str, &str, &str, PageCategory)] = &[
    ("/admin", "Admin home", "home", "Back-office landing page", PageCategory::Management),
    ("/admin/dashboard", "Dashboard", "chart", "Service statistics overview", PageCategory::Reports),
    ("/admin/complaints", "Complaints", "alert", "Review and update citizen complaints", PageCategory::Management),
    ("/admin/equipment", "Equipment", "box", "Manage lendable equipment inventory", PageCategory::Management),
    ("/admin/equipment/loans", "Equipment loans", "clipboard", "Approve and track equipment loans", PageCategory::Management),
    ("/admin/education", "Education surveys", "book", "Manage education survey responses", PageCategory::Management),
    ("/admin/satisfaction", "Satisfaction results", "smile", "Satisfaction survey results", PageCategory::Reports),
    ("/admin/reports", "Reports", "file", "Exportable service reports", PageCategory::Reports),
    ("/admin/register-user", "Register user", "user-plus", "Register a new staff account", PageCategory::Settings),
    ("/admin/users", "Users", "users", "Manage staff accounts", PageCategory::Settings),
    ("/admin/permissions", "Permissions", "key", "Assign roles and page permissions", PageCategory::Settings),
    ("/admin/settings", "Settings", "settings", "Portal settings", PageCategory::Settings),
    ("/user/satisfaction", "Satisfaction survey", "smile", "Rate a municipal service", PageCategory::User),
    ("/user/satisfaction/history", "My ratings", "clock", "Previously submitted ratings", PageCategory::User),
    ("/user/complaints", "Report a problem", "alert", "Submit a complaint", PageCategory::User),
    ("/user/equipment", "Borrow equipment", "box", "Request an equipment loan", PageCategory::User),
];

/// Ordered, immutable list of every page in the portal.
#[derive(Debug, Clone)]
pub struct PageCatalog {
    pages: Vec<PagePermission>,
}

impl PageCatalog {
    /// Build a catalog, rejecting duplicate or non-absolute paths.
    pub fn new(pages: Vec<PagePermission>) -> Result<Self> {
        let mut seen = HashSet::new();
        for page in &pages {
            if !page.path.starts_with('/') {
                return Err(AccessError::InvalidPath(page.path.clone()));
            }
            if !seen.insert(page.path.as_str()) {
                return Err(AccessError::DuplicatePath(page.path.clone()));
            }
        }
        Ok(Self { pages })
    }

    pub fn builtin() -> Self {
        let pages = BUILTIN_PAGES
            .iter()
            .map(|(path, label, icon, description, category)| PagePermission {
                path: path.to_string(),
                label: label.to_string(),
                icon: icon.to_string(),
                description: description.to_string(),
                category: *category,
            })
            .collect();
        Self { pages }
    }

    pub fn pages(&self) -> &[PagePermission] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = &PagePermission> {
        self.pages.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|p| p.path.as_str())
    }

    pub fn get(&self, path: &str) -> Option<&PagePermission> {
        self.pages.iter().find(|p| p.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
