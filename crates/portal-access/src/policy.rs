use std::collections::BTreeMap;

use crate::catalog::{PageCatalog, PageCategory, PagePermission};
use crate::config::AccessSettings;
use crate::defaults::DefaultPermissions;
use crate::error::{AccessError, Result};
use crate::matching::PathMatch;
use crate::role::Role;

/// Immutable access rules: page catalog, role defaults and match mode.
///
/// Built once at startup and shared by reference. Every query is pure and
/// total; denial is `false`, never an error.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    catalog: PageCatalog,
    defaults: DefaultPermissions,
    match_mode: PathMatch,
}

impl AccessPolicy {
    /// Build a policy, checking that every default path is a catalog page.
    pub fn new(
        catalog: PageCatalog,
        defaults: DefaultPermissions,
        match_mode: PathMatch,
    ) -> Result<Self> {
        for (role, paths) in defaults.iter() {
            if let Some(path) = paths.iter().find(|p| !catalog.contains(p)) {
                return Err(AccessError::UnknownDefaultPath {
                    role,
                    path: path.clone(),
                });
            }
        }
        Ok(Self {
            catalog,
            defaults,
            match_mode,
        })
    }

    pub fn builtin() -> Self {
        let catalog = PageCatalog::builtin();
        let defaults = DefaultPermissions::builtin(&catalog);
        Self {
            catalog,
            defaults,
            match_mode: PathMatch::default(),
        }
    }

    /// Apply configured overrides on top of the built-in tables.
    pub fn from_settings(settings: &AccessSettings) -> Result<Self> {
        let catalog = if settings.pages.is_empty() {
            PageCatalog::builtin()
        } else {
            PageCatalog::new(settings.pages.clone())?
        };

        let mut defaults = DefaultPermissions::builtin(&catalog);
        for (role, paths) in [
            (Role::Admin, &settings.defaults.admin),
            (Role::User, &settings.defaults.user),
            (Role::Guest, &settings.defaults.guest),
        ] {
            if let Some(paths) = paths {
                defaults = defaults.with(role, paths.clone());
            }
        }

        let policy = Self::new(catalog, defaults, settings.match_mode)?;
        tracing::debug!(
            pages = policy.catalog.len(),
            match_mode = ?policy.match_mode,
            "access policy loaded"
        );
        Ok(policy)
    }

    pub fn catalog(&self) -> &PageCatalog {
        &self.catalog
    }

    pub fn defaults(&self) -> &DefaultPermissions {
        &self.defaults
    }

    pub fn match_mode(&self) -> PathMatch {
        self.match_mode
    }

    pub fn page(&self, path: &str) -> Option<&PagePermission> {
        self.catalog.get(path)
    }

    /// The granted paths consulted for a principal.
    ///
    /// A non-blank explicit list replaces the role default entirely.
    /// Superadmin always gets every catalog path.
    pub fn effective_permissions<'a>(&'a self, role: Role, explicit: &'a [String]) -> Vec<&'a str> {
        if role == Role::Superadmin {
            return self.catalog.paths().collect();
        }
        let explicit: Vec<&str> = explicit
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if !explicit.is_empty() {
            return explicit;
        }
        self.defaults
            .for_role(role)
            .iter()
            .map(String::as_str)
            .collect()
    }

    pub fn has_permission(&self, role: Role, explicit: &[String], target: &str) -> bool {
        if role == Role::Superadmin {
            return true;
        }
        self.effective_permissions(role, explicit)
            .into_iter()
            .any(|granted| self.match_mode.covers(granted, target))
    }

    /// Catalog pages the principal may open, in catalog order.
    pub fn accessible_pages(&self, role: Role, explicit: &[String]) -> Vec<&PagePermission> {
        if role == Role::Superadmin {
            return self.catalog.iter().collect();
        }
        let allowed = self.effective_permissions(role, explicit);
        self.catalog
            .iter()
            .filter(|page| {
                allowed
                    .iter()
                    .any(|granted| page.path == *granted || self.match_mode.covers(granted, &page.path))
            })
            .collect()
    }
}

/// Bucket pages by category. Within a bucket pages keep their input order;
/// buckets follow [`PageCategory`] declaration order and empty ones are
/// left out.
pub fn group_pages_by_category<'a, I>(pages: I) -> BTreeMap<PageCategory, Vec<&'a PagePermission>>
where
    I: IntoIterator<Item = &'a PagePermission>,
{
    let mut groups: BTreeMap<PageCategory, Vec<&'a PagePermission>> = BTreeMap::new();
    for page in pages {
        groups.entry(page.category).or_default().push(page);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleDefaults;
    use crate::matching::WILDCARD;

    fn page(path: &str, category: PageCategory) -> PagePermission {
        PagePermission {
            path: path.to_string(),
            label: path.to_string(),
            icon: String::new(),
            description: String::new(),
            category,
        }
    }

    fn perms(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    const SAMPLE_PATHS: &[&str] = &[
        "/",
        "/admin",
        "/admin/dashboard",
        "/admin/settings",
        "/user/satisfaction",
        "/totally/unlisted/path",
        "",
    ];

    #[test]
    fn superadmin_always_allowed() {
        let policy = AccessPolicy::builtin();
        for path in SAMPLE_PATHS {
            assert!(policy.has_permission(Role::Superadmin, &[], path));
            assert!(policy.has_permission(Role::Superadmin, &perms(&["/nothing"]), path));
        }
    }

    #[test]
    fn guest_without_explicit_is_denied_everywhere() {
        let policy = AccessPolicy::builtin();
        for path in SAMPLE_PATHS {
            assert!(!policy.has_permission(Role::Guest, &[], path));
        }
    }

    #[test]
    fn unknown_role_behaves_as_guest() {
        let policy = AccessPolicy::builtin();
        let role = Role::from_claim(Some("mayor"));
        assert!(!policy.has_permission(role, &[], "/admin/dashboard"));
        assert!(policy.accessible_pages(role, &[]).is_empty());
    }

    #[test]
    fn admin_defaults() {
        let policy = AccessPolicy::builtin();
        assert!(policy.has_permission(Role::Admin, &[], "/admin/dashboard"));
        assert!(policy.has_permission(Role::Admin, &[], "/admin/equipment/loans"));
        assert!(!policy.has_permission(Role::Admin, &[], "/admin/settings"));
        assert!(!policy.has_permission(Role::Admin, &[], "/totally/unlisted/path"));
    }

    #[test]
    fn explicit_list_overrides_role_default() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&["/reports-only"]);
        assert!(!policy.has_permission(Role::Admin, &explicit, "/admin/dashboard"));
        assert!(policy.has_permission(Role::Admin, &explicit, "/reports-only/monthly"));
    }

    #[test]
    fn explicit_list_can_widen_a_user() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&["/admin/complaints"]);
        assert!(policy.has_permission(Role::User, &explicit, "/admin/complaints"));
        assert!(!policy.has_permission(Role::User, &explicit, "/user/satisfaction"));
    }

    #[test]
    fn blank_explicit_entries_fall_back_to_default() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&["", "  "]);
        assert!(policy.has_permission(Role::User, &explicit, "/user/satisfaction"));
        assert!(!policy.has_permission(Role::User, &explicit, "/admin"));
    }

    #[test]
    fn explicit_entries_are_trimmed() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&[" /admin/complaints ", "\t/user/equipment"]);
        assert!(policy.has_permission(Role::Guest, &explicit, "/admin/complaints"));
        assert!(policy.has_permission(Role::Guest, &explicit, "/user/equipment"));
        assert!(!policy.has_permission(Role::Guest, &explicit, " /admin/complaints"));
        assert_eq!(
            policy.effective_permissions(Role::Guest, &explicit),
            vec!["/admin/complaints", "/user/equipment"]
        );
        let got: Vec<&str> = policy
            .accessible_pages(Role::Guest, &explicit)
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(got, vec!["/admin/complaints", "/user/equipment"]);
    }

    #[test]
    fn wildcard_grants_everything() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&[WILDCARD]);
        assert!(policy.has_permission(Role::Guest, &explicit, "/admin/settings"));
        assert_eq!(
            policy.accessible_pages(Role::User, &explicit).len(),
            policy.catalog().len()
        );
    }

    #[test]
    fn has_permission_is_repeatable() {
        let policy = AccessPolicy::builtin();
        let explicit = perms(&["/admin/reports"]);
        let first = policy.has_permission(Role::Admin, &explicit, "/admin/reports/2024");
        let second = policy.has_permission(Role::Admin, &explicit, "/admin/reports/2024");
        assert_eq!(first, second);
    }

    #[test]
    fn superadmin_sees_full_catalog_in_order() {
        let policy = AccessPolicy::builtin();
        let pages = policy.accessible_pages(Role::Superadmin, &[]);
        assert_eq!(pages.len(), policy.catalog().len());
        let expected: Vec<&str> = policy.catalog().paths().collect();
        let got: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn user_sees_satisfaction_pages_only() {
        let policy = AccessPolicy::builtin();
        let got: Vec<&str> = policy
            .accessible_pages(Role::User, &[])
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        let expected: Vec<&str> = policy
            .catalog()
            .paths()
            .filter(|p| p.starts_with("/user/satisfaction"))
            .collect();
        assert_eq!(got, expected);
        assert_eq!(got, vec!["/user/satisfaction", "/user/satisfaction/history"]);
    }

    #[test]
    fn prefix_grant_includes_sub_pages() {
        let catalog = PageCatalog::new(vec![
            page("/admin", PageCategory::Management),
            page("/admin/register-user", PageCategory::Settings),
            page("/user/satisfaction", PageCategory::User),
        ])
        .unwrap();
        let policy = AccessPolicy::new(catalog, DefaultPermissions::new(), PathMatch::Prefix).unwrap();
        let got: Vec<&str> = policy
            .accessible_pages(Role::Admin, &perms(&["/admin"]))
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(got, vec!["/admin", "/admin/register-user"]);
    }

    #[test]
    fn sibling_route_depends_on_match_mode() {
        let explicit = perms(&["/admin/register-user"]);
        let target = "/admin/register-user-extra";

        let prefix = AccessPolicy::builtin();
        assert!(prefix.has_permission(Role::Admin, &explicit, target));

        let segment = AccessPolicy::new(
            PageCatalog::builtin(),
            DefaultPermissions::builtin(&PageCatalog::builtin()),
            PathMatch::Segment,
        )
        .unwrap();
        assert!(!segment.has_permission(Role::Admin, &explicit, target));
        assert!(segment.has_permission(Role::Admin, &explicit, "/admin/register-user/step-2"));
    }

    #[test]
    fn defaults_must_reference_catalog_pages() {
        let catalog = PageCatalog::builtin();
        let defaults = DefaultPermissions::builtin(&catalog).with(Role::User, perms(&["/nowhere"]));
        let result = AccessPolicy::new(catalog, defaults, PathMatch::Prefix);
        assert!(matches!(
            result,
            Err(AccessError::UnknownDefaultPath { role: Role::User, ref path }) if path == "/nowhere"
        ));
    }

    #[test]
    fn settings_override_defaults() {
        let settings = AccessSettings {
            defaults: RoleDefaults {
                user: Some(perms(&["/user/complaints"])),
                ..Default::default()
            },
            ..Default::default()
        };
        let policy = AccessPolicy::from_settings(&settings).unwrap();
        assert!(policy.has_permission(Role::User, &[], "/user/complaints"));
        assert!(!policy.has_permission(Role::User, &[], "/user/satisfaction"));
        assert!(policy.has_permission(Role::Admin, &[], "/admin/dashboard"));
    }

    #[test]
    fn settings_with_custom_catalog_require_matching_defaults() {
        let settings = AccessSettings {
            pages: vec![page("/user/satisfaction", PageCategory::User)],
            ..Default::default()
        };
        assert!(matches!(
            AccessPolicy::from_settings(&settings),
            Err(AccessError::UnknownDefaultPath { role: Role::Admin, .. })
        ));
    }

    #[test]
    fn effective_permissions_reports_source() {
        let policy = AccessPolicy::builtin();
        assert_eq!(policy.effective_permissions(Role::User, &[]), vec!["/user/satisfaction"]);
        let explicit = perms(&["/x"]);
        assert_eq!(policy.effective_permissions(Role::Admin, &explicit), vec!["/x"]);
        assert_eq!(
            policy.effective_permissions(Role::Superadmin, &explicit).len(),
            policy.catalog().len()
        );
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let pages = vec![
            page("/r/2", PageCategory::Reports),
            page("/m/1", PageCategory::Management),
            page("/r/1", PageCategory::Reports),
            page("/s/1", PageCategory::Settings),
        ];
        let groups = group_pages_by_category(&pages);
        let reports: Vec<&str> = groups[&PageCategory::Reports]
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(reports, vec!["/r/2", "/r/1"]);
        assert!(!groups.contains_key(&PageCategory::User));
        let order: Vec<PageCategory> = groups.keys().copied().collect();
        assert_eq!(
            order,
            vec![PageCategory::Settings, PageCategory::Management, PageCategory::Reports]
        );
    }

    #[test]
    fn grouping_accessible_pages_for_admin() {
        let policy = AccessPolicy::builtin();
        let groups = group_pages_by_category(policy.accessible_pages(Role::Admin, &[]));
        assert!(!groups.contains_key(&PageCategory::Settings));
        assert_eq!(groups[&PageCategory::Reports].len(), 3);
    }
}
