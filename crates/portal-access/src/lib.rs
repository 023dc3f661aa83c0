pub mod catalog;
pub mod config;
pub mod defaults;
pub mod error;
pub mod matching;
pub mod policy;
pub mod role;

pub use catalog::{PageCatalog, PageCategory, PagePermission};
pub use config::{AccessSettings, PortalConfig, RoleDefaults, WebSettings};
pub use defaults::DefaultPermissions;
pub use error::{AccessError, Result};
pub use matching::{PathMatch, WILDCARD};
pub use policy::{AccessPolicy, group_pages_by_category};
pub use role::Role;
