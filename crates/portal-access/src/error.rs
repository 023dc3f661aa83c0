use thiserror::Error;

use crate::role::Role;

#[derive(Debug, Error)]
pub enum AccessError {
    // IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Config
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0} (run `portal init` first)")]
    ConfigNotFound(String),

    #[error("TOML deserialization error: {0}")]
    TomlDe(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),

    // Catalog
    #[error("Duplicate page path in catalog: {0}")]
    DuplicatePath(String),

    #[error("Invalid page path {0:?}: paths must start with '/'")]
    InvalidPath(String),

    #[error("Default permissions for {role} reference unknown page {path}")]
    UnknownDefaultPath { role: Role, path: String },

    // Roles
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

pub type Result<T> = std::result::Result<T, AccessError>;
