use serde::{Deserialize, Serialize};

/// Sentinel entry in an explicit permission list that grants every path.
pub const WILDCARD: &str = "*";

/// How a granted path is compared against a target path.
///
/// `Prefix` is plain string-prefix matching: a grant of `/admin/register-user`
/// also covers `/admin/register-user-extra`. Deployments that rely on that
/// behaviour keep it as the default. `Segment` only matches on a `/`
/// boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    #[default]
    Prefix,
    Segment,
}

impl PathMatch {
    /// Whether `granted` covers `target`. A blank grant covers nothing.
    pub fn covers(self, granted: &str, target: &str) -> bool {
        if granted.is_empty() {
            return false;
        }
        if granted == WILDCARD {
            return true;
        }
        match self {
            PathMatch::Prefix => target.starts_with(granted),
            PathMatch::Segment => match target.strip_prefix(granted) {
                Some("") => true,
                Some(rest) => granted.ends_with('/') || rest.starts_with('/'),
                None => false,
            },
        }
    }
}
