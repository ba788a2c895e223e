//! Purpose: Explicit, immutable resolver configuration captured at startup.
//! Exports: `ResolverConfig`.
//! Role: Replaces ambient process globals (environment, platform) with a
//! value the resolver and tests can fabricate.
//! Invariants: The environment snapshot is taken once; facets never read
//! `std::env` directly.
//! Invariants: Search-path override order is preserved as written.

use std::collections::BTreeMap;

use crate::core::platform::Platform;

pub const SEARCH_PATH_VAR: &str = "PYSIDE2_CONFIG_SEARCH_PATH";

#[derive(Clone, Debug)]
pub struct ResolverConfig {
    platform: Platform,
    env: BTreeMap<String, String>,
}

impl ResolverConfig {
    pub fn new(platform: Platform, env: BTreeMap<String, String>) -> Self {
        Self { platform, env }
    }

    pub fn from_host() -> Self {
        Self::new(Platform::host(), std::env::vars().collect())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn env(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(String::as_str)
    }

    /// Explicit module-search-path injection. Empty segments are dropped;
    /// order is significant and preserved.
    pub fn search_path_override(&self) -> Option<Vec<String>> {
        let raw = self.env(SEARCH_PATH_VAR)?;
        if raw.is_empty() {
            return None;
        }
        Some(
            raw.split(self.platform.path_list_separator())
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolverConfig, SEARCH_PATH_VAR};
    use crate::core::platform::Platform;
    use std::collections::BTreeMap;

    fn config_with(platform: Platform, var: &str, value: &str) -> ResolverConfig {
        let mut env = BTreeMap::new();
        env.insert(var.to_string(), value.to_string());
        ResolverConfig::new(platform, env)
    }

    #[test]
    fn override_splits_on_platform_separator() {
        let unix = config_with(Platform::Unix, SEARCH_PATH_VAR, "/a:/b/site-packages:");
        assert_eq!(
            unix.search_path_override(),
            Some(vec!["/a".to_string(), "/b/site-packages".to_string()])
        );

        let windows = config_with(Platform::Windows, SEARCH_PATH_VAR, "C:/a;C:/b");
        assert_eq!(
            windows.search_path_override(),
            Some(vec!["C:/a".to_string(), "C:/b".to_string()])
        );
    }

    #[test]
    fn no_override_when_unset_or_empty() {
        let unset = ResolverConfig::new(Platform::Unix, BTreeMap::new());
        assert_eq!(unset.search_path_override(), None);

        let empty = config_with(Platform::Unix, SEARCH_PATH_VAR, "");
        assert_eq!(empty.search_path_override(), None);
    }
}
