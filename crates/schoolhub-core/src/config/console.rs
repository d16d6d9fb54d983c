//! List screen and dashboard configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Console behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Page size used when a module has no explicit entry.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Per-module page size overrides, keyed by resource name
    /// (e.g. `students = 10`, `transactions = 15`).
    #[serde(default)]
    pub page_sizes: HashMap<String, u64>,
    /// Interval between status dashboard refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
}

impl ConsoleConfig {
    /// Resolve the page size for a resource, falling back to the
    /// module's built-in size and then to the global default.
    pub fn page_size_for(&self, resource: &str, builtin: Option<u64>) -> u64 {
        self.page_sizes
            .get(resource)
            .copied()
            .or(builtin)
            .unwrap_or(self.default_page_size)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_sizes: HashMap::new(),
            refresh_interval_seconds: default_refresh_interval(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_refresh_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_resolution_order() {
        let mut config = ConsoleConfig::default();
        assert_eq!(config.page_size_for("students", None), 10);
        assert_eq!(config.page_size_for("transactions", Some(15)), 15);
        config.page_sizes.insert("transactions".to_string(), 25);
        assert_eq!(config.page_size_for("transactions", Some(15)), 25);
    }
}
