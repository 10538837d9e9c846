//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

impl Config {
    /// Request timeout for a page, falling back to the global setting.
    pub fn page_timeout(&self, page: &PageConfig) -> u64 {
        self.settings.timeout_for(page)
    }

    /// Hop limit for a page, falling back to the global setting.
    pub fn page_max_hops(&self, page: &PageConfig) -> u32 {
        self.settings.max_hops_for(page)
    }

    /// Restrict the page list to the given names (case-insensitive).
    ///
    /// An empty selection keeps every page. Pages keep their configured order.
    pub fn select(&mut self, names: &[String]) -> Result<(), ConfigError> {
        if names.is_empty() {
            return Ok(());
        }

        for name in names {
            if self.find(name).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: "pages".to_string(),
                    message: format!("unknown page '{}'", name),
                });
            }
        }

        self.pages
            .retain(|page| names.iter().any(|n| n.eq_ignore_ascii_case(&page.name)));
        Ok(())
    }

    /// Look up a page by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Global polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of requests made while resolving one page.
    #[serde(default = "default_max_hops")]
    pub max_hops: u32,

    /// Number of pages polled at the same time.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Settings {
    pub fn timeout_for(&self, page: &PageConfig) -> u64 {
        page.timeout_secs.unwrap_or(self.timeout_secs)
    }

    pub fn max_hops_for(&self, page: &PageConfig) -> u32 {
        page.max_hops.unwrap_or(self.max_hops)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_hops: default_max_hops(),
            concurrency: default_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_max_hops() -> u32 {
    10
}

fn default_concurrency() -> usize {
    8
}

fn default_user_agent() -> String {
    format!("pagewatch/{}", env!("CARGO_PKG_VERSION"))
}

/// A page to poll.
///
/// `success` and `maintenance` hold case-insensitive regular expressions
/// matched against response bodies. A page with no success markers is up as
/// soon as it resolves to a 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub name: String,

    pub url: String,

    #[serde(default)]
    pub success: Vec<String>,

    #[serde(default)]
    pub maintenance: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hops: Option<u32>,
}

impl PageConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            success: Vec::new(),
            maintenance: Vec::new(),
            timeout_secs: None,
            max_hops: None,
        }
    }

    pub fn with_success(mut self, pattern: impl Into<String>) -> Self {
        self.success.push(pattern.into());
        self
    }

    pub fn with_maintenance(mut self, pattern: impl Into<String>) -> Self {
        self.maintenance.push(pattern.into());
        self
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
