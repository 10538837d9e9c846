//! Per-page verdicts.

use serde::{Deserialize, Serialize};

/// Page status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Page resolved and looks healthy.
    Up,
    /// Page announces maintenance.
    Maintenance,
    /// Page is unreachable or never reached a healthy state.
    Down,
}

impl PageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PageStatus::Up => "UP",
            PageStatus::Maintenance => "MAINTENANCE",
            PageStatus::Down => "DOWN",
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Page name.
    pub name: String,
    /// Configured start URL.
    pub url: String,
    pub status: PageStatus,
    /// What decided the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// URL of the last response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    /// HTTP status of the last response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Requests made.
    pub hops: u32,
    pub elapsed_ms: u64,
}

impl Verdict {
    pub fn new(name: impl Into<String>, url: impl Into<String>, status: PageStatus) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            status,
            reason: None,
            final_url: None,
            http_status: None,
            hops: 0,
            elapsed_ms: 0,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn is_down(&self) -> bool {
        self.status == PageStatus::Down
    }
}
