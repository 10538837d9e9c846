//! HTTP probe: runs the resolution loop for one page.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{redirect, Client};
use tracing::{debug, info, warn};
use url::Url;

use pagewatch_config::{PageConfig, Settings};

use crate::error::ProbeError;
use crate::resolver::{decide, FormMethod, FormSubmission, Markers, Step};
use crate::verdict::{PageStatus, Verdict};

/// Something that can produce a verdict for a page.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Resolve a page. Failures are reported as a down verdict.
    async fn probe(&self, page: &PageConfig) -> Verdict;
}

/// One request of the loop. Also the loop-detection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Hop {
    method: FormMethod,
    url: Url,
    body: Option<String>,
}

impl Hop {
    fn get(url: Url) -> Self {
        Self {
            method: FormMethod::Get,
            url,
            body: None,
        }
    }

    fn submit(form: FormSubmission) -> Self {
        match form.method {
            FormMethod::Get => Self::get(form.query_url()),
            FormMethod::Post => {
                let body = form.encoded_fields();
                Self {
                    method: FormMethod::Post,
                    url: form.action,
                    body: Some(body),
                }
            }
        }
    }
}

/// Where the loop got to, kept even when it fails.
#[derive(Debug, Default)]
struct Progress {
    hops: u32,
    final_url: Option<String>,
    http_status: Option<u16>,
}

/// Probe that fetches pages over HTTP.
///
/// Every page gets its own client, so cookies set during one page's sign-on
/// dance never leak into another page.
pub struct HttpProbe {
    settings: Settings,
}

impl HttpProbe {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    fn client(&self, timeout: u64, max_hops: u32) -> Result<Client, ProbeError> {
        Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeout))
            .user_agent(self.settings.user_agent.as_str())
            .redirect(redirect::Policy::limited(max_hops as usize))
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))
    }

    async fn resolve(
        &self,
        page: &PageConfig,
        progress: &mut Progress,
    ) -> Result<(PageStatus, String), ProbeError> {
        let markers = Markers::compile(page)?;
        let start = Url::parse(&page.url)
            .map_err(|e| ProbeError::InvalidUrl(format!("{}: {}", page.url, e)))?;
        let timeout = self.settings.timeout_for(page);
        let max_hops = self.settings.max_hops_for(page);
        let client = self.client(timeout, max_hops)?;

        let mut seen = HashSet::new();
        let mut next = Hop::get(start);

        while progress.hops < max_hops {
            if !seen.insert(next.clone()) {
                return Err(ProbeError::Loop(next.url.to_string()));
            }
            progress.hops += 1;
            debug!(
                page = %page.name,
                hop = progress.hops,
                method = ?next.method,
                url = %next.url,
                "Requesting"
            );

            let request = match next.method {
                FormMethod::Get => client.get(next.url.clone()),
                FormMethod::Post => client
                    .post(next.url.clone())
                    .header(
                        reqwest::header::CONTENT_TYPE,
                        "application/x-www-form-urlencoded",
                    )
                    .body(next.body.clone().unwrap_or_default()),
            };

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(timeout)
                } else {
                    ProbeError::Request(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let url = response.url().clone();
            progress.http_status = Some(status);
            progress.final_url = Some(url.to_string());

            let body = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(timeout)
                } else {
                    ProbeError::Body(e.to_string())
                }
            })?;

            match decide(&markers, status, &url, &body)? {
                Step::Done(status, reason) => return Ok((status, reason)),
                Step::Follow(target) => {
                    debug!(page = %page.name, target = %target, "Following meta refresh");
                    next = Hop::get(target);
                }
                Step::Submit(form) => {
                    debug!(
                        page = %page.name,
                        action = %form.action,
                        fields = form.fields.len(),
                        "Submitting form"
                    );
                    next = Hop::submit(form);
                }
            }
        }

        Err(ProbeError::HopLimit(max_hops))
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, page: &PageConfig) -> Verdict {
        let started = Instant::now();
        let mut progress = Progress::default();

        let (status, reason) = match self.resolve(page, &mut progress).await {
            Ok(outcome) => outcome,
            Err(e) => (PageStatus::Down, e.to_string()),
        };

        let verdict = Verdict {
            name: page.name.clone(),
            url: page.url.clone(),
            status,
            reason: Some(reason),
            final_url: progress.final_url,
            http_status: progress.http_status,
            hops: progress.hops,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        match verdict.status {
            PageStatus::Up => info!(
                page = %verdict.name,
                hops = verdict.hops,
                elapsed_ms = verdict.elapsed_ms,
                "Page is up"
            ),
            PageStatus::Maintenance | PageStatus::Down => warn!(
                page = %verdict.name,
                status = %verdict.status,
                reason = verdict.reason.as_deref().unwrap_or(""),
                "Page is not up"
            ),
        }

        verdict
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
