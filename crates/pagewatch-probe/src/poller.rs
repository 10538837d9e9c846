//! Concurrent polling of a page list.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::info;

use pagewatch_config::PageConfig;

use crate::probe::Probe;
use crate::verdict::Verdict;

/// Polls pages through a [`Probe`], a bounded number at a time.
pub struct Poller {
    probe: Arc<dyn Probe>,
    concurrency: usize,
}

impl Poller {
    pub fn new(probe: Arc<dyn Probe>, concurrency: usize) -> Self {
        Self {
            probe,
            concurrency: concurrency.max(1),
        }
    }

    /// Poll every page. Verdicts come back in page order.
    pub async fn poll(&self, pages: &[PageConfig]) -> Vec<Verdict> {
        info!(
            pages = pages.len(),
            concurrency = self.concurrency,
            "Polling pages"
        );

        stream::iter(pages)
            .map(|page| self.probe.probe(page))
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
