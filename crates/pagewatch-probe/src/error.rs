//! Probe errors.

use thiserror::Error;

/// Errors raised while resolving a page.
///
/// None of these abort a run: the probe turns them into a down verdict.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to read body: {0}")]
    Body(String),

    #[error("gave up after {0} hops")]
    HopLimit(u32),

    #[error("redirect loop at {0}")]
    Loop(String),
}
