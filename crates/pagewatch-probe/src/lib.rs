//! Page probing for pagewatch.
//!
//! Resolves each configured page by following meta-refresh redirects and
//! auto-submitting hidden-input forms until the page is known to be up, in
//! maintenance, or down.

mod error;
pub mod html;
mod poller;
mod probe;
mod resolver;
mod verdict;

pub use error::ProbeError;
pub use poller::Poller;
pub use probe::{HttpProbe, Probe};
pub use resolver::{decide, FormMethod, FormSubmission, Markers, Step};
pub use verdict::{PageStatus, Verdict};
