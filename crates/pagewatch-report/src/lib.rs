//! # pagewatch report
//!
//! Turns verdicts into the printed status report.
//!
//! ## Formats
//!
//! - Human: one aligned line per page, coloured status labels, summary line
//! - JSON: machine-readable report with counts and per-page details

mod render;
mod summary;

pub use render::{render_human, render_json, render_page_list, RenderOptions};
pub use summary::Summary;
