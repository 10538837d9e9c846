//! Per-response decision of the resolution loop.
//!
//! [`decide`] looks at one fetched document and either settles the page's
//! status or names the next request: a meta-refresh target to follow, or a
//! hidden-input form to submit.

use regex::{Regex, RegexBuilder};
use url::Url;

use pagewatch_config::PageConfig;

use crate::error::ProbeError;
use crate::html;
use crate::verdict::PageStatus;

/// Compiled success and maintenance markers for one page.
#[derive(Debug, Clone)]
pub struct Markers {
    success: Vec<Regex>,
    maintenance: Vec<Regex>,
}

impl Markers {
    pub fn compile(page: &PageConfig) -> Result<Self, ProbeError> {
        Ok(Self {
            success: compile_all(&page.success)?,
            maintenance: compile_all(&page.maintenance)?,
        })
    }

    fn maintenance_match(&self, body: &str) -> Option<&str> {
        self.maintenance
            .iter()
            .find(|re| re.is_match(body))
            .map(Regex::as_str)
    }

    fn success_match(&self, body: &str) -> Option<&str> {
        self.success
            .iter()
            .find(|re| re.is_match(body))
            .map(Regex::as_str)
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, ProbeError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| ProbeError::InvalidPattern(format!("'{}': {}", p, e)))
        })
        .collect()
}

/// Form submission method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    /// Parse a form `method` attribute. Anything but `get` posts.
    fn from_attr(method: Option<&str>) -> Self {
        match method {
            Some(m) if m.eq_ignore_ascii_case("get") => FormMethod::Get,
            _ => FormMethod::Post,
        }
    }
}

/// A form the resolver will submit on the page's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub method: FormMethod,
    pub action: Url,
    pub fields: Vec<(String, String)>,
}

impl FormSubmission {
    /// `application/x-www-form-urlencoded` encoding of the fields.
    pub fn encoded_fields(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }

    /// Action URL with the fields as its query, for GET forms.
    pub fn query_url(&self) -> Url {
        let mut url = self.action.clone();
        if self.fields.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(self.fields.iter());
        }
        url
    }
}

/// What to do after a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Status settled, with the reason.
    Done(PageStatus, String),
    /// Follow a meta refresh.
    Follow(Url),
    /// Submit a form.
    Submit(FormSubmission),
}

/// Decide the next step for a response.
///
/// Checks run in a fixed order: maintenance markers, HTTP status, success
/// markers, meta refresh, auto-submittable form. A page that passes none of
/// them is down.
pub fn decide(markers: &Markers, status: u16, url: &Url, body: &str) -> Result<Step, ProbeError> {
    if let Some(pattern) = markers.maintenance_match(body) {
        return Ok(Step::Done(
            PageStatus::Maintenance,
            format!("matched maintenance marker '{}'", pattern),
        ));
    }

    if !(200..300).contains(&status) {
        return Ok(Step::Done(PageStatus::Down, format!("HTTP {}", status)));
    }

    if markers.success.is_empty() {
        return Ok(Step::Done(PageStatus::Up, format!("HTTP {}", status)));
    }
    if let Some(pattern) = markers.success_match(body) {
        return Ok(Step::Done(PageStatus::Up, format!("matched '{}'", pattern)));
    }

    if let Some(target) = html::meta_refresh(body) {
        let next = url
            .join(&target)
            .map_err(|e| ProbeError::InvalidUrl(format!("refresh target '{}': {}", target, e)))?;
        return Ok(Step::Follow(next));
    }

    if let Some(form) = auto_form(url, body)? {
        return Ok(Step::Submit(form));
    }

    Ok(Step::Done(
        PageStatus::Down,
        "no success marker found".to_string(),
    ))
}

/// The page's form, if every named input can be submitted without a user.
fn auto_form(url: &Url, body: &str) -> Result<Option<FormSubmission>, ProbeError> {
    let inputs = html::inputs(body);
    if inputs.is_empty() || !inputs.iter().all(html::Input::is_auto_submittable) {
        return Ok(None);
    }

    let target = html::form_target(body);
    let action = match target.action.as_deref() {
        Some(action) => url
            .join(action)
            .map_err(|e| ProbeError::InvalidUrl(format!("form action '{}': {}", action, e)))?,
        None => url.clone(),
    };

    let fields = inputs
        .into_iter()
        .filter(|input| !(input.is_button() && input.value.is_empty()))
        .map(|input| (input.name, input.value))
        .collect();

    Ok(Some(FormSubmission {
        method: FormMethod::from_attr(target.method.as_deref()),
        action,
        fields,
    }))
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
