//! Pattern extraction for the few HTML constructs the resolver acts on.
//!
//! This is not an HTML parser. It finds `<meta http-equiv="refresh">`,
//! `<input>` and `<form>` start tags with regular expressions and reads
//! their attributes. That is enough for the redirect and auto-post pages
//! that sit in front of the monitored sites.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Start tag with quoted attribute values that may contain `>`.
const TAG_BODY: &str = r#"(?:[^>"']|"[^"]*"|'[^']*')*>"#;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)<meta\b{}", TAG_BODY)).expect("meta tag regex"));

static INPUT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)<input\b{}", TAG_BODY)).expect("input tag regex"));

static FORM_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)<form\b{}", TAG_BODY)).expect("form tag regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute regex")
});

static REFRESH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\burl\s*=\s*(.*)$").expect("refresh url regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").expect("entity regex")
});

/// An `<input>` element with a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub value: String,
    /// Lowercased `type` attribute, `text` when absent.
    pub kind: String,
}

impl Input {
    /// Inputs a browser would submit without user interaction.
    pub fn is_auto_submittable(&self) -> bool {
        matches!(self.kind.as_str(), "hidden" | "submit" | "button")
    }

    pub fn is_button(&self) -> bool {
        matches!(self.kind.as_str(), "submit" | "button")
    }
}

/// `action` and `method` of the first `<form>` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormTarget {
    pub action: Option<String>,
    pub method: Option<String>,
}

/// Target of the first meta-refresh tag, if it names one.
///
/// `<meta http-equiv="refresh" content="0; url=/next">` yields `/next`.
/// A refresh without a URL only reloads the page and yields `None`.
pub fn meta_refresh(body: &str) -> Option<String> {
    let attrs = META_TAG
        .find_iter(body)
        .map(|tag| attributes(tag.as_str()))
        .find(|attrs| {
            attr(attrs, "http-equiv").is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"))
        })?;
    attr(&attrs, "content").and_then(refresh_target)
}

/// Every named `<input>` in document order.
pub fn inputs(body: &str) -> Vec<Input> {
    INPUT_TAG
        .find_iter(body)
        .filter_map(|tag| {
            let attrs = attributes(tag.as_str());
            let name = attr(&attrs, "name")?.to_string();
            if name.is_empty() {
                return None;
            }
            Some(Input {
                name,
                value: attr(&attrs, "value").unwrap_or_default().to_string(),
                kind: attr(&attrs, "type")
                    .map(|t| t.trim().to_ascii_lowercase())
                    .unwrap_or_else(|| "text".to_string()),
            })
        })
        .collect()
}

/// Attributes of the first `<form>` tag.
pub fn form_target(body: &str) -> FormTarget {
    let Some(tag) = FORM_TAG.find(body) else {
        return FormTarget::default();
    };
    let attrs = attributes(tag.as_str());
    let non_empty = |name: &str| {
        attr(&attrs, name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    FormTarget {
        action: non_empty("action"),
        method: non_empty("method"),
    }
}

/// Decode the character references that show up in attribute values.
///
/// Unknown named references are left as they are.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ if entity.starts_with('#') => {
                    entity[1..].parse::<u32>().ok().and_then(char::from_u32)
                }
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Attribute pairs of a start tag, names lowercased, values decoded.
fn attributes(tag: &str) -> Vec<(String, String)> {
    // Skip `<tagname`; attribute names cannot start with `<`.
    let start = tag
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    let rest = tag[start..].trim_end_matches('>');

    ATTRIBUTE
        .captures_iter(rest)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let raw = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            (name, decode_entities(raw))
        })
        .collect()
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// URL part of a refresh `content` value such as `5; URL='/next'`.
fn refresh_target(content: &str) -> Option<String> {
    let caps = REFRESH_URL.captures(content)?;
    let mut target = caps[1].trim();
    for quote in ['"', '\''] {
        if let Some(stripped) = target.strip_prefix(quote) {
            target = stripped.strip_suffix(quote).unwrap_or(stripped).trim();
        }
    }
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
