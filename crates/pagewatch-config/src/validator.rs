//! Configuration validation.

use std::collections::HashSet;

use regex::RegexBuilder;

use crate::schema::{Config, PageConfig};

/// Hop limits above this only draw a warning.
const HIGH_HOP_LIMIT: u32 = 50;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_settings(config, &mut result);

        if config.pages.is_empty() {
            result.add_error(ValidationError::new("pages", "No pages configured"));
        }

        let mut seen = HashSet::new();
        for (index, page) in config.pages.iter().enumerate() {
            let path = format!("pages[{}]", index);
            if !page.name.trim().is_empty() && !seen.insert(page.name.to_lowercase()) {
                result.add_error(ValidationError::new(
                    format!("{}.name", path),
                    format!("Duplicate page name '{}'", page.name),
                ));
            }
            Self::validate_page(&path, page, &mut result);
        }

        result
    }

    fn validate_settings(config: &Config, result: &mut ValidationResult) {
        let settings = &config.settings;

        if settings.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "settings.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if settings.max_hops == 0 {
            result.add_error(ValidationError::new(
                "settings.max_hops",
                "max_hops must be greater than 0",
            ));
        } else if settings.max_hops > HIGH_HOP_LIMIT {
            result.add_warning(ValidationWarning::new(
                "settings.max_hops",
                format!("max_hops is very high (>{})", HIGH_HOP_LIMIT),
            ));
        }

        if settings.concurrency == 0 {
            result.add_error(ValidationError::new(
                "settings.concurrency",
                "concurrency must be greater than 0",
            ));
        }
    }

    fn validate_page(path: &str, page: &PageConfig, result: &mut ValidationResult) {
        if page.name.trim().is_empty() {
            result.add_error(ValidationError::new(
                format!("{}.name", path),
                "Page name cannot be empty",
            ));
        }

        match url::Url::parse(&page.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => result.add_error(ValidationError::new(
                format!("{}.url", path),
                format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            )),
            Err(e) => result.add_error(ValidationError::new(
                format!("{}.url", path),
                format!("Invalid URL '{}': {}", page.url, e),
            )),
        }

        if page.timeout_secs == Some(0) {
            result.add_error(ValidationError::new(
                format!("{}.timeout_secs", path),
                "timeout_secs must be greater than 0",
            ));
        }

        match page.max_hops {
            Some(0) => result.add_error(ValidationError::new(
                format!("{}.max_hops", path),
                "max_hops must be greater than 0",
            )),
            Some(hops) if hops > HIGH_HOP_LIMIT => result.add_warning(ValidationWarning::new(
                format!("{}.max_hops", path),
                format!("max_hops is very high (>{})", HIGH_HOP_LIMIT),
            )),
            _ => {}
        }

        if page.success.is_empty() {
            result.add_warning(ValidationWarning::new(
                format!("{}.success", path),
                format!(
                    "'{}' has no success marker, any 2xx page will count as up",
                    page.name
                ),
            ));
        }

        for (field, patterns) in [("success", &page.success), ("maintenance", &page.maintenance)] {
            for pattern in patterns {
                if let Err(e) = RegexBuilder::new(pattern).case_insensitive(true).build() {
                    result.add_error(ValidationError::new(
                        format!("{}.{}", path, field),
                        format!("Invalid pattern '{}': {}", pattern, e),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
