//! # pagewatch config
//!
//! Page list configuration: schema, the built-in page list, loading and validation.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, CONFIG_ENV_VAR};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
