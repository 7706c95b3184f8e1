//! Engine configuration.
//!
//! The matcher's specified enumeration strategy is exhaustive Cartesian
//! product over the vertex domain (spec §4.4). That's fine for the small
//! graphs this engine is built for, but a bare `|V|^|D|` loop with no
//! upper bound turns a typo'd query with five unbound designations into a
//! hang against any graph with more than a handful of vertices. This
//! config layer exists to let hosts set (or keep the default of) a bound
//! that fails fast instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(errs: validator::ValidationErrors) -> Self {
        ConfigError::Validation(errs.to_string())
    }
}

/// Runtime configuration for [`crate::query_with_config`].
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on `|V(G)|` the matcher will enumerate a domain over.
    /// Exceeding it is a configuration-level refusal, not a silent
    /// truncation: the matcher yields no rows and returns an error instead.
    #[validate(range(min = 1, message = "max_domain_size must be at least 1"))]
    pub max_domain_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_domain_size: 10_000,
        }
    }
}

impl EngineConfig {
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
