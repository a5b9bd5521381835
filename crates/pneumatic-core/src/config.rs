//! Resolver configuration.
//!
//! # Example
//!
//! ```
//! use pneumatic_core::config::ResolverConfig;
//!
//! let config = ResolverConfig::from_json(r#"{ "max_push": 6 }"#).unwrap();
//! assert_eq!(config.max_push, 6);
//! assert_eq!(config.line_reach, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest structure a sticky pump moves in one push.
pub const MAX_PUSH_DEPTH: usize = 12;

/// Cells a non-sticky pump inspects ahead of its head.
pub const DEFAULT_LINE_REACH: usize = 1;

/// Limits applied by the push resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of cells the sticky resolver may push
    pub max_push: usize,
    /// Number of cells the line resolver inspects, starting at the head
    pub line_reach: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_push: MAX_PUSH_DEPTH,
            line_reach: DEFAULT_LINE_REACH,
        }
    }
}

impl ResolverConfig {
    /// Config with a custom push limit.
    #[must_use]
    pub fn with_max_push(max_push: usize) -> Self {
        Self {
            max_push,
            ..Default::default()
        }
    }

    /// Config with a custom line reach.
    #[must_use]
    pub fn with_line_reach(line_reach: usize) -> Self {
        Self {
            line_reach,
            ..Default::default()
        }
    }

    /// Check the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxPush`] or [`ConfigError::ZeroLineReach`]
    /// when a limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_push == 0 {
            return Err(ConfigError::ZeroMaxPush);
        }
        if self.line_reach == 0 {
            return Err(ConfigError::ZeroLineReach);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
