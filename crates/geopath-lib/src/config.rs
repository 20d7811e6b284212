//! Service limits.
//!
//! # Environment Variables
//!
//! - `GEOPATH_MAX_STEPS`: largest accepted `options.steps` (default: 1000)
//! - `GEOPATH_MAX_LANES`: largest accepted `options.lanes` (default: 16)
//! - `GEOPATH_MAX_BATCH_SIZE`: largest accepted batch (default: 50)
//! - `GEOPATH_MAX_PAGE_SIZE`: largest accepted history page (default: 100)

use serde::{Deserialize, Serialize};

/// Limits enforced by [`crate::PathService`] during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub max_steps: usize,
    pub max_lanes: usize,
    pub max_batch_size: usize,
    pub max_page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_lanes: 16,
            max_batch_size: 50,
            max_page_size: 100,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables, falling back to the
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, fallback: usize| {
            lookup(key)
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|&value| value > 0)
                .unwrap_or_else(|| {
                    if lookup(key).is_some() {
                        tracing::warn!(key, fallback, "ignoring invalid configuration value");
                    }
                    fallback
                })
        };

        Self {
            max_steps: read("GEOPATH_MAX_STEPS", defaults.max_steps),
            max_lanes: read("GEOPATH_MAX_LANES", defaults.max_lanes),
            max_batch_size: read("GEOPATH_MAX_BATCH_SIZE", defaults.max_batch_size),
            max_page_size: read("GEOPATH_MAX_PAGE_SIZE", defaults.max_page_size),
        }
    }
}
