//! Request validation.
//!
//! Everything here runs before a strategy is selected, so malformed input
//! never reaches the search kernels.

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::model::{PathQuery, PathRequest, SearchOptions};
use crate::strategy::PathAlgorithm;

/// Validation trait for request types.
pub trait Validate {
    /// Validate against the limits in `config`, returning the first problem.
    fn validate(&self, config: &ServiceConfig) -> Result<()>;
}

impl Validate for SearchOptions {
    fn validate(&self, config: &ServiceConfig) -> Result<()> {
        if let Some(steps) = self.steps {
            if steps == 0 {
                return Err(Error::invalid_option("steps", "must be at least 1"));
            }
            if steps > config.max_steps {
                return Err(Error::invalid_option(
                    "steps",
                    format!("must not exceed {}", config.max_steps),
                ));
            }
        }

        if let Some(lanes) = self.lanes {
            if lanes > config.max_lanes {
                return Err(Error::invalid_option(
                    "lanes",
                    format!("must not exceed {}", config.max_lanes),
                ));
            }
        }

        if let Some(spacing) = self.lane_spacing_km {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(Error::invalid_option(
                    "laneSpacingKm",
                    "must be a positive number",
                ));
            }
        }

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            obstacle
                .center
                .validate(&format!("obstacles[{index}].center"))?;
            if !obstacle.radius_km.is_finite() || obstacle.radius_km < 0.0 {
                return Err(Error::invalid_option(
                    &format!("obstacles[{index}].radiusKm"),
                    "must be a non-negative number",
                ));
            }
        }

        Ok(())
    }
}

impl Validate for PathQuery {
    fn validate(&self, config: &ServiceConfig) -> Result<()> {
        self.start.validate("start")?;
        self.end.validate("end")?;
        self.algorithm.parse::<PathAlgorithm>()?;
        self.options.validate(config)
    }
}

impl Validate for PathRequest {
    fn validate(&self, config: &ServiceConfig) -> Result<()> {
        require_owner(&self.owner_id)?;
        self.query.validate(config)
    }
}

/// Reject blank owner ids.
pub fn require_owner(owner_id: &str) -> Result<()> {
    if owner_id.trim().is_empty() {
        return Err(Error::MissingOwner);
    }
    Ok(())
}

/// Check a 1-based page request and return the repository offset.
pub fn page_offset(page: usize, page_size: usize, config: &ServiceConfig) -> Result<usize> {
    if page == 0 {
        return Err(Error::InvalidPagination {
            reason: "page must be at least 1".to_string(),
        });
    }
    if page_size == 0 {
        return Err(Error::InvalidPagination {
            reason: "page size must be at least 1".to_string(),
        });
    }
    if page_size > config.max_page_size {
        return Err(Error::InvalidPagination {
            reason: format!("page size must not exceed {}", config.max_page_size),
        });
    }
    Ok((page - 1).saturating_mul(page_size))
}
