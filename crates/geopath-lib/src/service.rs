//! Path orchestration.
//!
//! [`PathService`] validates requests, runs the selected strategy, persists
//! the outcome through a [`PathRepository`] and reports usage to an
//! [`AnalyticsSink`]. It holds no mutable state of its own, so one instance
//! can serve concurrent requests.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use crate::analytics::AnalyticsSink;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::model::{
    AnalyticsEvent, HistoryPage, NewPathRecord, PathQuery, PathRecord, PathRequest, PathResult,
};
use crate::repository::PathRepository;
use crate::strategy::{select_strategy, PathAlgorithm};
use crate::validate::{page_offset, require_owner, Validate};

/// Lifecycle of a single `find` request, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Validating,
    Executing,
    Persisting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validating => "validating",
            Stage::Executing => "executing",
            Stage::Persisting => "persisting",
        })
    }
}

/// Orchestrates path computations and access to stored results.
#[derive(Clone)]
pub struct PathService {
    repository: Arc<dyn PathRepository>,
    analytics: Arc<dyn AnalyticsSink>,
    config: ServiceConfig,
}

impl fmt::Debug for PathService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PathService {
    /// Create a service with default limits.
    pub fn new(repository: Arc<dyn PathRepository>, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            repository,
            analytics,
            config: ServiceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Compute, persist and return a path.
    ///
    /// Analytics are dispatched in the background after the record is
    /// stored; their failure never reaches the caller.
    pub async fn find(&self, request: &PathRequest) -> Result<PathResult> {
        let mut stage = Stage::Validating;
        let result = self.run_find(request, &mut stage).await;
        match &result {
            Ok(found) => debug!(
                owner_id = %request.owner_id,
                id = %found.id,
                state = "completed",
                "path request finished"
            ),
            Err(error) => debug!(
                owner_id = %request.owner_id,
                failed_during = %stage,
                error = %error,
                state = "failed",
                "path request finished"
            ),
        }
        result
    }

    async fn run_find(&self, request: &PathRequest, stage: &mut Stage) -> Result<PathResult> {
        let query = &request.query;
        request.validate(&self.config)?;
        let algorithm: PathAlgorithm = query.algorithm.parse()?;

        *stage = Stage::Executing;
        debug!(owner_id = %request.owner_id, %algorithm, state = %stage, "path request");
        let strategy = select_strategy(algorithm);
        let started = Instant::now();
        let outcome = strategy.find_path(query.start, query.end, &query.options)?;
        let duration_ms = started.elapsed().as_millis() as u64;

        *stage = Stage::Persisting;
        debug!(owner_id = %request.owner_id, %algorithm, state = %stage, "path request");
        let created_at = Utc::now();
        let record = NewPathRecord {
            owner_id: request.owner_id.clone(),
            start: query.start,
            end: query.end,
            path: outcome.path.clone(),
            distance: outcome.distance,
            duration_ms,
            algorithm,
            metadata: outcome.metadata.clone(),
            created_at,
            is_public: query.is_public,
        };
        let id = self.repository.create(record).await?;

        self.emit(AnalyticsEvent {
            owner_id: request.owner_id.clone(),
            algorithm,
            duration_ms,
            distance: outcome.distance,
            timestamp: created_at,
        });

        Ok(PathResult {
            id,
            path: outcome.path,
            distance: outcome.distance,
            duration_ms,
            algorithm: query.algorithm.clone(),
            metadata: outcome.metadata,
        })
    }

    /// Run several queries for one owner, in order.
    ///
    /// Item failures become placeholder results carrying the error in their
    /// metadata; only an oversized batch or a missing owner fails the call.
    pub async fn batch_find(&self, queries: &[PathQuery], owner_id: &str) -> Result<Vec<PathResult>> {
        if queries.len() > self.config.max_batch_size {
            return Err(Error::BatchTooLarge {
                size: queries.len(),
                limit: self.config.max_batch_size,
            });
        }
        require_owner(owner_id)?;

        let mut results = Vec::with_capacity(queries.len());
        for (index, query) in queries.iter().enumerate() {
            let request = query.clone().owned_by(owner_id);
            match self.find(&request).await {
                Ok(result) => results.push(result),
                Err(error) => {
                    warn!(index, owner_id, error = %error, "batch item failed");
                    results.push(PathResult::failed(query.algorithm.clone(), &error));
                }
            }
        }

        let failures = results.iter().filter(|r| r.is_failure()).count();
        debug!(owner_id, size = results.len(), failures, "batch finished");
        Ok(results)
    }

    /// One page of the owner's records, newest first. `page` is 1-based.
    pub async fn history(&self, owner_id: &str, page: usize, page_size: usize) -> Result<HistoryPage> {
        require_owner(owner_id)?;
        let offset = page_offset(page, page_size, &self.config)?;
        let slice = self.repository.query(owner_id, page_size, offset).await?;
        Ok(HistoryPage {
            records: slice.records,
            total: slice.total_count,
        })
    }

    /// Fetch a record the caller owns, or any public record.
    pub async fn get(&self, id: &str, owner_id: &str) -> Result<PathRecord> {
        let record = self.load(id).await?;
        if !record.readable_by(owner_id) {
            debug!(id, owner_id, "read denied");
            return Err(Error::AccessDenied { id: id.to_string() });
        }
        Ok(record)
    }

    /// Delete a record. Only the owner may delete, public or not.
    pub async fn delete(&self, id: &str, owner_id: &str) -> Result<()> {
        let record = self.load(id).await?;
        if record.owner_id != owner_id {
            debug!(id, owner_id, "delete denied");
            return Err(Error::AccessDenied { id: id.to_string() });
        }
        self.repository.delete(id).await?;
        debug!(id, owner_id, "path record deleted");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<PathRecord> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound { id: id.to_string() })
    }

    fn emit(&self, event: AnalyticsEvent) {
        let sink = Arc::clone(&self.analytics);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(error) = sink.record(event).await {
                        warn!(error = %error, "analytics event dropped");
                    }
                });
            }
            Err(_) => debug!("no async runtime; analytics event dropped"),
        }
    }
}
