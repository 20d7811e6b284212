//! Best-effort analytics port and adapters.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::model::AnalyticsEvent;

/// Receiver for usage events.
///
/// The service calls this from a detached task and only logs failures, so
/// implementations may be slow or fallible without affecting callers.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn record(&self, event: AnalyticsEvent) -> Result<()>;
}

/// Emits each event as a structured `tracing` record on the
/// `geopath::analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalyticsSink;

#[async_trait]
impl AnalyticsSink for TracingAnalyticsSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        tracing::info!(
            target: "geopath::analytics",
            owner_id = %event.owner_id,
            algorithm = %event.algorithm,
            duration_ms = event.duration_ms,
            distance_km = event.distance,
            timestamp = %event.timestamp.to_rfc3339(),
            "path computed"
        );
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalyticsSink;

#[async_trait]
impl AnalyticsSink for NoopAnalyticsSink {
    async fn record(&self, _event: AnalyticsEvent) -> Result<()> {
        Ok(())
    }
}

/// Keeps events in memory; useful for tests and for embedding callers that
/// forward events in bulk.
#[derive(Debug, Default)]
pub struct MemoryAnalyticsSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AnalyticsSink for MemoryAnalyticsSink {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        let mut events = self.events.lock().map_err(|_| Error::Analytics {
            message: "event buffer poisoned".to_string(),
        })?;
        events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::PathAlgorithm;
    use chrono::Utc;

    fn event() -> AnalyticsEvent {
        AnalyticsEvent {
            owner_id: "alice".into(),
            algorithm: PathAlgorithm::Dijkstra,
            duration_ms: 3,
            distance: 12.5,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn memory_sink_collects_events() {
        let sink = MemoryAnalyticsSink::new();
        sink.record(event()).await.unwrap();
        sink.record(event()).await.unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events()[0].owner_id, "alice");
    }

    #[tokio::test]
    async fn tracing_and_noop_sinks_accept_events() {
        TracingAnalyticsSink.record(event()).await.unwrap();
        NoopAnalyticsSink.record(event()).await.unwrap();
    }
}
