#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use geopath_lib::{
    AnalyticsEvent, AnalyticsSink, Error, InMemoryPathRepository, MemoryAnalyticsSink,
    PathQuery, PathService, Point, Result,
};

pub const NYC: Point = Point::new(40.7128, -74.0060);
pub const TIMES_SQUARE: Point = Point::new(40.7589, -73.9851);
pub const LONDON: Point = Point::new(51.5074, -0.1278);
pub const PARIS: Point = Point::new(48.8566, 2.3522);

/// Service over fresh in-memory collaborators.
pub fn service() -> (PathService, Arc<InMemoryPathRepository>, Arc<MemoryAnalyticsSink>) {
    let repository = Arc::new(InMemoryPathRepository::new());
    let analytics = Arc::new(MemoryAnalyticsSink::new());
    let service = PathService::new(repository.clone(), analytics.clone());
    (service, repository, analytics)
}

pub fn query(algorithm: &str) -> PathQuery {
    PathQuery::new(NYC, TIMES_SQUARE, algorithm)
}

/// Wait until the sink holds `count` events or a second elapses.
pub async fn wait_for_events(sink: &MemoryAnalyticsSink, count: usize) -> Vec<AnalyticsEvent> {
    let _ = tokio::time::timeout(Duration::from_secs(1), async {
        while sink.len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    sink.events()
}

/// Sink that rejects every event.
pub struct RejectingSink;

#[async_trait::async_trait]
impl AnalyticsSink for RejectingSink {
    async fn record(&self, _event: AnalyticsEvent) -> Result<()> {
        Err(Error::Analytics {
            message: "collector unavailable".into(),
        })
    }
}
