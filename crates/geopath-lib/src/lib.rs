//! geopath library entry points.
//!
//! This crate provides great-circle geodesy, a corridor graph laid along the
//! course between two points, A*/Dijkstra/BFS search strategies over that
//! graph, and [`PathService`], which validates requests, runs a strategy,
//! persists the result and reports usage. Consumers (the CLI, embedding
//! services) should go through the service instead of wiring strategies and
//! repositories by hand.
//!

#![deny(warnings)]

pub mod analytics;
pub mod config;
pub mod corridor;
pub mod error;
pub mod geo;
pub mod model;
pub mod repository;
pub mod search;
pub mod service;
pub mod strategy;
pub mod validate;

pub use analytics::{AnalyticsSink, MemoryAnalyticsSink, NoopAnalyticsSink, TracingAnalyticsSink};
pub use config::ServiceConfig;
pub use corridor::{Corridor, CorridorLayout, Obstacle};
pub use error::{Error, ErrorKind, Result};
pub use geo::{haversine_distance, Point, EARTH_RADIUS_KM};
pub use model::{
    AnalyticsEvent, HistoryPage, NewPathRecord, PathMetadata, PathQuery, PathRecord, PathRequest,
    PathResult, RecordPage, SearchOptions,
};
pub use repository::{InMemoryPathRepository, JsonFilePathRepository, PathRepository};
pub use service::PathService;
pub use strategy::{
    select_strategy, AStarStrategy, BfsStrategy, DijkstraStrategy, PathAlgorithm, PathStrategy,
    StrategyOutcome,
};
