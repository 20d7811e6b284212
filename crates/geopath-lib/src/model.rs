//! Request, result and record types exchanged with callers and collaborators.
//!
//! Everything here serializes with camelCase field names so JSON documents
//! written by the file repository and the CLI share one wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::corridor::Obstacle;
use crate::geo::Point;
use crate::strategy::PathAlgorithm;

/// Tunables passed through to the chosen strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Number of segments in the returned path. Defaults per algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    /// Lanes on each side of the course line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lanes: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_spacing_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub obstacles: Vec<Obstacle>,
}

impl SearchOptions {
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = Some(lanes);
        self
    }

    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }
}

/// One path computation as submitted by a caller, without the owner.
///
/// `algorithm` is kept as the raw tag so an unknown value fails validation
/// for this query alone instead of failing to decode a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    pub start: Point,
    pub end: Point,
    pub algorithm: String,
    #[serde(default)]
    pub options: SearchOptions,
    #[serde(default)]
    pub is_public: bool,
}

impl PathQuery {
    pub fn new(start: Point, end: Point, algorithm: impl Into<String>) -> Self {
        Self {
            start,
            end,
            algorithm: algorithm.into(),
            options: SearchOptions::default(),
            is_public: false,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn public(mut self) -> Self {
        self.is_public = true;
        self
    }

    /// Attach an owner to produce a full request.
    pub fn owned_by(self, owner_id: impl Into<String>) -> PathRequest {
        PathRequest {
            query: self,
            owner_id: owner_id.into(),
        }
    }
}

/// A query scoped to the owner that will own the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    #[serde(flatten)]
    pub query: PathQuery,
    pub owner_id: String,
}

/// Execution details attached to every result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetadata {
    /// Display name of the algorithm (`A*`, `Dijkstra`, `BFS`).
    pub algorithm: String,
    pub nodes_explored: usize,
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guaranteed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_type: Option<String>,
    #[serde(default)]
    pub steps: usize,
    #[serde(default)]
    pub lanes: usize,
    /// Populated only on failed batch items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// Outcome of a path computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    /// Repository id; empty for failed batch items.
    pub id: String,
    pub path: Vec<Point>,
    /// Total path length in kilometres.
    pub distance: f64,
    pub duration_ms: u64,
    /// Algorithm tag as requested (`astar`, `dijkstra`, `bfs`).
    pub algorithm: String,
    pub metadata: PathMetadata,
}

impl PathResult {
    /// Placeholder for a batch item that failed.
    pub fn failed(algorithm: impl Into<String>, error: &crate::Error) -> Self {
        Self {
            id: String::new(),
            path: Vec::new(),
            distance: 0.0,
            duration_ms: 0,
            algorithm: algorithm.into(),
            metadata: PathMetadata {
                error: Some(error.to_string()),
                error_kind: Some(error.kind().as_str().to_string()),
                ..PathMetadata::default()
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        self.metadata.error.is_some()
    }

    /// Number of segments in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// A record as handed to the repository, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPathRecord {
    pub owner_id: String,
    pub start: Point,
    pub end: Point,
    pub path: Vec<Point>,
    pub distance: f64,
    pub duration_ms: u64,
    pub algorithm: PathAlgorithm,
    pub metadata: PathMetadata,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
}

impl NewPathRecord {
    /// Attach the repository-assigned id.
    pub fn with_id(self, id: impl Into<String>) -> PathRecord {
        PathRecord {
            id: id.into(),
            owner_id: self.owner_id,
            start: self.start,
            end: self.end,
            path: self.path,
            distance: self.distance,
            duration_ms: self.duration_ms,
            algorithm: self.algorithm,
            metadata: self.metadata,
            created_at: self.created_at,
            is_public: self.is_public,
        }
    }
}

/// Persisted path computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRecord {
    pub id: String,
    pub owner_id: String,
    pub start: Point,
    pub end: Point,
    pub path: Vec<Point>,
    pub distance: f64,
    pub duration_ms: u64,
    pub algorithm: PathAlgorithm,
    pub metadata: PathMetadata,
    pub created_at: DateTime<Utc>,
    pub is_public: bool,
}

impl PathRecord {
    /// Whether `owner_id` may read this record.
    pub fn readable_by(&self, owner_id: &str) -> bool {
        self.is_public || self.owner_id == owner_id
    }

    pub fn to_result(&self) -> PathResult {
        PathResult {
            id: self.id.clone(),
            path: self.path.clone(),
            distance: self.distance,
            duration_ms: self.duration_ms,
            algorithm: self.algorithm.to_string(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Slice of an owner's records as returned by a repository query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub records: Vec<PathRecord>,
    pub total_count: usize,
}

/// One page of an owner's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub records: Vec<PathRecord>,
    /// Number of records the owner has in total.
    pub total: usize,
}

/// Usage event emitted after each successful computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub owner_id: String,
    pub algorithm: PathAlgorithm,
    pub duration_ms: u64,
    pub distance: f64,
    pub timestamp: DateTime<Utc>,
}
