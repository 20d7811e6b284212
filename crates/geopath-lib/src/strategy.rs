//! Path-finding strategies.
//!
//! Each algorithm is encapsulated in its own strategy struct implementing
//! [`PathStrategy`]; [`select_strategy`] is the only place that maps a
//! [`PathAlgorithm`] to an implementation. Adding an algorithm means adding
//! a variant and a strategy, never branching on tags in callers.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::corridor::{Corridor, CorridorLayout};
use crate::error::{Error, Result};
use crate::geo::{haversine_distance, Point};
use crate::model::{PathMetadata, SearchOptions};
use crate::search::{find_route_a_star, find_route_bfs, find_route_dijkstra, SearchOutcome};

/// Lanes on each side of the course line when the caller does not say.
pub const DEFAULT_LANES: usize = 2;

/// Supported path-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathAlgorithm {
    /// A* search (heuristic guided).
    #[default]
    AStar,
    /// Dijkstra's algorithm (uniform cost).
    Dijkstra,
    /// Breadth-first search (fewest hops).
    Bfs,
}

impl PathAlgorithm {
    pub const ALL: [PathAlgorithm; 3] = [
        PathAlgorithm::AStar,
        PathAlgorithm::Dijkstra,
        PathAlgorithm::Bfs,
    ];

    /// Wire identifier (`astar`, `dijkstra`, `bfs`).
    pub fn id(self) -> &'static str {
        match self {
            PathAlgorithm::AStar => "astar",
            PathAlgorithm::Dijkstra => "dijkstra",
            PathAlgorithm::Bfs => "bfs",
        }
    }

    /// Human-readable name reported in result metadata.
    pub fn display_name(self) -> &'static str {
        match self {
            PathAlgorithm::AStar => "A*",
            PathAlgorithm::Dijkstra => "Dijkstra",
            PathAlgorithm::Bfs => "BFS",
        }
    }
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PathAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PathAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == s)
            .ok_or_else(|| Error::UnknownAlgorithm {
                name: s.to_string(),
            })
    }
}

/// Path, length and metadata produced by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub path: Vec<Point>,
    /// Kilometres along the path.
    pub distance: f64,
    pub metadata: PathMetadata,
}

/// Trait for path-finding strategies.
///
/// Implementations are stateless and deterministic: identical inputs always
/// yield identical paths.
pub trait PathStrategy: Send + Sync {
    /// The algorithm identifier for this strategy.
    fn algorithm(&self) -> PathAlgorithm;

    /// Segment count used when `options.steps` is absent.
    fn default_steps(&self) -> usize;

    /// Find a path from `start` to `end`.
    ///
    /// Fails with [`Error::PathNotFound`] when obstacles disconnect the
    /// endpoints.
    fn find_path(&self, start: Point, end: Point, options: &SearchOptions)
        -> Result<StrategyOutcome>;
}

/// A* over the corridor with a haversine-to-goal heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarStrategy;

impl PathStrategy for AStarStrategy {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::AStar
    }

    fn default_steps(&self) -> usize {
        10
    }

    fn find_path(
        &self,
        start: Point,
        end: Point,
        options: &SearchOptions,
    ) -> Result<StrategyOutcome> {
        run(self, start, end, options, find_route_a_star, |metadata| {
            metadata.heuristic = Some("haversine".to_string());
        })
    }
}

/// Uniform-cost search; always returns a globally shortest corridor path.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraStrategy;

impl PathStrategy for DijkstraStrategy {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Dijkstra
    }

    fn default_steps(&self) -> usize {
        15
    }

    fn find_path(
        &self,
        start: Point,
        end: Point,
        options: &SearchOptions,
    ) -> Result<StrategyOutcome> {
        run(self, start, end, options, find_route_dijkstra, |metadata| {
            metadata.guaranteed = Some("optimal".to_string());
        })
    }
}

/// Breadth-first search planner.
///
/// BFS minimises hop count and ignores edge lengths, so with obstacles the
/// result can be longer than the Dijkstra path.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsStrategy;

impl PathStrategy for BfsStrategy {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::Bfs
    }

    fn default_steps(&self) -> usize {
        8
    }

    fn find_path(
        &self,
        start: Point,
        end: Point,
        options: &SearchOptions,
    ) -> Result<StrategyOutcome> {
        run(self, start, end, options, find_route_bfs, |metadata| {
            metadata.path_type = Some("shortest_hops".to_string());
        })
    }
}

/// Select the strategy for an algorithm.
pub fn select_strategy(algorithm: PathAlgorithm) -> Box<dyn PathStrategy> {
    match algorithm {
        PathAlgorithm::AStar => Box::new(AStarStrategy),
        PathAlgorithm::Dijkstra => Box::new(DijkstraStrategy),
        PathAlgorithm::Bfs => Box::new(BfsStrategy),
    }
}

fn run<S, K, M>(
    strategy: &S,
    start: Point,
    end: Point,
    options: &SearchOptions,
    kernel: K,
    mark: M,
) -> Result<StrategyOutcome>
where
    S: PathStrategy + ?Sized,
    K: Fn(&Corridor) -> Option<SearchOutcome>,
    M: FnOnce(&mut PathMetadata),
{
    let started = Instant::now();
    let algorithm = strategy.algorithm();
    let layout = CorridorLayout {
        steps: options.steps.unwrap_or_else(|| strategy.default_steps()),
        lanes: options.lanes.unwrap_or(DEFAULT_LANES),
        lane_spacing_km: options.lane_spacing_km,
        obstacles: options.obstacles.clone(),
    };
    let corridor = Corridor::build(start, end, &layout);

    let outcome = kernel(&corridor).ok_or_else(|| Error::PathNotFound {
        start,
        end,
        algorithm: algorithm.display_name().to_string(),
    })?;

    let path: Vec<Point> = outcome.nodes.iter().map(|&id| corridor.point(id)).collect();
    let distance = path
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum();

    let mut metadata = PathMetadata {
        algorithm: algorithm.display_name().to_string(),
        nodes_explored: outcome.explored,
        execution_time_ms: started.elapsed().as_millis() as u64,
        steps: corridor.steps(),
        lanes: corridor.lanes(),
        ..PathMetadata::default()
    };
    mark(&mut metadata);

    tracing::trace!(
        algorithm = %algorithm,
        nodes = corridor.len(),
        explored = outcome.explored,
        "corridor search finished"
    );

    Ok(StrategyOutcome {
        path,
        distance,
        metadata,
    })
}
