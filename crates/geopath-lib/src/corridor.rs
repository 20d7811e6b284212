//! Corridor graph searched by every strategy.
//!
//! A corridor is a lattice laid over the great circle between two points.
//! Column `i` sits at fraction `i / steps` along the course; each column
//! carries a handful of lanes offset sideways from the course line. Edges
//! only ever advance one column, so every start-to-goal path visits exactly
//! `steps + 1` nodes and the strategies differ in *which* lanes they pick
//! and how much of the lattice they explore on the way.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::{destination, haversine_distance, initial_bearing, Point};

/// Identifier of a node inside a [`Corridor`].
pub type NodeId = usize;

/// Circular no-go zone. Nodes inside the disc are removed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Obstacle {
    pub center: Point,
    pub radius_km: f64,
}

impl Obstacle {
    pub fn new(center: Point, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Whether `point` lies inside or on the boundary of the obstacle.
    pub fn contains(&self, point: Point) -> bool {
        haversine_distance(self.center, point) <= self.radius_km
    }
}

/// Shape parameters for building a corridor.
#[derive(Debug, Clone, Default)]
pub struct CorridorLayout {
    /// Number of edges between start and goal. Values below 1 are treated as 1.
    pub steps: usize,
    /// Maximum number of lanes on each side of the course line.
    pub lanes: usize,
    /// Lateral distance between adjacent lanes. Defaults to the column spacing.
    pub lane_spacing_km: Option<f64>,
    pub obstacles: Vec<Obstacle>,
}

/// Directed edge to the next column.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub target: NodeId,
    pub distance: f64,
}

/// Lattice position and coordinates of a corridor node.
#[derive(Debug, Clone, Copy)]
pub struct CorridorNode {
    pub column: usize,
    /// Signed lane index; positive lanes lie to the right of the course.
    pub lane: i32,
    pub point: Point,
    pub blocked: bool,
}

/// Layered graph between a start and a goal point.
#[derive(Debug, Clone)]
pub struct Corridor {
    nodes: Vec<CorridorNode>,
    adjacency: Vec<Vec<Edge>>,
    goal: NodeId,
    steps: usize,
    lanes: usize,
}

impl Corridor {
    /// Build the corridor between `start` and `goal`.
    ///
    /// Node ids are assigned column by column and, within a column, from the
    /// course line outwards (`0, -1, 1, -2, 2, ...`), so lower ids are always
    /// closer to the direct course.
    pub fn build(start: Point, goal: Point, layout: &CorridorLayout) -> Self {
        let steps = layout.steps.max(1);
        let direct = haversine_distance(start, goal);
        let spacing = if direct > 0.0 {
            layout
                .lane_spacing_km
                .unwrap_or(direct / steps as f64)
        } else {
            0.0
        };
        // Zero spacing would stack every lane on the course line.
        let lanes = if spacing > 0.0 { layout.lanes } else { 0 };
        let course = initial_bearing(start, goal);

        let mut nodes = Vec::new();
        let mut index: HashMap<(usize, i32), NodeId> = HashMap::new();

        for column in 0..=steps {
            let centre = if column == 0 || direct == 0.0 {
                start
            } else if column == steps {
                goal
            } else {
                destination(start, course, direct * column as f64 / steps as f64)
            };

            let width = lanes.min(column).min(steps - column) as i32;
            let across = if width > 0 {
                (initial_bearing(centre, goal) + 90.0) % 360.0
            } else {
                0.0
            };

            for lane in lane_order(width) {
                let point = if lane == 0 {
                    centre
                } else {
                    destination(centre, across, lane as f64 * spacing)
                };
                let blocked = layout.obstacles.iter().any(|o| o.contains(point));
                index.insert((column, lane), nodes.len());
                nodes.push(CorridorNode {
                    column,
                    lane,
                    point,
                    blocked,
                });
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for (id, node) in nodes.iter().enumerate() {
            if node.column == steps {
                continue;
            }
            for shift in [0, -1, 1] {
                let Some(&target) = index.get(&(node.column + 1, node.lane + shift)) else {
                    continue;
                };
                if nodes[target].blocked {
                    continue;
                }
                adjacency[id].push(Edge {
                    target,
                    distance: haversine_distance(node.point, nodes[target].point),
                });
            }
        }

        let goal_id = index[&(steps, 0)];

        tracing::trace!(
            nodes = nodes.len(),
            steps,
            lanes,
            spacing_km = spacing,
            "built corridor"
        );

        Self {
            nodes,
            adjacency,
            goal: goal_id,
            steps,
            lanes,
        }
    }

    /// The start node is always the first node.
    pub fn start(&self) -> NodeId {
        0
    }

    pub fn goal(&self) -> NodeId {
        self.goal
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Effective lane count after collapsing degenerate corridors.
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &CorridorNode {
        &self.nodes[id]
    }

    pub fn point(&self, id: NodeId) -> Point {
        self.nodes[id].point
    }

    pub fn is_blocked(&self, id: NodeId) -> bool {
        self.nodes[id].blocked
    }

    /// Outgoing edges of `id`, course-line edge first.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Straight-line distance from `id` to the goal, an admissible estimate
    /// of the remaining cost.
    pub fn remaining_distance(&self, id: NodeId) -> f64 {
        haversine_distance(self.nodes[id].point, self.nodes[self.goal].point)
    }
}

fn lane_order(width: i32) -> impl Iterator<Item = i32> {
    std::iter::once(0).chain((1..=width).flat_map(|k| [-k, k]))
}
