use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::corridor::{Corridor, NodeId};

/// Node sequence found by a search kernel plus how much of the graph it
/// touched to find it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub nodes: Vec<NodeId>,
    /// Distinct nodes reached (BFS) or settled (Dijkstra, A*), including
    /// both endpoints.
    pub explored: usize,
}

/// Run breadth-first search from the corridor start to its goal.
///
/// Returns the first-discovered path with the fewest hops.
pub fn find_route_bfs(corridor: &Corridor) -> Option<SearchOutcome> {
    let start = corridor.start();
    let goal = corridor.goal();
    if corridor.is_blocked(start) || corridor.is_blocked(goal) {
        return None;
    }

    let mut parents: Vec<Option<NodeId>> = vec![None; corridor.len()];
    let mut discovered = vec![false; corridor.len()];
    let mut explored = 1usize;
    let mut queue = VecDeque::new();

    discovered[start] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for edge in corridor.neighbours(current) {
            let next = edge.target;
            if discovered[next] {
                continue;
            }

            discovered[next] = true;
            parents[next] = Some(current);
            explored += 1;
            if next == goal {
                return Some(SearchOutcome {
                    nodes: reconstruct_path(&parents, start, goal),
                    explored,
                });
            }
            queue.push_back(next);
        }
    }

    None
}

/// Run Dijkstra's algorithm to find the path with the lowest cumulative
/// edge distance.
pub fn find_route_dijkstra(corridor: &Corridor) -> Option<SearchOutcome> {
    search_weighted(corridor, |_| 0.0)
}

/// Run A* guided by the great-circle distance to the goal.
pub fn find_route_a_star(corridor: &Corridor) -> Option<SearchOutcome> {
    search_weighted(corridor, |node| corridor.remaining_distance(node))
}

/// Shared best-first loop. With a zero heuristic this is Dijkstra.
fn search_weighted<H>(corridor: &Corridor, heuristic: H) -> Option<SearchOutcome>
where
    H: Fn(NodeId) -> f64,
{
    let start = corridor.start();
    let goal = corridor.goal();
    if corridor.is_blocked(start) || corridor.is_blocked(goal) {
        return None;
    }

    let mut g_score = vec![f64::INFINITY; corridor.len()];
    let mut parents: Vec<Option<NodeId>> = vec![None; corridor.len()];
    let mut settled = vec![false; corridor.len()];
    let mut explored = 0usize;
    let mut queue = BinaryHeap::new();

    g_score[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        if settled[entry.node] || entry.cost.0 > g_score[entry.node] {
            continue;
        }
        settled[entry.node] = true;
        explored += 1;

        if entry.node == goal {
            return Some(SearchOutcome {
                nodes: reconstruct_path(&parents, start, goal),
                explored,
            });
        }

        for edge in corridor.neighbours(entry.node) {
            let next = edge.target;
            if settled[next] {
                continue;
            }

            let tentative = entry.cost.0 + edge.distance;
            if tentative < g_score[next] {
                g_score[next] = tentative;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, tentative, heuristic(next)));
            }
        }
    }

    None
}

fn reconstruct_path(parents: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents[node];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the smallest estimate; ties go to the
        // lower cumulative cost, then the lower node id.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.cost.cmp(&self.cost))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corridor::{CorridorLayout, Obstacle};
    use crate::geo::{destination, haversine_distance, initial_bearing, Point};

    const A: Point = Point::new(48.8566, 2.3522);
    const B: Point = Point::new(50.8503, 4.3517);

    fn corridor(steps: usize, lanes: usize, obstacles: Vec<Obstacle>) -> Corridor {
        Corridor::build(
            A,
            B,
            &CorridorLayout {
                steps,
                lanes,
                lane_spacing_km: None,
                obstacles,
            },
        )
    }

    fn path_length(corridor: &Corridor, nodes: &[NodeId]) -> f64 {
        nodes
            .windows(2)
            .map(|pair| haversine_distance(corridor.point(pair[0]), corridor.point(pair[1])))
            .sum()
    }

    fn along_course(fraction: f64) -> Point {
        destination(A, initial_bearing(A, B), haversine_distance(A, B) * fraction)
    }

    #[test]
    fn every_kernel_walks_the_course_line_without_obstacles() {
        let corridor = corridor(8, 2, Vec::new());
        for outcome in [
            find_route_bfs(&corridor),
            find_route_dijkstra(&corridor),
            find_route_a_star(&corridor),
        ] {
            let outcome = outcome.expect("route exists");
            assert_eq!(outcome.nodes.len(), 9);
            assert!(outcome
                .nodes
                .iter()
                .all(|&id| corridor.node(id).lane == 0));
        }
    }

    #[test]
    fn explored_count_covers_the_path() {
        let corridor = corridor(12, 3, Vec::new());
        for outcome in [
            find_route_bfs(&corridor),
            find_route_dijkstra(&corridor),
            find_route_a_star(&corridor),
        ] {
            let outcome = outcome.expect("route exists");
            assert!(outcome.explored >= outcome.nodes.len());
        }
    }

    #[test]
    fn a_star_explores_no_more_than_dijkstra() {
        let corridor = corridor(15, 3, Vec::new());
        let dijkstra = find_route_dijkstra(&corridor).unwrap();
        let a_star = find_route_a_star(&corridor).unwrap();
        assert!(a_star.explored <= dijkstra.explored);
    }

    #[test]
    fn weighted_kernels_detour_around_an_obstacle() {
        let block = Obstacle::new(along_course(0.5), 1.0);
        let corridor = corridor(10, 2, vec![block]);
        let dijkstra = find_route_dijkstra(&corridor).expect("detour exists");
        let a_star = find_route_a_star(&corridor).expect("detour exists");

        assert_eq!(dijkstra.nodes.len(), 11);
        assert!(dijkstra.nodes.iter().any(|&id| corridor.node(id).lane != 0));
        let optimal = path_length(&corridor, &dijkstra.nodes);
        assert!((path_length(&corridor, &a_star.nodes) - optimal).abs() < 1e-9);
        assert!(optimal > haversine_distance(A, B));
    }

    #[test]
    fn dijkstra_is_never_longer_than_bfs() {
        let block = Obstacle::new(along_course(0.3), 5.0);
        let corridor = corridor(10, 2, vec![block]);
        let bfs = find_route_bfs(&corridor).expect("route exists");
        let dijkstra = find_route_dijkstra(&corridor).expect("route exists");
        assert_eq!(bfs.nodes.len(), dijkstra.nodes.len());
        assert!(path_length(&corridor, &dijkstra.nodes) <= path_length(&corridor, &bfs.nodes) + 1e-9);
    }

    #[test]
    fn wall_of_obstacles_leaves_no_route() {
        // Wide enough to cover every lane of the middle column.
        let wall = Obstacle::new(along_course(0.5), 60.0);
        let corridor = corridor(10, 2, vec![wall]);
        assert!(find_route_bfs(&corridor).is_none());
        assert!(find_route_dijkstra(&corridor).is_none());
        assert!(find_route_a_star(&corridor).is_none());
    }

    #[test]
    fn blocked_goal_leaves_no_route() {
        let corridor = corridor(6, 2, vec![Obstacle::new(B, 0.5)]);
        assert!(find_route_bfs(&corridor).is_none());
        assert!(find_route_a_star(&corridor).is_none());
    }

    #[test]
    fn searches_are_deterministic() {
        let block = Obstacle::new(along_course(0.4), 3.0);
        let corridor = corridor(10, 3, vec![block]);
        assert_eq!(find_route_bfs(&corridor), find_route_bfs(&corridor));
        assert_eq!(find_route_dijkstra(&corridor), find_route_dijkstra(&corridor));
        assert_eq!(find_route_a_star(&corridor), find_route_a_star(&corridor));
    }

    #[test]
    fn queue_entry_prefers_lower_cost_on_equal_estimate() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(1, 5.0, 5.0));
        heap.push(QueueEntry::new(2, 3.0, 7.0));
        assert_eq!(heap.pop().unwrap().node, 2);
    }
}
