mod common;

use common::{LONDON, NYC, PARIS, TIMES_SQUARE};
use geopath_lib::{
    haversine_distance, select_strategy, Error, Obstacle, PathAlgorithm, Point, SearchOptions,
};

#[test]
fn haversine_is_zero_for_identical_points() {
    for point in [NYC, LONDON, Point::new(-89.9, 179.9), Point::new(0.0, 0.0)] {
        assert_eq!(haversine_distance(point, point), 0.0);
    }
}

#[test]
fn haversine_is_symmetric() {
    let pairs = [(NYC, LONDON), (PARIS, TIMES_SQUARE), (Point::new(-33.86, 151.21), LONDON)];
    for (a, b) in pairs {
        let forward = haversine_distance(a, b);
        let backward = haversine_distance(b, a);
        assert!((forward - backward).abs() < 1e-9);
    }
}

#[test]
fn london_to_paris_is_about_344_km() {
    let distance = haversine_distance(LONDON, PARIS);
    assert!((distance - 343.5).abs() < 1.0, "{distance}");
}

#[test]
fn strategies_are_deterministic() {
    let options = SearchOptions::default()
        .with_lanes(3)
        .with_obstacle(Obstacle::new(Point::new(50.2, 1.1), 25.0));
    for algorithm in PathAlgorithm::ALL {
        let strategy = select_strategy(algorithm);
        let first = strategy.find_path(LONDON, PARIS, &options).unwrap();
        let second = strategy.find_path(LONDON, PARIS, &options).unwrap();
        assert_eq!(first.path, second.path, "{algorithm}");
        assert_eq!(first.distance, second.distance, "{algorithm}");
    }
}

#[test]
fn weighted_strategies_agree_on_optimal_distance() {
    let options = SearchOptions::default()
        .with_steps(12)
        .with_lanes(3)
        .with_obstacle(Obstacle::new(Point::new(50.2, 1.1), 25.0));
    let dijkstra = select_strategy(PathAlgorithm::Dijkstra)
        .find_path(LONDON, PARIS, &options)
        .unwrap();
    let a_star = select_strategy(PathAlgorithm::AStar)
        .find_path(LONDON, PARIS, &options)
        .unwrap();
    let bfs = select_strategy(PathAlgorithm::Bfs)
        .find_path(LONDON, PARIS, &options)
        .unwrap();

    assert!((dijkstra.distance - a_star.distance).abs() < 1e-9);
    assert!(dijkstra.distance <= bfs.distance + 1e-9);
    assert!(a_star.metadata.nodes_explored <= dijkstra.metadata.nodes_explored);
}

#[test]
fn detour_is_longer_than_great_circle() {
    let direct = haversine_distance(LONDON, PARIS);
    let options = SearchOptions::default()
        .with_lanes(3)
        .with_obstacle(Obstacle::new(Point::new(50.2, 1.1), 25.0));
    let outcome = select_strategy(PathAlgorithm::Dijkstra)
        .find_path(LONDON, PARIS, &options)
        .unwrap();
    assert!(outcome.distance > direct);
    assert!(outcome
        .path
        .iter()
        .all(|point| haversine_distance(*point, Point::new(50.2, 1.1)) > 25.0));
}

#[test]
fn blocked_start_is_path_not_found_for_every_strategy() {
    let options = SearchOptions::default().with_obstacle(Obstacle::new(LONDON, 1.0));
    for algorithm in PathAlgorithm::ALL {
        let err = select_strategy(algorithm)
            .find_path(LONDON, PARIS, &options)
            .unwrap_err();
        match err {
            Error::PathNotFound { algorithm: name, .. } => {
                assert_eq!(name, algorithm.display_name());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
