use criterion::{criterion_group, criterion_main, Criterion};
use geopath_lib::{select_strategy, Obstacle, PathAlgorithm, Point, SearchOptions};
use once_cell::sync::Lazy;
use std::hint::black_box;

const LONDON: Point = Point::new(51.5074, -0.1278);
const PARIS: Point = Point::new(48.8566, 2.3522);

static OPEN_OPTIONS: Lazy<SearchOptions> =
    Lazy::new(|| SearchOptions::default().with_steps(200).with_lanes(8));
static OBSTRUCTED_OPTIONS: Lazy<SearchOptions> = Lazy::new(|| {
    SearchOptions::default()
        .with_steps(200)
        .with_lanes(8)
        .with_obstacle(Obstacle::new(Point::new(50.2, 1.1), 12.0))
        .with_obstacle(Obstacle::new(Point::new(49.5, 1.8), 8.0))
});

fn benchmark_pathfinding(c: &mut Criterion) {
    for algorithm in PathAlgorithm::ALL {
        let strategy = select_strategy(algorithm);

        c.bench_function(&format!("{}_london_paris_open", algorithm.id()), |b| {
            let options = &*OPEN_OPTIONS;
            b.iter(|| {
                let outcome = strategy
                    .find_path(LONDON, PARIS, options)
                    .expect("path exists");
                black_box(outcome.distance)
            });
        });

        c.bench_function(&format!("{}_london_paris_obstructed", algorithm.id()), |b| {
            let options = &*OBSTRUCTED_OPTIONS;
            b.iter(|| {
                let outcome = strategy
                    .find_path(LONDON, PARIS, options)
                    .expect("path exists");
                black_box(outcome.metadata.nodes_explored)
            });
        });
    }
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
