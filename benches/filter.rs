//! Particle-filter benchmarks.
//!
//! Measures the per-step cost of the full observe cycle and its two heavy
//! phases (map update, reweighting via ray-casting) at a few population
//! sizes.
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use grid_slam::{
    compute_range_measurement, Action, BinaryGrid, DiscreteNoiseKernel, GridGeometry, OccupancyMap,
    Position, RangeReadings, SlamFilterConfig, SlamParticleFilter,
};

const WIDTH: i32 = 15;
const HEIGHT: i32 = 15;

fn build_filter(num_particles: usize) -> SlamParticleFilter {
    let config = SlamFilterConfig {
        num_particles,
        seed: 42,
        ..Default::default()
    };
    SlamParticleFilter::new(
        config,
        GridGeometry::full(WIDTH, HEIGHT).unwrap(),
        Position::new(7, 7),
        0.3,
        Box::new(DiscreteNoiseKernel::new(1)),
    )
    .unwrap()
}

fn bench_observe(c: &mut Criterion) {
    let mut group = c.benchmark_group("observe");
    for &n in &[100usize, 500, 1000] {
        group.bench_function(format!("{n}_particles"), |b| {
            let mut filter = build_filter(n);
            let ranges = RangeReadings::new(7, 7, 7, 7);
            b.iter(|| {
                filter.observe(black_box(Some(Action::Stop)), black_box(&ranges));
            });
        });
    }
    group.finish();
}

fn bench_ray_cast(c: &mut Criterion) {
    let geometry = std::sync::Arc::new(GridGeometry::full(WIDTH, HEIGHT).unwrap());
    let map = OccupancyMap::prior(geometry, 0.3);

    c.bench_function("binarize_and_cast", |b| {
        b.iter(|| {
            let grid = BinaryGrid::from_occupancy(black_box(&map));
            compute_range_measurement(&grid, black_box(Position::new(7, 7)))
        });
    });
}

criterion_group!(benches, bench_observe, bench_ray_cast);
criterion_main!(benches);
