use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tile_blast::core::{CellData, FallPhysics, Grid, MatchFinder};
use tile_blast::{CubeColor, GridConfig, GridEngine, Position};

fn mono_grid(width: i32, height: i32) -> Grid {
    let mut grid = Grid::new(width, height, 1);
    for y in 0..height {
        for x in 0..width {
            grid.set(x, y, CellData::cube(CubeColor::Red, Position::new(x, y)));
        }
    }
    grid
}

fn bench_find_matches(c: &mut Criterion) {
    let grid = mono_grid(16, 16);
    let finder = MatchFinder::new(2);

    c.bench_function("find_matches_16x16_mono", |b| {
        b.iter(|| finder.find_matches(black_box(&grid), 8, 8))
    });
}

fn bench_fall_duration(c: &mut Criterion) {
    let physics = FallPhysics::new(20.0, 1.0, 25.0);

    c.bench_function("fall_duration_chain", |b| {
        b.iter(|| {
            let mut velocity = 0.0f32;
            for _ in 0..8 {
                let duration = physics.fall_duration(black_box(velocity));
                velocity = physics.exit_velocity(velocity, duration);
            }
            velocity
        })
    });
}

fn bench_full_resolution(c: &mut Criterion) {
    let config = GridConfig {
        width: 8,
        visible_height: 8,
        ..GridConfig::default()
    };

    c.bench_function("click_and_settle_8x8", |b| {
        b.iter(|| {
            let mut engine = GridEngine::new(config.clone(), 12345).unwrap();
            engine.drain_events();
            engine.handle_click(black_box(4), black_box(4));
            engine.run_to_rest();
            engine.drain_events().len()
        })
    });
}

criterion_group!(
    benches,
    bench_find_matches,
    bench_fall_duration,
    bench_full_resolution
);
criterion_main!(benches);
