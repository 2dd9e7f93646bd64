//! Tick Benchmarks
//!
//! Measures the cost of one universe tick as the number of objects and the
//! number of forces per object grow.
//!
//! Run with: cargo criterion

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tickphys::prelude::*;

fn universe(objects: usize, forces: usize) -> PhysicsManager {
    let mut manager = PhysicsManager::new(1.0 / 60.0);
    for i in 0..objects {
        let mut object = PhysicsObject::builder(format!("body-{i}"))
            .position(Vec3::new(i as f64, 0.0, 0.0))
            .mass(1.0 + i as f64 * 0.01)
            .build()
            .unwrap();
        for j in 0..forces {
            object
                .apply_force(
                    Force::new(format!("f{j}"), 0.1 * j as f64, -0.2, 0.05)
                        .with_lever_arm(Vec3::new(0.5, 0.5, 0.0))
                        .with_rot_angle(Vec3::new(0.3, 0.1, 0.0)),
                )
                .unwrap();
        }
        manager.add_object(object).unwrap();
    }
    manager
}

/// One tick across a growing universe.
fn bench_universe_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("universe_tick");
    group.sample_size(100);
    group.confidence_level(0.95);

    for n in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("objects", n), n, |b, &n| {
            let mut manager = universe(n, 4);
            b.iter(|| {
                manager.tick(None).unwrap();
                black_box(manager.elapsed())
            });
        });
    }

    group.finish();
}

/// Game mode against checked mode on the same universe.
fn bench_tick_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_mode");

    for mode in [TickMode::Game, TickMode::Checked] {
        group.bench_function(format!("{mode:?}"), |b| {
            let mut manager = universe(100, 4).with_mode(mode);
            b.iter(|| {
                manager.tick(None).unwrap();
                black_box(manager.tick_count())
            });
        });
    }

    group.finish();
}

/// A single object carrying many forces.
fn bench_force_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("forces_per_object");

    for n in [1, 16, 256].iter() {
        group.bench_with_input(BenchmarkId::new("forces", n), n, |b, &n| {
            let manager = universe(1, n);
            let mut object = manager.objects().next().cloned().unwrap();
            b.iter(|| {
                object.tick(black_box(1.0 / 60.0)).unwrap();
                black_box(object.get_pos())
            });
        });
    }

    group.finish();
}

/// Loading and building a scene from YAML.
fn bench_scene_build(c: &mut Criterion) {
    let yaml = universe_yaml(50);
    c.bench_function("scene_build_50", |b| {
        b.iter(|| {
            let config = UniverseConfig::from_yaml(black_box(&yaml)).unwrap();
            black_box(config.build_manager().unwrap().len())
        });
    });
}

fn universe_yaml(objects: usize) -> String {
    let mut builder = UniverseConfig::builder().tick_length(0.1);
    for i in 0..objects {
        let mut object = ObjectConfig::new(format!("body-{i}"), 2.0, 1.0);
        object.forces.push(ForceConfig::gravity("gravity", EARTH_G));
        object.forces.push(ForceConfig::linear("wind", Vec3::new(0.3, 0.0, 0.0)));
        builder = builder.object(object);
    }
    builder.build().to_yaml().unwrap()
}

criterion_group!(
    benches,
    bench_universe_tick,
    bench_tick_modes,
    bench_force_count,
    bench_scene_build,
);
criterion_main!(benches);
