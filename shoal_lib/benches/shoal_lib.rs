use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use shoal_lib::{
    collaborators::EatenCounter,
    flock::BoidManager,
    options::{SimOptions, TrackerType},
    predator::Shark,
};

fn manager(no_boids: usize, tracker: TrackerType) -> BoidManager<Shark, EatenCounter> {
    let options = SimOptions {
        init_boids: no_boids,
        max_boids: no_boids,
        tracker,
        seed: Some(11),
        ..Default::default()
    };
    let shark = Shark::new(Vec2::new(600., 900.), Vec2::new(2., 0.5), Vec2::new(40., 20.));

    BoidManager::new(options, shark, EatenCounter::default()).expect("valid bench options")
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for no_boids in [50_usize, 200, 800] {
        for tracker in [TrackerType::Naive, TrackerType::Grid] {
            let mut flock = manager(no_boids, tracker);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", tracker), no_boids),
                &no_boids,
                |b, _| {
                    b.iter(|| {
                        let world = flock.options().world;
                        flock.predator_mut().patrol(&world);
                        flock.tick();
                        black_box(flock.live_count())
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
