use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wheel_core::{resolve, HeadlessRunner, SpinConfig};

fn bench_full_spin(c: &mut Criterion) {
    let names: Vec<String> = (0..20).map(|i| format!("p{}", i)).collect();
    c.bench_function("full_spin_20_participants", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut runner =
                HeadlessRunner::with_participants(SpinConfig::default(), seed, &names).unwrap();
            black_box(runner.spin_once().unwrap())
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_100", |b| {
        b.iter(|| resolve(black_box(123.456), black_box(100)))
    });
}

criterion_group!(benches, bench_full_spin, bench_resolve);
criterion_main!(benches);
