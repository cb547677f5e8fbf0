use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazy_di::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_cache_hit(c: &mut Criterion) {
    let sp = ServiceCollection::new().add_instance("answer", 42u64).build();

    // Prime the cache
    let _ = sp.get::<u64>("answer").unwrap();

    c.bench_function("cache_hit_u64", |b| {
        b.iter(|| {
            let v = sp.get::<u64>(black_box("answer")).unwrap();
            black_box(v);
        })
    });
}

fn bench_cold_build(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("cold_build_expensive", |b| {
        b.iter_batched(
            || {
                ServiceCollection::new()
                    .add("expensive", |_| {
                        Ok(ExpensiveToCreate {
                            data: (0..1000).collect(),
                        })
                    })
                    .build()
            },
            |sp| {
                let v = sp.get::<ExpensiveToCreate>("expensive").unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn chain(depth: usize) -> ServiceCollection {
    let mut sc = ServiceCollection::new().add(format!("level_{}", depth), |_| Ok(0usize));
    for level in (0..depth).rev() {
        let next = format!("level_{}", level + 1);
        sc = sc.add(format!("level_{}", level), move |r| Ok(*r.get::<usize>(next.clone())? + 1));
    }
    sc
}

fn bench_dependency_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_chain");

    for depth in [1usize, 8, 32, 128] {
        let sc = chain(depth);
        group.bench_with_input(BenchmarkId::new("cold", depth), &depth, |b, _| {
            b.iter_batched(
                || sc.build(),
                |sp| black_box(sp.get::<usize>("level_0").unwrap()),
                criterion::BatchSize::SmallInput,
            )
        });

        let sp = sc.build();
        let _ = sp.get::<usize>("level_0").unwrap();
        group.bench_with_input(BenchmarkId::new("warm", depth), &depth, |b, _| {
            b.iter(|| black_box(sp.get::<usize>("level_0").unwrap()))
        });
    }

    group.finish();
}

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for count in [10usize, 100] {
        group.bench_with_input(BenchmarkId::new("add", count), &count, |b, &count| {
            b.iter(|| {
                let mut sc = ServiceCollection::new();
                for i in 0..count {
                    sc = sc.add_instance(format!("service_{}", i), i);
                }
                black_box(sc.len())
            })
        });
    }

    group.finish();
}

fn bench_observed_resolution(c: &mut Criterion) {
    let metrics = Arc::new(MetricsObserver::new());
    let sc = ServiceCollection::new()
        .add("config", |_| Ok(8080u16))
        .add("server", |r| Ok(format!("listening on {}", r.get::<u16>("config")?)))
        .with_observer(metrics.clone());

    c.bench_function("observed_cold_build", |b| {
        b.iter_batched(
            || sc.build(),
            |sp| black_box(sp.get::<String>("server").unwrap()),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_cache_hit,
    bench_cold_build,
    bench_dependency_chain,
    bench_registration,
    bench_observed_resolution
);
criterion_main!(benches);
