mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rbf_env::prelude::*;

const WORKERS: [usize; 4] = [1, 2, 4, 8];
const COUNT: usize = 32;

fn batch_generation_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch/generate");
    group.throughput(common::environments_throughput(COUNT));

    let environment = common::bench_environment(96);

    for &workers in &WORKERS {
        let generator = BatchGenerator::try_new(
            BatchConfig::new(environment.clone())
                .with_base_seed(common::BENCH_SEED)
                .with_count(COUNT)
                .with_workers(workers),
        )
        .expect("valid batch config");

        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter(|| {
                let output = generator.generate();
                black_box(output.succeeded());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = batch_generation_benches
}
criterion_main!(benches);
