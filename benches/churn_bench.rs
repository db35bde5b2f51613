use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use peak_map::PeakMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_pairs(n: usize, seed: u64) -> Vec<(u64, u64)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.gen_range(0..2 * n as u64), rng.gen_range(0..1_000)))
        .collect()
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for &n in &[100usize, 1_000, 10_000] {
        let pairs = random_pairs(n, 42);

        group.bench_with_input(BenchmarkId::new("set_value", n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut f = PeakMap::new();
                for &(a, v) in pairs {
                    f.set_value(a, v).unwrap();
                }
                f.len()
            })
        });

        let built = PeakMap::from_pairs(pairs.iter().copied()).unwrap();
        group.bench_with_input(BenchmarkId::new("erase", n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut f = built.clone();
                for &(a, _) in pairs {
                    f.erase(&a).unwrap();
                }
                f.len()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_churn);
criterion_main!(benches);
