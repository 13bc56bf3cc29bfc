use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;
use rand_distr::StandardNormal;
use stationarity_rs::ADFConfig;
use stationarity_rs::ADFTest;

fn random_walk(n: usize) -> Vec<f64> {
  let mut rng = StdRng::seed_from_u64(42);
  let mut x = vec![0.0; n];
  for t in 1..n {
    let e: f64 = StandardNormal.sample(&mut rng);
    x[t] = x[t - 1] + e;
  }
  x
}

fn bench_adf_by_size(c: &mut Criterion) {
  let mut group = c.benchmark_group("ADF_by_size");

  for &n in &[128, 512, 2048, 8192] {
    let x = random_walk(n);
    group.bench_with_input(BenchmarkId::new("svd_ridge", n), &x, |b, x| {
      b.iter(|| {
        let mut test = ADFTest::new(black_box(x), ADFConfig::default());
        black_box(test.run().ok())
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_adf_by_size);
criterion_main!(benches);
