use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;
use angular_hull::algorithms::convex_hull;
use angular_hull::data::*;

pub fn gen_vec<R>(rng: &mut R, n: usize) -> Vec<Point<i32>>
where
  R: Rng + ?Sized,
{
  (0..n).map(|_| rng.gen()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = rand::thread_rng();
  for &n in &[100, 10_000, 100_000] {
    let pts = gen_vec(&mut rng, n);
    c.bench_function(&format!("convex_hull({})", n), |b| {
      b.iter_batched(|| pts.clone(), convex_hull, BatchSize::LargeInput)
    });
  }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
