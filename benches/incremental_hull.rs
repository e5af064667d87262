use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::Rng;
use angular_hull::algorithms::IncrementalHull;
use angular_hull::data::*;

pub fn gen_vec<R>(rng: &mut R, n: usize) -> Vec<Point<i32>>
where
  R: Rng + ?Sized,
{
  (0..n).map(|_| rng.gen()).collect()
}

// Points on a circle: every insertion is accepted and almost none evict.
pub fn gen_circle(n: usize) -> Vec<Point<i32>> {
  (0..n)
    .map(|i| {
      let angle = i as f64 * std::f64::consts::TAU / n as f64;
      Point::new([
        (angle.cos() * 1e6).round() as i32,
        (angle.sin() * 1e6).round() as i32,
      ])
    })
    .collect()
}

fn build(pts: Vec<Point<i32>>) -> IncrementalHull<i32> {
  let mut hull = IncrementalHull::new();
  for pt in pts {
    let _ = hull.insert(pt);
  }
  hull
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = rand::thread_rng();
  for &n in &[100, 10_000, 100_000] {
    let pts = gen_vec(&mut rng, n);
    c.bench_function(&format!("IncrementalHull::insert(random, {})", n), |b| {
      b.iter_batched(|| pts.clone(), build, BatchSize::LargeInput)
    });
  }
  let circle = gen_circle(10_000);
  c.bench_function("IncrementalHull::insert(circle, 10000)", |b| {
    b.iter_batched(|| circle.clone(), build, BatchSize::LargeInput)
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
