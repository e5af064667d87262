// This module contains strategies for:
//  * points
//  * point clouds
// A Strategy is a way to generate a shrinkable value.
use crate::data::Point;

use core::ops::Range;
use proptest::arbitrary::*;
use proptest::collection::*;
use proptest::prelude::*;
use proptest::strategy::*;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use rand::SeedableRng;

type Mapped<I, O> = Map<StrategyFor<I>, fn(_: I) -> O>;

///////////////////////////////////////////////////////////////////////////////
// Arbitrary Point

impl<T: Arbitrary + Copy> Arbitrary for Point<T> {
  type Strategy = Mapped<[T; 2], Point<T>>;
  type Parameters = T::Parameters;
  fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
    any_with::<[T; 2]>(params).prop_map(Point::new as fn([T; 2]) -> Point<T>)
  }
}

///////////////////////////////////////////////////////////////////////////////
// Point clouds

/// `n` points drawn uniformly from `[-radius, radius]²`. Small radii make
/// duplicates, shared rays and colinear runs common.
pub fn points_within<T>(radius: T, n: Range<usize>) -> impl Strategy<Value = Vec<Point<T>>>
where
  T: Copy + std::fmt::Debug + num_traits::Signed + PartialOrd + SampleUniform,
{
  (n, any::<u64>()).prop_map(move |(n, seed)| {
    let rng = &mut rand::rngs::SmallRng::seed_from_u64(seed);
    (0..n)
      .map(|_| {
        Point::new([
          rng.gen_range(-radius..=radius),
          rng.gen_range(-radius..=radius),
        ])
      })
      .collect()
  })
}

///////////////////////////////////////////////////////////////////////////////
// Convenience functions

pub fn any_8() -> impl Strategy<Value = Point<i8>> {
  any::<Point<i8>>()
}

pub fn any_16() -> impl Strategy<Value = Point<i16>> {
  any::<Point<i16>>()
}

pub fn any_32() -> impl Strategy<Value = Point<i32>> {
  any::<Point<i32>>()
}

pub fn any_64() -> impl Strategy<Value = Point<i64>> {
  any::<Point<i64>>()
}

/// Exactly `n` shrinkable points.
pub fn points_8(n: usize) -> impl Strategy<Value = Vec<Point<i8>>> {
  vec(any_8(), n)
}
