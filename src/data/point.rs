use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::ops::Index;

use crate::{HullScalar, Orientation};

/// Point in screen space. `y` grows downwards.
///
/// Points are plain values: two points are equal iff both coordinates match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)] // Required for correctness!
pub struct Point<T> {
  pub array: [T; 2],
}

// Random sampling.
impl<T> Distribution<Point<T>> for Standard
where
  Standard: Distribution<T>,
{
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point<T> {
    Point {
      array: [rng.gen(), rng.gen()],
    }
  }
}

impl<T> Point<T> {
  pub const fn new(array: [T; 2]) -> Point<T> {
    Point { array }
  }

  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }

  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }

  pub fn cast<U, F>(&self, f: F) -> Point<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: [f(self.array[0].clone()), f(self.array[1].clone())],
    }
  }
}

impl<T: HullScalar> Point<T> {
  pub fn orientation(&self, q: &Point<T>, r: &Point<T>) -> Orientation {
    Orientation::new(&self.array, &q.array, &r.array)
  }

  /// Turn direction of `p -> q -> r`. See [`Orientation::new`].
  pub fn orient(p: &Point<T>, q: &Point<T>, r: &Point<T>) -> Orientation {
    Orientation::new(&p.array, &q.array, &r.array)
  }

  /// Exact squared distance. Never overflows.
  pub fn squared_euclidean_distance(&self, rhs: &Point<T>) -> T::Wide {
    let dx = self.array[0].widen() - rhs.array[0].widen();
    let dy = self.array[1].widen() - rhs.array[1].widen();
    dx.clone() * dx + dy.clone() * dy
  }

  /// Compare the distances from `self` to `p` and from `self` to `q`.
  pub fn cmp_distance_to(&self, p: &Point<T>, q: &Point<T>) -> Ordering {
    self
      .squared_euclidean_distance(p)
      .cmp(&self.squared_euclidean_distance(q))
  }
}

impl<T> Index<usize> for Point<T> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> From<(T, T)> for Point<T> {
  fn from(point: (T, T)) -> Point<T> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl<T> From<[T; 2]> for Point<T> {
  fn from(array: [T; 2]) -> Point<T> {
    Point { array }
  }
}

impl<T> Deref for Point<T> {
  type Target = [T; 2];
  fn deref(&self) -> &[T; 2] {
    &self.array
  }
}

impl<T: fmt::Display> fmt::Display for Point<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.array[0], self.array[1])
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::testing::*;
  use crate::Orientation::*;

  use proptest::prelude::*;
  use rand::rngs::SmallRng;
  use rand::SeedableRng;

  proptest! {
    #[test]
    fn squared_euclidean_distance_fuzz(pt1 in any_64(), pt2 in any_64()) {
      let _ = pt1.squared_euclidean_distance(&pt2);
    }

    #[test]
    fn distance_symmetric(pt1 in any_32(), pt2 in any_32()) {
      prop_assert_eq!(
        pt1.squared_euclidean_distance(&pt2),
        pt2.squared_euclidean_distance(&pt1)
      );
    }

    #[test]
    fn doubled_step_colinear(pt1 in any_16(), pt2 in any_16()) {
      let pt1 = pt1.cast(i32::from);
      let pt2 = pt2.cast(i32::from);
      let pt3 = Point::new([2 * pt2[0] - pt1[0], 2 * pt2[1] - pt1[1]]);
      prop_assert!(Point::orient(&pt1, &pt2, &pt3).is_colinear())
    }

    #[test]
    fn orientation_reverse(pt1 in any_64(), pt2 in any_64(), pt3 in any_64()) {
      let abc = Point::orient(&pt1, &pt2, &pt3);
      let cba = Point::orient(&pt3, &pt2, &pt1);
      prop_assert_eq!(abc, cba.reverse())
    }
  }

  #[test]
  fn test_turns() {
    assert_eq!(
      Point::orient(
        &Point::new([0, 0]),
        &Point::new([1, 1]),
        &Point::new([2, 2])
      ),
      CoLinear
    );
    assert_eq!(
      Point::new([100, 200]).orientation(&Point::new([300, 300]), &Point::new([100, 100])),
      CounterClockWise
    );
    assert_eq!(
      Point::new([100, 200]).orientation(&Point::new([100, 100]), &Point::new([300, 300])),
      ClockWise
    );
  }

  #[test]
  fn cmp_distance() {
    let origin = Point::new([0, 0]);
    assert_eq!(
      origin.cmp_distance_to(&Point::new([3, 4]), &Point::new([-5, 0])),
      Ordering::Equal
    );
    assert_eq!(
      origin.cmp_distance_to(&Point::new([3, 4]), &Point::new([0, 6])),
      Ordering::Less
    );
  }

  #[test]
  fn conversions() {
    let pt: Point<i32> = (1, 2).into();
    assert_eq!(pt, Point::new([1, 2]));
    assert_eq!(Point::from([1, 2]), pt);
    assert_eq!(pt.to_string(), "(1, 2)");
    assert_eq!(*pt.x_coord(), 1);
    assert_eq!(pt[1], 2);
  }

  #[test]
  fn random_sampling() {
    let mut rng = SmallRng::seed_from_u64(1);
    let pts: Vec<Point<i8>> = (0..16).map(|_| rng.gen()).collect();
    assert_eq!(pts.len(), 16);
  }
}
