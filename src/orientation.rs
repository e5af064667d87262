use std::cmp::Ordering;

use crate::HullScalar;

/// Turn direction of an ordered triple of points.
///
/// Directions are named as they appear on screen, where `y` grows
/// downwards. Walking `p1 -> p2 -> p3` and turning left is
/// [`CounterClockWise`](Orientation::CounterClockWise).
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Orientation {
  CounterClockWise,
  ClockWise,
  CoLinear,
}
use Orientation::*;

impl Orientation {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// The sign of `(p2.x-p1.x)*(p3.y-p1.y) - (p2.y-p1.y)*(p3.x-p1.x)` decides
  /// the turn: positive is clockwise on screen, negative is counter-clockwise
  /// and zero is colinear. The products are evaluated in
  /// [`HullScalar::Wide`] so this function is exact and never overflows.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use angular_hull::Orientation;
  /// let origin = [0, 0];
  /// let east = [10, 0];
  /// // Screen coordinates: [10, 10] is below-right of the origin.
  /// assert!(Orientation::new(&origin, &east, &[20, 0]).is_colinear());
  /// assert!(Orientation::new(&origin, &east, &[10, 10]).is_cw());
  /// assert!(Orientation::new(&origin, &east, &[10, -10]).is_ccw());
  /// ```
  pub fn new<T>(p1: &[T; 2], p2: &[T; 2], p3: &[T; 2]) -> Orientation
  where
    T: HullScalar,
  {
    let u = [p2[0].widen() - p1[0].widen(), p2[1].widen() - p1[1].widen()];
    let v = [p3[0].widen() - p1[0].widen(), p3[1].widen() - p1[1].widen()];
    Orientation::of_vectors(&u, &v)
  }

  /// Orientation of the turn from direction `u` to direction `v`.
  ///
  /// Identical to `Orientation::new(origin, origin + u, origin + v)`.
  pub fn of_vectors<W>(u: &[W; 2], v: &[W; 2]) -> Orientation
  where
    W: Clone + Ord + num_traits::Signed,
  {
    let lhs = u[0].clone() * v[1].clone();
    let rhs = u[1].clone() * v[0].clone();
    match lhs.cmp(&rhs) {
      Ordering::Greater => ClockWise,
      Ordering::Less => CounterClockWise,
      Ordering::Equal => CoLinear,
    }
  }

  pub fn is_colinear(self) -> bool {
    matches!(self, Orientation::CoLinear)
  }

  pub fn is_ccw(self) -> bool {
    matches!(self, Orientation::CounterClockWise)
  }

  pub fn is_cw(self) -> bool {
    matches!(self, Orientation::ClockWise)
  }

  #[must_use]
  pub fn then(self, other: Orientation) -> Orientation {
    match self {
      Orientation::CoLinear => other,
      _ => self,
    }
  }

  #[must_use]
  pub fn reverse(self) -> Orientation {
    match self {
      Orientation::CounterClockWise => Orientation::ClockWise,
      Orientation::ClockWise => Orientation::CounterClockWise,
      Orientation::CoLinear => Orientation::CoLinear,
    }
  }
}
