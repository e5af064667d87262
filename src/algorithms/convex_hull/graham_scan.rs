use std::cmp::Ordering;

use crate::data::Point;
use crate::{HullScalar, Orientation};

// https://en.wikipedia.org/wiki/Graham_scan

// Doesn't allocate.
// Properties:
//    No panics.
//    Consecutive vertices always turn counter-clockwise.
//    No points are outside the resulting hull.
/// $O(n \log n)$ Convex hull of a set of points.
///
/// [Graham scan][wiki] around the leftmost point. The result starts at that
/// point and visits the remaining vertices counter-clockwise on screen, the
/// same rotational sense as [`IncrementalHull`](super::IncrementalHull).
///
/// # Properties
/// * No points from the input set will be outside the returned hull.
/// * All vertices are from the input set.
/// * Only strictly convex vertices are kept. Points on hull edges are dropped.
/// * Fewer than three distinct points, or points that all lie on one line,
///   yield the extremes: zero, one or two points.
///
/// # Examples
///
/// ```rust
/// # use angular_hull::algorithms::convex_hull;
/// # use angular_hull::data::Point;
/// let empty_set: Vec<Point<i32>> = vec![];
/// assert!(convex_hull(empty_set).is_empty());
///
/// let dups = vec![Point::new([0, 0])].repeat(3);
/// assert_eq!(convex_hull(dups), vec![Point::new([0, 0])]);
///
/// let line = vec![Point::new([0, 0]), Point::new([10, 0]), Point::new([50, 0])];
/// assert_eq!(convex_hull(line), vec![Point::new([0, 0]), Point::new([50, 0])]);
/// ```
///
/// [wiki]: https://en.wikipedia.org/wiki/Graham_scan
pub fn convex_hull<T>(mut pts: Vec<Point<T>>) -> Vec<Point<T>>
where
  T: HullScalar,
{
  let smallest = match smallest_point(&pts) {
    Some(pt) => pt,
    None => return pts,
  };

  pts.sort_unstable_by(|a, b| {
    ccw_cmp_around(&smallest, a, b).then_with(|| smallest.cmp_distance_to(a, b))
  });
  pts.dedup();
  if pts.len() < 3 {
    return pts;
  }
  let mut write_idx = 1;
  let mut read_idx = 2;
  // Keep only the farthest point on the first ray.
  {
    let origin = pts[write_idx - 1];
    while read_idx < pts.len() {
      let p2 = &pts[write_idx];
      if origin.orientation(p2, &pts[read_idx]) == Orientation::CoLinear {
        pts.swap(read_idx, write_idx);
        read_idx += 1;
      } else {
        break;
      }
    }
  }
  // Filter out points until all consecutive points are oriented counter-clockwise.
  while read_idx < pts.len() {
    let p1 = &pts[read_idx];
    let p2 = &pts[write_idx];
    let p3 = &pts[write_idx - 1];
    match p3.orientation(p2, p1) {
      Orientation::CounterClockWise => {
        pts.swap(read_idx, write_idx + 1);
        read_idx += 1;
        write_idx += 1;
      }
      Orientation::ClockWise | Orientation::CoLinear => {
        write_idx -= 1;
      }
    }
  }
  pts.truncate(write_idx + 1);
  pts
}

// Every other point lies in the half-plane to the right of `origin`, so
// orientation alone is a total order on their directions.
fn ccw_cmp_around<T: HullScalar>(origin: &Point<T>, a: &Point<T>, b: &Point<T>) -> Ordering {
  match Point::orient(origin, a, b) {
    Orientation::CounterClockWise => Ordering::Less,
    Orientation::ClockWise => Ordering::Greater,
    Orientation::CoLinear => Ordering::Equal,
  }
}

// Leftmost point, topmost among ties.
// O(n)
fn smallest_point<T>(pts: &[Point<T>]) -> Option<Point<T>>
where
  T: HullScalar,
{
  pts.iter().min_by_key(|a| (a.x_coord(), a.y_coord())).copied()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algorithms::IncrementalHull;
  use crate::testing::*;
  use crate::Error;

  use claims::assert_ok;
  use proptest::collection::vec;
  use proptest::prelude::*;
  use std::collections::BTreeSet;

  fn validate<T: HullScalar>(pts: &[Point<T>]) -> Result<(), Error> {
    let n = pts.len();
    if n < 3 {
      return Ok(());
    }
    for i in 0..n {
      if !Point::orient(&pts[i], &pts[(i + 1) % n], &pts[(i + 2) % n]).is_ccw() {
        return Err(Error::ConvexViolation);
      }
    }
    Ok(())
  }

  // Inside or on the boundary of a counter-clockwise hull.
  fn covers<T: HullScalar>(hull: &[Point<T>], pt: &Point<T>) -> bool {
    match hull.len() {
      0 => false,
      1 => hull[0] == *pt,
      2 => {
        Point::orient(&hull[0], &hull[1], pt).is_colinear()
          && hull[0].cmp_distance_to(pt, &hull[1]) != Ordering::Greater
          && hull[1].cmp_distance_to(pt, &hull[0]) != Ordering::Greater
      }
      n => (0..n).all(|i| !Point::orient(&hull[i], &hull[(i + 1) % n], pt).is_cw()),
    }
  }

  #[test]
  fn convex_hull_colinear() {
    let points = vec![
      Point::new([0, 0]),
      Point::new([1, 0]),
      Point::new([2, 0]),
      Point::new([3, 0]),
      Point::new([4, 0]),
      Point::new([1, 1]),
    ];
    let hull = convex_hull(points);
    assert_eq!(hull, vec![Point::new([0, 0]), Point::new([1, 1]), Point::new([4, 0])]);
    assert_ok!(validate(&hull));
  }

  #[test]
  fn convex_hull_colinear_rev() {
    let points = vec![
      Point::new([0, 0]),
      Point::new([1, 0]),
      Point::new([0, 9]),
      Point::new([0, 8]),
      Point::new([0, 7]),
      Point::new([0, 6]),
    ];
    let hull = convex_hull(points);
    assert_eq!(hull.len(), 3);
    assert_ok!(validate(&hull));
  }

  #[test]
  fn convex_hull_square_with_interior() {
    let points = vec![
      Point::new([0i64, 0]),
      Point::new([100, 0]),
      Point::new([50, 1]),
      Point::new([40, 1]),
      Point::new([0, 100]),
      Point::new([100, 100]),
      Point::new([50, 50]),
    ];
    let hull = convex_hull(points);
    assert_eq!(
      hull,
      vec![
        Point::new([0, 0]),
        Point::new([0, 100]),
        Point::new([100, 100]),
        Point::new([100, 0]),
      ]
    );
  }

  #[test]
  fn convex_hull_vertical_line() {
    let points = vec![Point::new([3, 9]), Point::new([3, -2]), Point::new([3, 4])];
    assert_eq!(convex_hull(points), vec![Point::new([3, -2]), Point::new([3, 9])]);
  }

  #[test]
  fn convex_hull_extreme_coordinates() {
    let points = vec![
      Point::new([i32::MIN, i32::MIN]),
      Point::new([i32::MAX, i32::MIN]),
      Point::new([i32::MAX, i32::MAX]),
      Point::new([i32::MIN, i32::MAX]),
      Point::new([0, 0]),
    ];
    let hull = convex_hull(points);
    assert_eq!(hull.len(), 4);
    assert_ok!(validate(&hull));
  }

  proptest! {
    #[test]
    fn convex_hull_prop(pts in vec(any_8(), 0..100)) {
      let hull = convex_hull(pts.clone());
      // Prop #1: Results are valid.
      prop_assert!(validate(&hull).is_ok());
      // Prop #2: No points from the input set are outside the hull.
      for pt in pts.iter() {
        prop_assert!(covers(&hull, pt));
      }
      // Prop #3: All vertices are in the input set.
      for pt in hull.iter() {
        prop_assert!(pts.contains(pt))
      }
    }

    #[test]
    fn matches_incremental_prop(pts in vec(any_8(), 0..100)) {
      let mut incremental = IncrementalHull::new();
      for pt in pts.iter() {
        match incremental.insert(*pt) {
          Ok(_) | Err(Error::DegenerateAngle) => {}
          Err(err) => return Err(TestCaseError::fail(err.to_string())),
        }
      }
      let expected: BTreeSet<Point<i8>> = convex_hull(pts).into_iter().collect();
      let actual: BTreeSet<Point<i8>> = incremental.hull().copied().collect();
      prop_assert_eq!(actual, expected);
    }
  }
}
