use claims::debug_assert_ok;
use log::{debug, trace};
use std::cmp::Ordering;

use crate::data::{Anchor, AngleKey, CircularTree, Handle, Point};
use crate::{Error, HullScalar};

// Incremental Graham scan: https://en.wikipedia.org/wiki/Graham_scan
//
// Hull vertices are kept in a circular tree keyed by their angle around an
// anchor inside the hull. A new point only disturbs the vertices next to its
// own angular position, so repairs walk outwards from there and stop at the
// first convex turn on either side.

pub type KeyOrder<T> = fn(&AngleKey<T>, &AngleKey<T>) -> Ordering;

/// Hull vertices ordered counter-clockwise around the anchor.
pub type HullTree<T> = CircularTree<AngleKey<T>, Point<T>, KeyOrder<T>>;

/// Lifecycle of an [`IncrementalHull`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// No points.
  Empty,
  /// One or two points. The anchor is the first point.
  Anchored(usize),
  /// The anchor is the centroid of the first three points and never moves
  /// again.
  Stable,
}

/// Outcome of [`IncrementalHull::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
  /// The point is a hull vertex. `evicted` vertices were removed to keep the
  /// hull convex, including a nearer point on the same ray.
  Accepted { evicted: usize },
  /// The point is inside the hull, on one of its edges, or shadowed by a
  /// farther point on the same ray. The hull is unchanged.
  Rejected,
}

#[derive(Debug, Clone)]
enum AnchorState<T: HullScalar> {
  Unset,
  Seed(Anchor<T>),
  Centroid(Anchor<T>),
}

enum Admission {
  Fresh(Handle),
  Replaced(Handle),
  Shadowed,
}

/// Convex hull maintained one point at a time.
///
/// Each insertion runs in $O((k+1) \log n)$ where `k` is the number of
/// vertices it evicts and `n` the size of the hull. Every vertex is evicted at
/// most once, so `n` insertions cost $O(n \log n)$ in total.
///
/// After every call to [`insert`](IncrementalHull::insert) the vertices, in
/// the order yielded by [`hull`](IncrementalHull::hull), form a strictly convex
/// polygon: every three consecutive vertices turn counter-clockwise on screen.
///
/// # Examples
///
/// ```rust
/// # use angular_hull::algorithms::{IncrementalHull, Insertion};
/// # use angular_hull::data::Point;
/// let mut hull = IncrementalHull::new();
/// for pt in [[100, 200], [300, 300], [100, 100]] {
///   hull.insert(Point::new(pt)).unwrap();
/// }
/// assert_eq!(hull.insert(Point::new([138, 188])), Ok(Insertion::Rejected));
/// assert_eq!(hull.len(), 3);
/// ```
#[derive(Debug)]
pub struct IncrementalHull<T: HullScalar> {
  tree: HullTree<T>,
  state: AnchorState<T>,
  epoch: u32,
}

impl<T: HullScalar> Default for IncrementalHull<T> {
  fn default() -> Self {
    IncrementalHull::new()
  }
}

impl<T: HullScalar> IncrementalHull<T> {
  pub fn new() -> IncrementalHull<T> {
    IncrementalHull {
      tree: CircularTree::new(AngleKey::cmp_around as KeyOrder<T>),
      state: AnchorState::Unset,
      epoch: 0,
    }
  }

  /// Number of hull vertices.
  pub fn len(&self) -> usize {
    self.tree.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tree.is_empty()
  }

  pub fn phase(&self) -> Phase {
    match self.state {
      AnchorState::Unset => Phase::Empty,
      AnchorState::Seed(_) => Phase::Anchored(self.tree.len()),
      AnchorState::Centroid(_) => Phase::Stable,
    }
  }

  pub fn anchor(&self) -> Option<&Anchor<T>> {
    match &self.state {
      AnchorState::Unset => None,
      AnchorState::Seed(anchor) | AnchorState::Centroid(anchor) => Some(anchor),
    }
  }

  /// Read-only view of the underlying circular tree.
  pub fn tree(&self) -> &HullTree<T> {
    &self.tree
  }

  /// Hull vertices in counter-clockwise order, starting at the first vertex
  /// east of the anchor.
  ///
  /// The iterator is lazy and borrows the hull, so it cannot outlive the next
  /// call to [`insert`](IncrementalHull::insert) or
  /// [`clear`](IncrementalHull::clear). Call `hull` again to restart.
  pub fn hull(&self) -> impl Iterator<Item = &Point<T>> + ExactSizeIterator + Clone + '_ {
    self.tree.iter().map(|(_key, point)| point)
  }

  /// Forget every point. The next insertion starts a new anchor lifecycle.
  pub fn clear(&mut self) {
    debug!("clearing hull with {} vertices", self.tree.len());
    self.tree.clear();
    self.state = AnchorState::Unset;
  }

  /// Add a point and repair the hull around it.
  ///
  /// # Errors
  /// Returns [`Error::DegenerateAngle`] if the point coincides with the anchor.
  /// Such a point is never a hull vertex, but it is reported rather than
  /// dropped so the caller can decide what to do with it.
  ///
  /// The anchor is the exact centroid, not [`Anchor::rounded`]: inserting
  /// the rounded centroid is `Ok(Insertion::Rejected)` unless the two agree.
  pub fn insert(&mut self, point: Point<T>) -> Result<Insertion, Error> {
    match self.state {
      AnchorState::Unset => return self.insert_seed(point),
      AnchorState::Seed(_) if self.tree.len() == 2 => self.recenter(&point)?,
      _ => {}
    }
    let key = AngleKey::new(self.anchor_ref(), &point)?;

    let small = self.tree.len() < 3;
    let (handle, mut evicted) = match self.admit(key, point)? {
      Admission::Fresh(handle) => (handle, 0),
      Admission::Replaced(handle) => (handle, 1),
      Admission::Shadowed => return Ok(Insertion::Rejected),
    };
    // Fewer than three vertices are always in convex position.
    if small {
      return Ok(Insertion::Accepted { evicted });
    }

    // Inside the wedge between its angular neighbours, the point is a vertex
    // iff it lies strictly beyond the edge joining them. Repairing around an
    // interior point would evict genuine vertices, so this is checked first.
    let prev = self.tree.before(handle)?;
    let next = self.tree.after(handle)?;
    if !Point::orient(&self.tree[prev], &point, &self.tree[next]).is_ccw() {
      trace!("{:?} is not outside the hull", point);
      self.tree.remove(handle)?;
      return Ok(Insertion::Rejected);
    }

    // Walk clockwise, evicting vertices that no longer make a left turn.
    while self.tree.len() >= 3 {
      let prev = self.tree.before(handle)?;
      let prev2 = self.tree.before(prev)?;
      if Point::orient(&self.tree[prev2], &self.tree[prev], &point).is_ccw() {
        break;
      }
      let (_, gone) = self.tree.remove(prev)?;
      trace!("{:?} evicts {:?}", point, gone);
      evicted += 1;
    }

    // Walk counter-clockwise.
    while self.tree.len() >= 3 {
      let next = self.tree.after(handle)?;
      let next2 = self.tree.after(next)?;
      if Point::orient(&point, &self.tree[next], &self.tree[next2]).is_ccw() {
        break;
      }
      let (_, gone) = self.tree.remove(next)?;
      trace!("{:?} evicts {:?}", point, gone);
      evicted += 1;
    }

    debug_assert_ok!(self.validate_around(handle));
    Ok(Insertion::Accepted { evicted })
  }

  /// $O(n)$ Check that every three consecutive vertices turn counter-clockwise.
  pub fn validate(&self) -> Result<(), Error> {
    let pts: Vec<&Point<T>> = self.hull().collect();
    let n = pts.len();
    if n < 3 {
      return Ok(());
    }
    for i in 0..n {
      if !Point::orient(pts[i], pts[(i + 1) % n], pts[(i + 2) % n]).is_ccw() {
        return Err(Error::ConvexViolation);
      }
    }
    Ok(())
  }

  // Check the three turns that involve the vertex at `handle`.
  fn validate_around(&self, handle: Handle) -> Result<(), Error> {
    if self.tree.len() < 3 {
      return Ok(());
    }
    let prev = self.tree.before(handle)?;
    let next = self.tree.after(handle)?;
    let prev2 = self.tree.before(prev)?;
    let next2 = self.tree.after(next)?;
    let turns = [
      [prev2, prev, handle],
      [prev, handle, next],
      [handle, next, next2],
    ];
    for [a, b, c] in turns.iter() {
      if !Point::orient(&self.tree[*a], &self.tree[*b], &self.tree[*c]).is_ccw() {
        return Err(Error::ConvexViolation);
      }
    }
    Ok(())
  }

  fn insert_seed(&mut self, point: Point<T>) -> Result<Insertion, Error> {
    let anchor = Anchor::seed(&point, self.next_epoch());
    debug!("anchoring hull at {:?}", point);
    self.tree.insert(AngleKey::origin(&anchor), point)?;
    self.state = AnchorState::Seed(anchor);
    Ok(Insertion::Accepted { evicted: 0 })
  }

  // The third point moves the anchor to the centroid of the first three.
  fn recenter(&mut self, point: &Point<T>) -> Result<(), Error> {
    let seeds: Vec<Point<T>> = self.hull().copied().collect();
    let centroid = Anchor::centroid([&seeds[0], &seeds[1], point], self.next_epoch());
    debug!(
      "third point {:?}: moving anchor from {:?} to centroid {:?}",
      point,
      self.anchor_ref().rounded(),
      centroid.rounded()
    );
    self.rekey(&centroid)?;
    self.state = AnchorState::Centroid(centroid);
    Ok(())
  }

  // Remove every entry and insert it again, keyed against `anchor`. A point
  // that coincides with the new anchor lies between the other two seeds and
  // is dropped.
  fn rekey(&mut self, anchor: &Anchor<T>) -> Result<(), Error> {
    let handles: Vec<Handle> = self.tree.handles().collect();
    let mut points = Vec::with_capacity(handles.len());
    for handle in handles {
      let (_, point) = self.tree.remove(handle)?;
      points.push(point);
    }
    for point in points {
      match AngleKey::new(anchor, &point) {
        Ok(key) => {
          self.admit(key, point)?;
        }
        Err(Error::DegenerateAngle) => trace!("{:?} coincides with the new anchor", point),
        Err(err) => return Err(err),
      }
    }
    Ok(())
  }

  // Insert with the replace-if-farther policy for points on the same ray.
  fn admit(&mut self, key: AngleKey<T>, point: Point<T>) -> Result<Admission, Error> {
    let probe = key.clone();
    match self.tree.insert(key, point) {
      Ok(handle) => Ok(Admission::Fresh(handle)),
      Err(Error::DuplicateKey) => {
        let existing = self.tree.find(&probe).ok_or(Error::DuplicateKey)?;
        if AngleKey::cmp_reach(&probe, self.tree.key(existing)) == Ordering::Greater {
          let (_, nearer) = self.tree.remove(existing)?;
          trace!("{:?} replaces {:?} on the same ray", point, nearer);
          Ok(Admission::Replaced(self.tree.insert(probe, point)?))
        } else {
          trace!("{:?} is shadowed by {:?}", point, self.tree[existing]);
          Ok(Admission::Shadowed)
        }
      }
      Err(err) => Err(err),
    }
  }

  fn anchor_ref(&self) -> &Anchor<T> {
    match &self.state {
      AnchorState::Seed(anchor) | AnchorState::Centroid(anchor) => anchor,
      AnchorState::Unset => unreachable!("hull has points but no anchor"),
    }
  }

  fn next_epoch(&mut self) -> u32 {
    self.epoch = self.epoch.wrapping_add(1);
    self.epoch
  }
}
