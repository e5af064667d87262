use num_traits::{NumCast, Signed, Zero};
use std::cmp::Ordering;

use super::Point;
use crate::{Error, HullScalar, Orientation};

/// Reference point that every [`AngleKey`] is measured from.
///
/// The anchor is stored exactly, as numerators over a small denominator, so a
/// centroid anchor carries no rounding error. Every anchor has an `epoch`:
/// keys computed against different anchors must never be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<T: HullScalar> {
  numer: [T::Wide; 2],
  denom: u8,
  epoch: u32,
}

impl<T: HullScalar> Anchor<T> {
  /// Anchor located exactly at `point`.
  pub fn seed(point: &Point<T>, epoch: u32) -> Anchor<T> {
    Anchor {
      numer: [point[0].widen(), point[1].widen()],
      denom: 1,
      epoch,
    }
  }

  /// Anchor located at the exact centroid of three points.
  pub fn centroid(pts: [&Point<T>; 3], epoch: u32) -> Anchor<T> {
    let sum = |i: usize| pts[0][i].widen() + pts[1][i].widen() + pts[2][i].widen();
    Anchor {
      numer: [sum(0), sum(1)],
      denom: 3,
      epoch,
    }
  }

  pub fn epoch(&self) -> u32 {
    self.epoch
  }

  /// Nearest lattice point, rounding halves away from zero.
  ///
  /// ```rust
  /// # use angular_hull::data::{Anchor, Point};
  /// let pts = [Point::new([30, 60]), Point::new([40, 70]), Point::new([51, 81])];
  /// let anchor = Anchor::centroid([&pts[0], &pts[1], &pts[2]], 1);
  /// assert_eq!(anchor.rounded(), Point::new([40, 70]));
  /// ```
  pub fn rounded(&self) -> Point<T> {
    let denom = T::Wide::from(self.denom);
    let round = |n: &T::Wide| {
      let quot = n.clone() / denom.clone();
      let rem = n.clone() % denom.clone();
      let twice = rem.abs() * T::Wide::from(2u8);
      let quot = if twice >= denom {
        quot + n.signum()
      } else {
        quot
      };
      <T as NumCast>::from(quot).expect("anchor lies within the coordinate range")
    };
    Point::new([round(&self.numer[0]), round(&self.numer[1])])
  }

  /// Direction from the anchor to `point`, scaled by the anchor denominator.
  pub fn direction(&self, point: &Point<T>) -> [T::Wide; 2] {
    let denom = T::Wide::from(self.denom);
    [
      denom.clone() * point[0].widen() - self.numer[0].clone(),
      denom * point[1].widen() - self.numer[1].clone(),
    ]
  }

  pub fn coincides_with(&self, point: &Point<T>) -> bool {
    let [dx, dy] = self.direction(point);
    dx.is_zero() && dy.is_zero()
  }
}

/// Half-plane partition of directions around the anchor.
///
/// `Upper` holds every direction from east (inclusive) through north to west
/// (exclusive), `Lower` the rest. `Origin` only labels the seed anchor's own
/// entry and sorts before everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
  Origin,
  Upper,
  Lower,
}

/// Exact angular position of a point around an [`Anchor`].
///
/// Keys increase counter-clockwise on screen starting from due east. Within a
/// sector every direction spans less than half a turn, so two keys compare by
/// the sign of the cross product of their directions alone. Two keys are equal
/// iff their points lie on the same ray from the anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AngleKey<T: HullScalar> {
  epoch: u32,
  sector: Sector,
  direction: [T::Wide; 2],
}

/// Angular key of `point` around `anchor`.
///
/// # Errors
/// Returns [`Error::DegenerateAngle`] if `point` coincides with the anchor.
pub fn angle_key<T>(anchor: &Anchor<T>, point: &Point<T>) -> Result<AngleKey<T>, Error>
where
  T: HullScalar,
{
  AngleKey::new(anchor, point)
}

impl<T: HullScalar> AngleKey<T> {
  pub fn new(anchor: &Anchor<T>, point: &Point<T>) -> Result<AngleKey<T>, Error> {
    let direction = anchor.direction(point);
    let [dx, dy] = &direction;
    let sector = if dy.is_negative() || (dy.is_zero() && dx.is_positive()) {
      Sector::Upper
    } else if dy.is_zero() && dx.is_zero() {
      return Err(Error::DegenerateAngle);
    } else {
      Sector::Lower
    };
    Ok(AngleKey {
      epoch: anchor.epoch,
      sector,
      direction,
    })
  }

  /// Key of the seed anchor itself.
  pub(crate) fn origin(anchor: &Anchor<T>) -> AngleKey<T> {
    AngleKey {
      epoch: anchor.epoch,
      sector: Sector::Origin,
      direction: [T::Wide::zero(), T::Wide::zero()],
    }
  }

  pub fn epoch(&self) -> u32 {
    self.epoch
  }

  pub fn sector(&self) -> Sector {
    self.sector
  }

  pub fn direction(&self) -> &[T::Wide; 2] {
    &self.direction
  }

  /// Counter-clockwise order around the shared anchor.
  pub fn cmp_around(a: &AngleKey<T>, b: &AngleKey<T>) -> Ordering {
    debug_assert_eq!(a.epoch, b.epoch, "angle keys from different anchors");
    a.sector.cmp(&b.sector).then_with(|| {
      match Orientation::of_vectors(&a.direction, &b.direction) {
        Orientation::CounterClockWise => Ordering::Less,
        Orientation::ClockWise => Ordering::Greater,
        Orientation::CoLinear => Ordering::Equal,
      }
    })
  }

  /// Compare how far from the anchor the two keyed points are.
  pub fn cmp_reach(a: &AngleKey<T>, b: &AngleKey<T>) -> Ordering {
    let len = |d: &[T::Wide; 2]| d[0].clone() * d[0].clone() + d[1].clone() * d[1].clone();
    len(&a.direction).cmp(&len(&b.direction))
  }
}
