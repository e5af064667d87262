// #![deny(warnings)]
#![deny(clippy::cast_lossless)]
#![doc(test(no_crate_inject))]
//! Incremental convex hulls.
//!
//! Points are fed one at a time into an [`IncrementalHull`](algorithms::IncrementalHull).
//! The hull is kept in a [`CircularTree`](data::CircularTree) ordered by the
//! angle each vertex makes with a fixed interior anchor, so an insertion only
//! touches the vertices it invalidates.
//!
//! Coordinates follow screen conventions: `y` grows downwards.
use num_bigint::BigInt;
use num_traits::*;
use std::fmt::Debug;
use std::hash::Hash;

pub mod algorithms;
pub mod data;
mod orientation;

pub use orientation::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The key is already present in the tree.
  DuplicateKey,
  /// The handle refers to an entry that has been removed.
  StaleHandle,
  /// Navigation was attempted on a tree without entries.
  EmptyTree,
  /// A point coincides with the anchor and has no direction.
  DegenerateAngle,
  /// Three consecutive hull vertices are either colinear or oriented clockwise.
  ConvexViolation,
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
    match self {
      Error::DuplicateKey => write!(f, "Duplicate key"),
      Error::StaleHandle => write!(f, "Stale handle"),
      Error::EmptyTree => write!(f, "Empty tree"),
      Error::DegenerateAngle => write!(f, "Point coincides with the anchor"),
      Error::ConvexViolation => write!(f, "Convex violation"),
    }
  }
}

impl std::error::Error for Error {}

/// Integer coordinates with an exact, wider type for products.
///
/// Every predicate in this crate (orientation, angular order, distance
/// comparisons) is evaluated in `Wide`, which is large enough to hold the
/// products of coordinate differences scaled by the anchor denominator. No
/// predicate can overflow, for any input.
pub trait HullScalar: Debug + Copy + Ord + Hash + PrimInt + Signed + NumCast {
  type Wide: Debug
    + Clone
    + Ord
    + Signed
    + ToPrimitive
    + From<Self>
    + From<u8>;

  fn widen(self) -> Self::Wide {
    Self::Wide::from(self)
  }
}

macro_rules! fixed_precision {
  ( $ty:ty, $wide:ty ) => {
    impl HullScalar for $ty {
      type Wide = $wide;
    }
  };
}

macro_rules! arbitrary_precision {
  ( $( $ty:ty ),* ) => {
    $(
      impl HullScalar for $ty {
        type Wide = BigInt;
      }
    )*
  };
}

fixed_precision!(i8, i64);
fixed_precision!(i16, i64);
fixed_precision!(i32, i128);
arbitrary_precision!(i64, isize);

#[cfg(test)]
pub mod testing;
