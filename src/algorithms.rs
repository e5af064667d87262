pub mod convex_hull;

#[doc(inline)]
pub use convex_hull::graham_scan::convex_hull;

#[doc(inline)]
pub use convex_hull::incremental::{HullTree, IncrementalHull, Insertion, Phase};
