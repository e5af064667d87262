pub mod graham_scan;
pub mod incremental;

pub use incremental::{IncrementalHull, Insertion, Phase};
