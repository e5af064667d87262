mod angle;
pub mod circular_tree;
pub(crate) mod point;

pub use angle::{angle_key, Anchor, AngleKey, Sector};
pub use circular_tree::{CircularTree, Handle};
pub use point::Point;
