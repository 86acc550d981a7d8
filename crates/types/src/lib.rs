pub mod geometry;

pub use geometry::{Bounds, BoundsParseError, Point};
