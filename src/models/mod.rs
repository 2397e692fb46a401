mod atlas;
mod geometry;
mod language;
mod rank;

pub use atlas::{Atlas, Region};
pub use geometry::{BoundingBox, Point, Polygon, Ring};
pub use language::{Language, Text};
pub use rank::Rank;
