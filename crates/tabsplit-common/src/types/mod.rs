mod browser;
mod geometry;

pub use browser::*;
pub use geometry::*;
