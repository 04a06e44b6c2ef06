mod geometry;
mod totals;

pub use geometry::*;
pub use totals::*;
