use std::iter::Sum;
use std::ops::Add;

use crate::Triangle;

/// Running sums for a single pass over a triangle stream.
///
/// The volume is kept signed until [`GeometryAccumulator::finish`]. Taking the
/// absolute value of individual contributions would break the cancellation
/// between facets and overstate the volume of any non-convex mesh.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeometryAccumulator {
    signed_volume: f64,
    surface_area: f64,
    triangles: usize,
}

impl GeometryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, t: &Triangle) {
        self.signed_volume += t.signed_volume();
        self.surface_area += t.area();
        self.triangles += 1;
    }

    /// The raw volume sum. Negative for a mesh wound clockwise.
    pub fn signed_volume(&self) -> f64 {
        self.signed_volume
    }

    pub fn finish(self) -> GeometryTotals {
        GeometryTotals {
            volume: self.signed_volume.abs(),
            surface_area: self.surface_area,
            triangles: self.triangles,
        }
    }
}

impl Extend<Triangle> for GeometryAccumulator {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        for t in iter {
            self.add(&t);
        }
    }
}

/// Enclosed volume and surface area of a mesh, in the mesh's native units.
///
/// For STL input that is cubic and square millimeters. Conversion to other
/// units is left to the caller.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeometryTotals {
    pub volume: f64,
    pub surface_area: f64,
    pub triangles: usize,
}

impl GeometryTotals {
    /// Consumes the stream once, without collecting it.
    pub fn from_triangles<I: IntoIterator<Item = Triangle>>(triangles: I) -> Self {
        let mut acc = GeometryAccumulator::new();
        acc.extend(triangles);
        acc.finish()
    }

    pub fn is_finite(&self) -> bool {
        self.volume.is_finite() && self.surface_area.is_finite()
    }
}

/// Combines the totals of separate meshes. Each operand has already been
/// made non-negative, so parts do not cancel each other out.
impl Add for GeometryTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            volume: self.volume + rhs.volume,
            surface_area: self.surface_area + rhs.surface_area,
            triangles: self.triangles + rhs.triangles,
        }
    }
}

impl Sum for GeometryTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |a, b| a + b)
    }
}
