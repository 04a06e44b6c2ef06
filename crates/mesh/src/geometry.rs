use cgmath::InnerSpace;

/// A vertex position in the mesh's native unit (millimeters for STL).
pub type Point3 = cgmath::Vector3<f64>;

// Triangles are handed between request threads by value.
static_assertions::assert_impl_all!(Triangle: Send, Sync, Copy);

#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Triangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
}

impl Triangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self { p0, p1, p2 }
    }

    /// Signed volume of the tetrahedron spanned by this triangle and the origin.
    ///
    /// The sign follows the winding: counter-clockwise when seen from outside
    /// gives a positive contribution. Summed over a closed, consistently wound
    /// mesh the contributions of facets facing towards and away from the
    /// origin cancel, leaving the enclosed volume wherever the origin is.
    pub fn signed_volume(&self) -> f64 {
        let (a, b, c) = (self.p0, self.p1, self.p2);
        (a.x * (b.y * c.z - b.z * c.y) - a.y * (b.x * c.z - b.z * c.x)
            + a.z * (b.x * c.y - b.y * c.x))
            / 6.0
    }

    pub fn area(&self) -> f64 {
        let u = self.p1 - self.p0;
        let v = self.p2 - self.p0;
        0.5 * u.cross(v).magnitude()
    }

    /// The same triangle with the opposite winding.
    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p0,
            p1: self.p2,
            p2: self.p1,
        }
    }
}

impl std::default::Default for Triangle {
    fn default() -> Self {
        let origin = Point3::new(0.0, 0.0, 0.0);
        Self {
            p0: origin,
            p1: origin,
            p2: origin,
        }
    }
}

impl From<[[f32; 3]; 3]> for Triangle {
    fn from(facet: [[f32; 3]; 3]) -> Self {
        let [p0, p1, p2] = facet.map(|[x, y, z]| Point3::new(x.into(), y.into(), z.into()));
        Self { p0, p1, p2 }
    }
}
