use byteorder::{ByteOrder, LittleEndian};

/// Three vertices of one facet, in file order.
pub type Facet = [[f32; 3]; 3];

/// A generated mesh along with the geometry it is known to enclose.
pub struct TestModel {
    pub facets: Vec<Facet>,
    pub volume_mm3: f64,
    pub surface_area_mm2: f64,
}

impl TestModel {
    pub fn binary(&self) -> Vec<u8> {
        binary_stl(b"printquote test model", &self.facets)
    }

    pub fn ascii(&self, name: &str) -> String {
        ascii_stl(name, &self.facets)
    }

    /// Same surface with every facet wound the other way.
    pub fn reversed(&self) -> TestModel {
        TestModel {
            facets: self.facets.iter().map(|f| [f[0], f[2], f[1]]).collect(),
            volume_mm3: self.volume_mm3,
            surface_area_mm2: self.surface_area_mm2,
        }
    }
}

/// An axis aligned box with outward facing (counter-clockwise) facets.
pub fn cuboid(origin: [f32; 3], size: [f32; 3]) -> TestModel {
    let [x0, y0, z0] = origin;
    let [x1, y1, z1] = [x0 + size[0], y0 + size[1], z0 + size[2]];

    //      v7 ------ v6
    //     / |       / |
    //   v4 ------ v5  |
    //    |  v3 ----|- v2
    //    | /       | /
    //   v0 ------ v1
    let v0 = [x0, y0, z0];
    let v1 = [x1, y0, z0];
    let v2 = [x1, y1, z0];
    let v3 = [x0, y1, z0];
    let v4 = [x0, y0, z1];
    let v5 = [x1, y0, z1];
    let v6 = [x1, y1, z1];
    let v7 = [x0, y1, z1];

    let facets = vec![
        // bottom (-z)
        [v0, v2, v1],
        [v0, v3, v2],
        // top (+z)
        [v4, v5, v6],
        [v4, v6, v7],
        // front (-y)
        [v0, v1, v5],
        [v0, v5, v4],
        // back (+y)
        [v3, v7, v6],
        [v3, v6, v2],
        // left (-x)
        [v0, v4, v7],
        [v0, v7, v3],
        // right (+x)
        [v1, v2, v6],
        [v1, v6, v5],
    ];

    let [dx, dy, dz] = size.map(f64::from);
    TestModel {
        facets,
        volume_mm3: dx * dy * dz,
        surface_area_mm2: 2.0 * (dx * dy + dy * dz + dz * dx),
    }
}

pub fn cube(side: f32) -> TestModel {
    cuboid([0.0, 0.0, 0.0], [side, side, side])
}

/// Encodes facets as a binary STL. The header is truncated or zero padded to 80 bytes.
pub fn binary_stl(header: &[u8], facets: &[Facet]) -> Vec<u8> {
    let mut data = vec![0u8; 84 + 50 * facets.len()];
    let n = header.len().min(80);
    data[..n].copy_from_slice(&header[..n]);
    LittleEndian::write_u32(&mut data[80..84], facets.len() as u32);

    for (facet, record) in facets.iter().zip(data[84..].chunks_exact_mut(50)) {
        // Normals are left as (0, 0, 0), which readers are expected to tolerate.
        for (vertex, out) in facet.iter().zip(record[12..48].chunks_exact_mut(12)) {
            LittleEndian::write_f32_into(vertex, out);
        }
    }
    data
}

pub fn ascii_stl(name: &str, facets: &[Facet]) -> String {
    let mut s = format!("solid {name}\n");
    for facet in facets {
        s.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in facet {
            s.push_str(&format!("      vertex {x:e} {y:e} {z:e}\n"));
        }
        s.push_str("    endloop\n  endfacet\n");
    }
    s.push_str(&format!("endsolid {name}\n"));
    s
}

/// A binary header that a naive sniffer would take for a text file.
pub const SOLID_HEADER: &[u8] = b"solid exported by a CAD tool that ignores the binary convention";
