use log::debug;
use printquote_mesh::{Point3, Triangle};

const VERTEX: &[u8] = b"vertex";

fn is_number_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')
}

/// Vertex positions of a text STL in order of appearance.
///
/// Only `vertex` directives are significant. Everything else, including
/// `facet normal`, loop markers and solid names, is skipped over. A directive
/// that is not followed by three parseable numbers is dropped.
struct Vertices<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Vertices<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn find_directive(&self) -> Option<usize> {
        self.data[self.pos..]
            .windows(VERTEX.len())
            .position(|w| w == VERTEX)
            .map(|offset| self.pos + offset)
    }

    /// Reads `<whitespace><number>` at `pos`, returning the value and the position after it.
    fn coordinate(&self, pos: usize) -> Option<(f64, usize)> {
        let rest = &self.data[pos..];
        let start = rest.iter().position(|b| !b.is_ascii_whitespace())?;
        if start == 0 {
            return None;
        }
        let len = rest[start..]
            .iter()
            .position(|&b| !is_number_byte(b))
            .unwrap_or(rest.len() - start);
        if len == 0 {
            return None;
        }
        let token = std::str::from_utf8(&rest[start..start + len]).ok()?;
        let value = token.parse::<f64>().ok()?;
        Some((value, pos + start + len))
    }

    fn point(&self, pos: usize) -> Option<(Point3, usize)> {
        let (x, pos) = self.coordinate(pos)?;
        let (y, pos) = self.coordinate(pos)?;
        let (z, pos) = self.coordinate(pos)?;
        Some((Point3::new(x, y, z), pos))
    }
}

impl<'a> Iterator for Vertices<'a> {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        loop {
            let start = self.find_directive()?;
            self.pos = start + VERTEX.len();
            match self.point(self.pos) {
                Some((p, end)) => {
                    self.pos = end;
                    return Some(p);
                }
                None => debug!("skipping malformed vertex directive at byte {start}"),
            }
        }
    }
}

/// Triangles of a text STL.
///
/// Vertices are grouped in threes as they appear. One or two vertices left
/// over at the end of the file do not form a triangle and are dropped.
pub struct AsciiTriangles<'a> {
    vertices: Vertices<'a>,
}

impl<'a> AsciiTriangles<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            vertices: Vertices::new(data),
        }
    }
}

impl<'a> Iterator for AsciiTriangles<'a> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        let p0 = self.vertices.next()?;
        let p1 = self.vertices.next()?;
        let p2 = self.vertices.next()?;
        Some(Triangle { p0, p1, p2 })
    }
}
