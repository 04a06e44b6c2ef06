//! Decoding of binary and text STL files into a stream of triangles.
//!
//! The two encodings are told apart by structure rather than by content:
//! a binary file is exactly as long as its header says it should be. Many
//! exporters write `solid` at the start of a binary header, so looking for
//! that keyword is not reliable.

mod ascii;
mod binary;
mod error;

pub use ascii::AsciiTriangles;
pub use binary::BinaryTriangles;
pub use error::{Result, StlError};

use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use printquote_mesh::{GeometryTotals, Triangle};

pub const HEADER_LEN: usize = 80;
/// Header plus the `u32` triangle count.
pub const BINARY_PREAMBLE_LEN: usize = HEADER_LEN + 4;
/// Normal, three vertices and the attribute byte count.
pub const BINARY_RECORD_LEN: usize = 50;
/// Length of the smallest text solid holding one complete facet. Text input at
/// least this long that yields no triangles is rejected as malformed.
pub const MIN_FACET_TEXT_LEN: usize = 101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Binary,
    Ascii,
}

/// Triangle count from a binary header, if the buffer is long enough to have one.
pub fn declared_triangle_count(data: &[u8]) -> Option<u32> {
    data.get(HEADER_LEN..BINARY_PREAMBLE_LEN)
        .map(LittleEndian::read_u32)
}

pub fn detect_format(data: &[u8]) -> StlFormat {
    let Some(n_triangles) = declared_triangle_count(data) else {
        return StlFormat::Ascii;
    };
    let expected = BINARY_PREAMBLE_LEN as u64 + BINARY_RECORD_LEN as u64 * u64::from(n_triangles);
    if expected == data.len() as u64 {
        StlFormat::Binary
    } else {
        StlFormat::Ascii
    }
}

/// A single pass over the triangles of either encoding.
pub enum Triangles<'a> {
    Binary(BinaryTriangles<'a>),
    Ascii(AsciiTriangles<'a>),
}

impl<'a> Triangles<'a> {
    pub fn format(&self) -> StlFormat {
        match self {
            Triangles::Binary(_) => StlFormat::Binary,
            Triangles::Ascii(_) => StlFormat::Ascii,
        }
    }
}

impl<'a> Iterator for Triangles<'a> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        match self {
            Triangles::Binary(t) => t.next(),
            Triangles::Ascii(t) => t.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Triangles::Binary(t) => t.size_hint(),
            Triangles::Ascii(t) => t.size_hint(),
        }
    }
}

pub fn parse_stl(data: &[u8]) -> Result<Triangles<'_>> {
    match detect_format(data) {
        StlFormat::Binary => BinaryTriangles::new(data).map(Triangles::Binary),
        StlFormat::Ascii => Ok(Triangles::Ascii(AsciiTriangles::new(data))),
    }
}

/// Decodes `data` and accumulates its volume and surface area in one pass.
pub fn measure(data: &[u8]) -> Result<GeometryTotals> {
    let triangles = parse_stl(data)?;
    let format = triangles.format();
    let totals = GeometryTotals::from_triangles(triangles);

    if format == StlFormat::Ascii && totals.triangles == 0 && data.len() >= MIN_FACET_TEXT_LEN {
        return Err(StlError::MalformedMesh(format!(
            "no complete facets found in {} bytes of text",
            data.len()
        )));
    }

    debug!(
        "{:?} STL: {} triangles, {:.3} mm3, {:.3} mm2",
        format, totals.triangles, totals.volume, totals.surface_area
    );
    Ok(totals)
}

pub fn read_stl_bytes<R: Read>(mut r: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    r.read_to_end(&mut data)?;
    Ok(data)
}

pub fn read_stl_file<P: AsRef<Path>>(p: P) -> Result<Vec<u8>> {
    let f = std::fs::File::open(p)?;
    read_stl_bytes(f)
}
