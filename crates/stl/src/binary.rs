use std::slice::ChunksExact;

use byteorder::{ByteOrder, LittleEndian};
use printquote_mesh::{Point3, Triangle};

use crate::{StlError, BINARY_PREAMBLE_LEN, BINARY_RECORD_LEN, HEADER_LEN};

/// Triangles of a binary STL, decoded one record at a time.
pub struct BinaryTriangles<'a> {
    header: &'a [u8],
    records: ChunksExact<'a, u8>,
}

impl<'a> BinaryTriangles<'a> {
    pub fn new(data: &'a [u8]) -> crate::Result<Self> {
        if data.len() < BINARY_PREAMBLE_LEN {
            return Err(StlError::MalformedMesh(format!(
                "binary STL needs at least {BINARY_PREAMBLE_LEN} bytes, found {}",
                data.len()
            )));
        }

        // Binary files start with an 80 byte header. There is no defined structure for this
        // header but some implementations will stash some metadata in this header. Some
        // exporters even start it with `solid`, so it is never interpreted.
        let header = &data[..HEADER_LEN];

        // Immediately following the header is an unsigned 32-bit integer that indicates the
        // number of triangles that follow.
        let n_triangles = LittleEndian::read_u32(&data[HEADER_LEN..BINARY_PREAMBLE_LEN]);
        let end = BINARY_PREAMBLE_LEN as u64 + BINARY_RECORD_LEN as u64 * u64::from(n_triangles);
        if end > data.len() as u64 {
            return Err(StlError::MalformedMesh(format!(
                "header declares {n_triangles} triangles but only {} bytes of triangle data follow",
                data.len() - BINARY_PREAMBLE_LEN
            )));
        }

        Ok(Self {
            header,
            records: data[BINARY_PREAMBLE_LEN..end as usize].chunks_exact(BINARY_RECORD_LEN),
        })
    }

    pub fn header(&self) -> &'a [u8] {
        self.header
    }
}

fn read_point(bytes: &[u8]) -> Point3 {
    Point3::new(
        LittleEndian::read_f32(&bytes[0..4]).into(),
        LittleEndian::read_f32(&bytes[4..8]).into(),
        LittleEndian::read_f32(&bytes[8..12]).into(),
    )
}

impl<'a> Iterator for BinaryTriangles<'a> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Triangle> {
        let record = self.records.next()?;
        // Each triangle is specified by a normal vector followed by 3 vertices of the
        // triangle. The normal is frequently left as (0, 0, 0) and the winding of the
        // vertices is what counts, so bytes 0..12 are skipped.
        //
        // After the triangle geometry there is a 2-byte unsigned integer called the
        // "attribute byte count". There is no standard structure of this field, but
        // some applications use this for color data. It is ignored as well.
        Some(Triangle {
            p0: read_point(&record[12..24]),
            p1: read_point(&record[24..36]),
            p2: read_point(&record[36..48]),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for BinaryTriangles<'_> {}
