//! STL decoding (binary and ASCII) into an ordered [`Mesh`].
//!
//! The stored facet normals are ignored; normals are recomputed from the
//! vertex winding at construction. Zero-area facets, common in real-world
//! exports, are skipped rather than treated as fatal.

use std::path::Path;

use pinbed_math::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Binary STL layout: 80-byte header, u32 facet count, then 50 bytes per
/// facet (normal, 3 vertices as f32 triples, u16 attribute count).
const BINARY_HEADER_LEN: usize = 84;
const FACET_RECORD_LEN: usize = 50;

/// Read and decode an STL file.
pub fn read_stl(path: &Path) -> Result<Mesh> {
    let data = std::fs::read(path)?;
    decode_stl(&data)
}

/// Decode STL data, sniffing between the ASCII and binary formats.
///
/// Binary files may also begin with `solid`, so the sniff requires the
/// ASCII facet grammar to actually be present.
pub fn decode_stl(data: &[u8]) -> Result<Mesh> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if text.contains("facet") {
                return decode_ascii(text);
            }
        }
    }
    decode_binary(data)
}

fn decode_binary(data: &[u8]) -> Result<Mesh> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(MeshError::MalformedStl(format!(
            "file too small for binary header: {} bytes",
            data.len()
        )));
    }

    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected = BINARY_HEADER_LEN + count * FACET_RECORD_LEN;
    if data.len() < expected {
        return Err(MeshError::MalformedStl(format!(
            "truncated: expected {} bytes for {} facets, got {}",
            expected,
            count,
            data.len()
        )));
    }

    let mut triangles = Vec::with_capacity(count);
    let mut offset = BINARY_HEADER_LEN;
    for _ in 0..count {
        // Skip the stored normal
        let v1 = read_point(data, offset + 12);
        let v2 = read_point(data, offset + 24);
        let v3 = read_point(data, offset + 36);
        offset += FACET_RECORD_LEN;

        match Triangle::new(v1, v2, v3) {
            Ok(t) => triangles.push(t),
            Err(MeshError::DegenerateTriangle) => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(Mesh::new(triangles))
}

fn read_point(data: &[u8], offset: usize) -> Point3 {
    let f = |o: usize| {
        f32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]) as f64
    };
    Point3::new(f(offset), f(offset + 4), f(offset + 8))
}

fn decode_ascii(text: &str) -> Result<Mesh> {
    let mut triangles = Vec::new();
    let mut pending: Vec<Point3> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("vertex") {
            continue;
        }

        let mut coord = || -> Result<f64> {
            tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(|| {
                    MeshError::MalformedStl(format!("bad vertex on line {}", line_no + 1))
                })
        };
        let (x, y, z) = (coord()?, coord()?, coord()?);
        pending.push(Point3::new(x, y, z));

        if pending.len() == 3 {
            match Triangle::new(pending[0], pending[1], pending[2]) {
                Ok(t) => triangles.push(t),
                Err(MeshError::DegenerateTriangle) => {}
                Err(e) => return Err(e),
            }
            pending.clear();
        }
    }

    if !pending.is_empty() {
        return Err(MeshError::MalformedStl(format!(
            "facet with {} vertices at end of file",
            pending.len()
        )));
    }

    Ok(Mesh::new(triangles))
}
