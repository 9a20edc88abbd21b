//! Writing chunk streams for tests.

pub fn chunk(id: u16, payload: &[u8]) -> Vec<u8> {
    let size = (payload.len() + 6) as u32;
    let mut v = Vec::with_capacity(size as usize);
    v.extend_from_slice(&id.to_le_bytes());
    v.extend_from_slice(&size.to_le_bytes());
    v.extend_from_slice(payload);
    v
}

/// Little-endian payload builder.
#[derive(Default)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new() -> Bytes { Bytes(vec![]) }

    pub fn u8s(mut self, xs: &[u8]) -> Bytes {
        self.0.extend_from_slice(xs);
        self
    }

    pub fn u16(mut self, x: u16) -> Bytes {
        self.0.extend_from_slice(&x.to_le_bytes());
        self
    }

    pub fn u16s(self, xs: &[u16]) -> Bytes {
        xs.iter().fold(self, |b, &x| b.u16(x))
    }

    pub fn u32(mut self, x: u32) -> Bytes {
        self.0.extend_from_slice(&x.to_le_bytes());
        self
    }

    pub fn u32s(self, xs: &[u32]) -> Bytes {
        xs.iter().fold(self, |b, &x| b.u32(x))
    }

    pub fn f32(self, x: f32) -> Bytes {
        self.u32(x.to_bits())
    }

    pub fn f32s(self, xs: &[f32]) -> Bytes {
        xs.iter().fold(self, |b, &x| b.f32(x))
    }

    pub fn cstr(mut self, s: &str) -> Bytes {
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        self
    }

    /// Appends a whole child chunk.
    pub fn chunk(mut self, id: u16, payload: &[u8]) -> Bytes {
        self.0.extend(chunk(id, payload));
        self
    }

    pub fn build(self) -> Vec<u8> { self.0 }
}

/// A whole file: the main chunk around a mesh data chunk with the given
/// children.
pub fn file_with_mesh_data(mesh_data: &[u8]) -> Vec<u8> {
    use super::chunk_ids::*;
    chunk(MAIN, &Bytes::new()
        .chunk(VERSION, &Bytes::new().u32(3).build())
        .chunk(MESH_DATA, mesh_data)
        .build())
}

/// A named object holding one triangle mesh with the given children.
pub fn named_tri_mesh(name: &str, tri_mesh: &[u8]) -> Vec<u8> {
    use super::chunk_ids::*;
    chunk(NAMED_OBJECT, &Bytes::new()
        .cstr(name)
        .chunk(TRI_MESH, tri_mesh)
        .build())
}
