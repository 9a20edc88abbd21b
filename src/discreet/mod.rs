//! Discreet 3D Studio (.3ds) files.
//!
//! A .3ds file is a tree of chunks. `chunk` walks the tree, the other
//! modules know what the chunks mean, and `scene` holds the result.

pub mod chunk;
pub mod chunk_ids;
pub mod color;
pub mod keyframe;
pub mod light;
pub mod material;
mod read;
pub mod scene;
#[cfg(test)]
pub mod test_bytes;

pub use self::chunk::{ReadOptions, SizeMismatch};
pub use self::scene::{ObjectBlock, ObjectMesh, TriangleMesh};

use crate::errors::Result;
use std::io::Read;

/// Decodes a whole .3ds file with the default (lenient) options.
pub fn read_3ds(buf: &[u8]) -> Result<ObjectMesh> {
    read_3ds_with(buf, ReadOptions::default())
}

pub fn read_3ds_with(buf: &[u8], opts: ReadOptions) -> Result<ObjectMesh> {
    read::read_file(buf, &opts)
}

/// Buffers all of `r` and decodes it.
pub fn read_3ds_from<R: Read>(mut r: R, opts: ReadOptions) -> Result<ObjectMesh> {
    let mut buf = vec![];
    r.read_to_end(&mut buf)?;
    read_3ds_with(&buf, opts)
}
