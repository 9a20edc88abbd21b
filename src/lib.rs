//! Reader for Discreet 3D Studio (.3ds) scenes.
//!
//! `read_3ds` decodes a file into an `ObjectMesh`: named objects holding
//! triangle meshes, lights and cameras, plus materials, scene settings and
//! keyframer tracks. Normals and tangent frames aren't stored in the format;
//! compute them with `geometry::NormalGenerator`.

#![recursion_limit = "1024"] // for error_chain

#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;
extern crate cgmath;

pub mod errors;
#[macro_use]
pub mod util;
pub mod discreet;
pub mod geometry;

pub use crate::discreet::{read_3ds, read_3ds_from, read_3ds_with, ReadOptions, SizeMismatch};
pub use crate::discreet::scene::{ObjectBlock, ObjectMesh, TriangleMesh};
pub use crate::geometry::NormalGenerator;
