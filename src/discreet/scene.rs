//! The decoded scene.
//!
//! Plain data records, owned strictly top-down: an `ObjectMesh` owns its
//! blocks, materials and keyframes; blocks own their meshes, lights and
//! cameras. Nothing points back up.

use super::keyframe::KeyframeBlock;
use super::light::{CameraBlock, LightBlock};
use super::material::MaterialBlock;
use crate::util::grow::padded;

pub type Point = [f32; 3];
pub type Color = [f32; 3];

/// Everything decoded from one .3ds file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMesh {
    /// From the `VERSION` chunk under the main chunk.
    pub version: u32,
    pub mesh_version: u32,
    pub master_scale: f32,
    pub ambient_light: Color,
    pub background: Background,
    pub fog: Fog,
    pub blocks: Vec<ObjectBlock>,
    pub materials: Vec<MaterialBlock>,
    pub keyframes: Vec<KeyframeBlock>,
}

impl Default for ObjectMesh {
    fn default() -> ObjectMesh {
        ObjectMesh {
            version: 0,
            mesh_version: 0,
            master_scale: 1.0,
            ambient_light: [0.0; 3],
            background: Background::default(),
            fog: Fog::default(),
            blocks: padded(),
            materials: padded(),
            keyframes: padded(),
        }
    }
}

impl ObjectMesh {
    pub fn num_blocks(&self) -> usize { self.blocks.len() }
    pub fn num_materials(&self) -> usize { self.materials.len() }
    pub fn num_keyframes(&self) -> usize { self.keyframes.len() }

    pub fn meshes(&self) -> impl Iterator<Item = &TriangleMesh> {
        self.blocks.iter().flat_map(|block| block.meshes.iter())
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut TriangleMesh> {
        self.blocks.iter_mut().flat_map(|block| block.meshes.iter_mut())
    }

    pub fn find_material(&self, name: &str) -> Option<&MaterialBlock> {
        self.materials.iter().find(|mat| mat.name == name)
    }
}

/// Which background the scene uses, and the parameters of each kind that
/// was present in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Background {
    pub selected: BackgroundKind,
    pub bitmap: Option<String>,
    pub solid: Option<Color>,
    pub gradient: Option<Gradient>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackgroundKind {
    None,
    Bitmap,
    Solid,
    Gradient,
}

impl Default for BackgroundKind {
    fn default() -> BackgroundKind { BackgroundKind::None }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Gradient {
    pub midpoint: f32,
    pub top: Color,
    pub middle: Color,
    pub bottom: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fog {
    pub selected: FogKind,
    pub linear: Option<LinearFog>,
    pub layer: Option<LayerFog>,
    pub distance_cue: Option<DistanceCue>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FogKind {
    None,
    Linear,
    Layer,
    DistanceCue,
}

impl Default for FogKind {
    fn default() -> FogKind { FogKind::None }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LinearFog {
    pub near_plane: f32,
    pub near_density: f32,
    pub far_plane: f32,
    pub far_density: f32,
    pub color: Color,
    /// Whether the fog also applies to the background.
    pub fog_background: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LayerFog {
    pub z_min: f32,
    pub z_max: f32,
    pub density: f32,
    pub flags: u32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DistanceCue {
    pub near_plane: f32,
    pub near_dimming: f32,
    pub far_plane: f32,
    pub far_dimming: f32,
    pub dim_background: bool,
}

/// A named object. Usually holds exactly one of a mesh, a light or a camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectBlock {
    pub name: String,
    pub hidden: bool,
    pub meshes: Vec<TriangleMesh>,
    pub lights: Vec<LightBlock>,
    pub cameras: Vec<CameraBlock>,
}

impl ObjectBlock {
    pub fn new(name: String) -> ObjectBlock {
        ObjectBlock {
            name,
            hidden: false,
            meshes: padded(),
            lights: padded(),
            cameras: padded(),
        }
    }

    pub fn num_meshes(&self) -> usize { self.meshes.len() }
    pub fn num_lights(&self) -> usize { self.lights.len() }
    pub fn num_cameras(&self) -> usize { self.cameras.len() }
}

/// Triangle soup with optional texture coordinates and smoothing groups.
///
/// All arrays are flat: `vertices` holds `x, y, z` triples, `tex_coords`
/// holds `u, v` pairs and `faces` holds three vertex indices per face.
///
/// The derived arrays (`normals`, `tangents`, `binormals`) are empty until
/// filled by a `geometry::NormalGenerator`. They are laid out per face-vertex,
/// so face `i`'s corner `s` lives at `9*i + 3*s`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    /// V is stored flipped (`1 - v`) relative to the file.
    pub tex_coords: Option<Vec<f32>>,
    pub faces: Vec<u16>,
    /// One bitmask per face. Faces that share a bit are smoothed together.
    pub smoothgroups: Option<Vec<u32>>,
    /// The 4x3 local coordinate system: X, Y and Z axes, then the origin.
    pub local_coords: Option<[f32; 12]>,
    pub materials: Vec<MaterialData>,
    pub box_map_materials: Option<Vec<String>>,

    pub normals: Vec<f32>,
    pub tangents: Vec<f32>,
    pub binormals: Vec<f32>,
}

impl TriangleMesh {
    pub fn num_vertices(&self) -> usize { self.vertices.len() / 3 }
    pub fn num_faces(&self) -> usize { self.faces.len() / 3 }

    pub fn num_tex_coords(&self) -> usize {
        self.tex_coords.as_ref().map(|tc| tc.len() / 2).unwrap_or(0)
    }

    pub fn vertex(&self, i: usize) -> Point {
        [self.vertices[3*i], self.vertices[3*i+1], self.vertices[3*i+2]]
    }

    pub fn face(&self, i: usize) -> [u16; 3] {
        [self.faces[3*i], self.faces[3*i+1], self.faces[3*i+2]]
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }
}

/// Binds a material, by name, to the faces that use it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialData {
    pub name: String,
    pub faces: Vec<u16>,
}

impl MaterialData {
    pub fn num_faces(&self) -> usize { self.faces.len() }
}
