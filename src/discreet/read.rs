//! Reading the main chunk, the mesh data section and named objects.

use super::chunk::{walk_children, ChunkHeader, Dispatch, ReadOptions};
use super::chunk_ids::*;
use super::color::{read_byte_color, read_color, read_colors};
use super::keyframe::read_keyframes;
use super::light::{read_camera, read_light};
use super::material::read_material;
use super::scene::*;
use crate::errors::{ErrorKind, Result};
use crate::util::cur::Cur;
use crate::util::grow::push_padded;

pub fn read_file(buf: &[u8], opts: &ReadOptions) -> Result<ObjectMesh> {
    let mut cur = Cur::new(buf);

    let header = ChunkHeader::read(&mut cur)?;
    if header.id != MAIN {
        bail!(ErrorKind::NotA3dsFile(header.id));
    }
    let payload_len = header.payload_len();
    if payload_len > cur.bytes_remaining() {
        bail!(ErrorKind::UnexpectedEof(payload_len, cur.bytes_remaining()));
    }
    let mut main = cur.split_off(payload_len)?;
    if cur.bytes_remaining() != 0 {
        debug!("ignoring {} bytes after the main chunk", cur.bytes_remaining());
    }

    let mut mesh = ObjectMesh::default();

    walk_children(&mut main, opts, "main chunk", |header, body| {
        match header.id {
            VERSION => {
                fields!(body, version { version: u32 });
                mesh.version = version;
            }
            MESH_DATA => read_mesh_data(body, opts, &mut mesh)?,
            KEYFRAMES => {
                push_padded(&mut mesh.keyframes, read_keyframes(body, opts)?);
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    info!("read {} objects, {} materials, {} keyframe sections",
        mesh.num_blocks(), mesh.num_materials(), mesh.num_keyframes());

    Ok(mesh)
}

fn read_mesh_data(cur: &mut Cur, opts: &ReadOptions, mesh: &mut ObjectMesh) -> Result<()> {
    walk_children(cur, opts, "mesh data", |header, body| {
        match header.id {
            NAMED_OBJECT => {
                push_padded(&mut mesh.blocks, read_object(body, opts)?);
            }
            MATERIAL => {
                push_padded(&mut mesh.materials, read_material(body, opts)?);
            }
            MASTER_SCALE => mesh.master_scale = body.next::<f32>()?,
            MESH_VERSION => mesh.mesh_version = body.next::<u32>()?,
            AMBIENT_LIGHT => {
                if let Some(color) = read_color(body, opts, "ambient light")? {
                    mesh.ambient_light = color;
                }
            }

            BITMAP => mesh.background.bitmap = Some(body.next_cstr()),
            SOLID_BG => {
                // When there's a linear color after the gamma-corrected one,
                // the linear one wins.
                let colors = read_colors(body, opts, "solid background")?;
                mesh.background.solid = colors.last().cloned();
            }
            V_GRADIENT => {
                fields!(body, v_gradient { midpoint: f32 });
                let colors = read_colors(body, opts, "gradient background")?;
                mesh.background.gradient = Some(gradient(midpoint, &colors));
            }
            USE_BITMAP => mesh.background.selected = BackgroundKind::Bitmap,
            USE_SOLID_BG => mesh.background.selected = BackgroundKind::Solid,
            USE_V_GRADIENT => mesh.background.selected = BackgroundKind::Gradient,

            FOG => mesh.fog.linear = Some(read_linear_fog(body, opts)?),
            LAYER_FOG => mesh.fog.layer = Some(read_layer_fog(body, opts)?),
            DISTANCE_CUE => mesh.fog.distance_cue = Some(read_distance_cue(body, opts)?),
            USE_FOG => mesh.fog.selected = FogKind::Linear,
            USE_LAYER_FOG => mesh.fog.selected = FogKind::Layer,
            USE_DISTANCE_CUE => mesh.fog.selected = FogKind::DistanceCue,

            LOW_SHADOW_BIAS | HI_SHADOW_BIAS | SHADOW_MAP_SIZE | SHADOW_SAMPLES |
            SHADOW_RANGE | SHADOW_FILTER | RAY_BIAS | O_CONST | DEFAULT_VIEW |
            VIEWPORT_LAYOUT_OLD | VIEWPORT_LAYOUT | NETWORK_VIEW => {
                trace!("ignoring render setting {:#06x}", header.id);
                body.skip_rest();
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })
}

/// A gradient has three colors. Files that store both gamma-corrected and
/// linear versions interleave them, six in all; keep the linear ones.
fn gradient(midpoint: f32, colors: &[Color]) -> Gradient {
    let pick = |i: usize| {
        let idx = if colors.len() >= 6 { 2 * i + 1 } else { i };
        colors.get(idx).cloned().unwrap_or([0.0; 3])
    };
    if colors.len() < 3 {
        warn!("gradient background has only {} colors", colors.len());
    }
    Gradient {
        midpoint,
        top: pick(0),
        middle: pick(1),
        bottom: pick(2),
    }
}

/// The color chunks and the "applies to background" flag that follow the
/// fixed fields of a fog chunk.
fn read_fog_extras(
    cur: &mut Cur,
    opts: &ReadOptions,
    what: &'static str,
    background_id: u16,
) -> Result<(Option<Color>, bool)> {
    let mut color = None;
    let mut background = false;
    walk_children(cur, opts, what, |header, body| {
        match header.id {
            COLOR_F | LIN_COLOR_F => {
                let c = body.next::<Point>()?;
                color = color.or(Some(c));
            }
            COLOR_24 | LIN_COLOR_24 => {
                let c = read_byte_color(body)?;
                color = color.or(Some(c));
            }
            id if id == background_id => background = true,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;
    Ok((color, background))
}

fn read_linear_fog(cur: &mut Cur, opts: &ReadOptions) -> Result<LinearFog> {
    fields!(cur, fog {
        near_plane: f32,
        near_density: f32,
        far_plane: f32,
        far_density: f32,
    });
    let (color, fog_background) = read_fog_extras(cur, opts, "fog", FOG_BACKGROUND)?;
    Ok(LinearFog {
        near_plane,
        near_density,
        far_plane,
        far_density,
        color: color.unwrap_or([0.0; 3]),
        fog_background,
    })
}

fn read_layer_fog(cur: &mut Cur, opts: &ReadOptions) -> Result<LayerFog> {
    fields!(cur, layer_fog {
        z_min: f32,
        z_max: f32,
        density: f32,
        flags: u32,
    });
    let color = read_color(cur, opts, "layer fog")?;
    Ok(LayerFog {
        z_min,
        z_max,
        density,
        flags,
        color: color.unwrap_or([0.0; 3]),
    })
}

fn read_distance_cue(cur: &mut Cur, opts: &ReadOptions) -> Result<DistanceCue> {
    fields!(cur, distance_cue {
        near_plane: f32,
        near_dimming: f32,
        far_plane: f32,
        far_dimming: f32,
    });
    let (_, dim_background) = read_fog_extras(cur, opts, "distance cue", DCUE_BACKGROUND)?;
    Ok(DistanceCue {
        near_plane,
        near_dimming,
        far_plane,
        far_dimming,
        dim_background,
    })
}

fn read_object(cur: &mut Cur, opts: &ReadOptions) -> Result<ObjectBlock> {
    fields!(cur, named_object {
        name: (cstr),
    });
    debug!("object: {:?}", name);

    let mut block = ObjectBlock::new(name);

    walk_children(cur, opts, "object block", |header, body| {
        match header.id {
            TRI_MESH => {
                push_padded(&mut block.meshes, read_tri_mesh(body, opts)?);
            }
            LIGHT => {
                push_padded(&mut block.lights, read_light(body, opts)?);
            }
            CAMERA => {
                push_padded(&mut block.cameras, read_camera(body, opts)?);
            }
            OBJ_HIDDEN => block.hidden = true,
            OBJ_VIS_LOFTER | OBJ_DOESNT_CAST | OBJ_MATTE | OBJ_FAST |
            OBJ_PROCEDURAL | OBJ_FROZEN | OBJ_DONT_RCVSHADOW => (),
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    Ok(block)
}

fn read_tri_mesh(cur: &mut Cur, opts: &ReadOptions) -> Result<TriangleMesh> {
    let mut mesh = TriangleMesh::default();

    walk_children(cur, opts, "triangle mesh", |header, body| {
        match header.id {
            VERTEX_LIST => {
                fields!(body, vertex_list {
                    num_vertices: u16,
                    vertices: [f32; 3 * num_vertices as usize],
                });
                mesh.vertices = vertices.collect();
            }
            TEXCOORD_LIST => {
                fields!(body, texcoord_list {
                    num_tex_coords: u16,
                    tex_coords: [(f32, f32); num_tex_coords],
                });
                let mut tc = Vec::with_capacity(2 * num_tex_coords as usize);
                for (u, v) in tex_coords {
                    tc.push(u);
                    tc.push(1.0 - v);
                }
                mesh.tex_coords = Some(tc);
            }
            MESH_MATRIX => {
                let mut local_coords = [0.0; 12];
                for (dst, src) in local_coords.iter_mut().zip(body.next_n::<f32>(12)?) {
                    *dst = src;
                }
                mesh.local_coords = Some(local_coords);
            }
            FACE_LIST => read_face_list(body, opts, &mut mesh)?,
            BOX_MAP => {
                let names = (0..6).map(|_| body.next_cstr()).collect();
                mesh.box_map_materials = Some(names);
            }
            VERTEX_FLAGS | MESH_COLOR | MESH_TEXTURE_INFO => body.skip_rest(),
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    debug!("mesh: {} vertices, {} faces, {} texture coordinates",
        mesh.num_vertices(), mesh.num_faces(), mesh.num_tex_coords());

    let num_vertices = mesh.num_vertices();
    for (i, &idx) in mesh.faces.iter().enumerate() {
        if idx as usize >= num_vertices {
            bail!(ErrorKind::BadFaceIndex(i / 3, idx, num_vertices));
        }
    }

    if let Some(ref tex_coords) = mesh.tex_coords {
        if tex_coords.len() / 2 != num_vertices {
            debug!("mesh has {} texture coordinates for {} vertices",
                tex_coords.len() / 2, num_vertices);
        }
    }

    Ok(mesh)
}

/// The face list is followed, inside the same chunk, by the smoothing group
/// and material assignments for those faces.
fn read_face_list(cur: &mut Cur, opts: &ReadOptions, mesh: &mut TriangleMesh) -> Result<()> {
    fields!(cur, face_list {
        num_faces: u16,
        faces: [(u16, u16, u16, u16); num_faces],
    });

    mesh.faces = Vec::with_capacity(3 * num_faces as usize);
    // The fourth word holds edge visibility flags; not kept.
    for (a, b, c, _flags) in faces {
        mesh.faces.extend_from_slice(&[a, b, c]);
    }

    walk_children(cur, opts, "face list", |header, body| {
        match header.id {
            SMOOTH_LIST => {
                fields!(body, smooth_list {
                    groups: [u32; num_faces],
                });
                mesh.smoothgroups = Some(groups.collect());
            }
            MATERIAL_LIST => {
                fields!(body, material_list {
                    name: (cstr),
                    num_entries: u16,
                    faces: [u16; num_entries],
                });
                let faces: Vec<u16> = faces.collect();
                if let Some(&bad) = faces.iter().find(|&&f| f >= num_faces) {
                    warn!("material {:?} is assigned to face {}, past the end of the face list",
                        name, bad);
                }
                push_padded(&mut mesh.materials, MaterialData { name, faces });
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })
}
