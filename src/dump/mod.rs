//! Dumps a decoded scene as JSON.

use clap::ArgMatches;
use json::JsonValue;
use max3ds::discreet::keyframe::{KeyframeBlock, NodeTag, RotationData, Track};
use max3ds::discreet::light::{CameraBlock, LightBlock, LightKind};
use max3ds::discreet::material::{MaterialBlock, TextureBlock};
use max3ds::discreet::scene::{Background, BackgroundKind, Fog, FogKind, ObjectBlock, TriangleMesh};
use max3ds::errors::Result;
use max3ds::geometry::{calc_all_normals, calc_all_tangents};
use max3ds::{read_3ds_from, ObjectMesh};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn main(matches: &ArgMatches) -> Result<()> {
    let opts = crate::read_options(matches);
    let input = Path::new(matches.value_of_os("INPUT").unwrap_or_default());

    let f = File::open(input)?;
    let mut scene = read_3ds_from(f, opts)?;

    if matches.is_present("normals") {
        calc_all_normals(&mut scene);
    }
    if matches.is_present("tangents") {
        calc_all_tangents(&mut scene);
    }

    let json = scene_json(&scene);

    match matches.value_of_os("OUTPUT") {
        Some(out) => {
            let mut f = File::create(out)?;
            json.write_pretty(&mut f, 2)?;
            writeln!(f)?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            json.write_pretty(&mut w, 2)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn vec3(v: [f32; 3]) -> JsonValue {
    array!(v[0], v[1], v[2])
}

fn scene_json(scene: &ObjectMesh) -> JsonValue {
    object!(
        "version" => scene.version,
        "meshVersion" => scene.mesh_version,
        "masterScale" => scene.master_scale,
        "ambientLight" => vec3(scene.ambient_light),
        "background" => background_json(&scene.background),
        "fog" => fog_json(&scene.fog),
        "objects" => scene.blocks.iter().map(block_json).collect::<Vec<_>>(),
        "materials" => scene.materials.iter().map(material_json).collect::<Vec<_>>(),
        "keyframes" => scene.keyframes.iter().map(keyframes_json).collect::<Vec<_>>(),
    )
}

fn background_json(bg: &Background) -> JsonValue {
    let selected = match bg.selected {
        BackgroundKind::None => "none",
        BackgroundKind::Bitmap => "bitmap",
        BackgroundKind::Solid => "solid",
        BackgroundKind::Gradient => "gradient",
    };
    let mut o = object!("selected" => selected);
    if let Some(ref bitmap) = bg.bitmap {
        o["bitmap"] = bitmap.clone().into();
    }
    if let Some(solid) = bg.solid {
        o["solid"] = vec3(solid);
    }
    if let Some(ref g) = bg.gradient {
        o["gradient"] = object!(
            "midpoint" => g.midpoint,
            "top" => vec3(g.top),
            "middle" => vec3(g.middle),
            "bottom" => vec3(g.bottom),
        );
    }
    o
}

fn fog_json(fog: &Fog) -> JsonValue {
    let selected = match fog.selected {
        FogKind::None => "none",
        FogKind::Linear => "linear",
        FogKind::Layer => "layer",
        FogKind::DistanceCue => "distanceCue",
    };
    let mut o = object!("selected" => selected);
    if let Some(ref f) = fog.linear {
        o["linear"] = object!(
            "nearPlane" => f.near_plane,
            "nearDensity" => f.near_density,
            "farPlane" => f.far_plane,
            "farDensity" => f.far_density,
            "color" => vec3(f.color),
            "fogBackground" => f.fog_background,
        );
    }
    if let Some(ref f) = fog.layer {
        o["layer"] = object!(
            "zMin" => f.z_min,
            "zMax" => f.z_max,
            "density" => f.density,
            "flags" => f.flags,
            "color" => vec3(f.color),
        );
    }
    if let Some(ref d) = fog.distance_cue {
        o["distanceCue"] = object!(
            "nearPlane" => d.near_plane,
            "nearDimming" => d.near_dimming,
            "farPlane" => d.far_plane,
            "farDimming" => d.far_dimming,
            "dimBackground" => d.dim_background,
        );
    }
    o
}

fn block_json(block: &ObjectBlock) -> JsonValue {
    object!(
        "name" => block.name.clone(),
        "hidden" => block.hidden,
        "meshes" => block.meshes.iter().map(mesh_json).collect::<Vec<_>>(),
        "lights" => block.lights.iter().map(light_json).collect::<Vec<_>>(),
        "cameras" => block.cameras.iter().map(camera_json).collect::<Vec<_>>(),
    )
}

fn mesh_json(mesh: &TriangleMesh) -> JsonValue {
    let mut o = object!(
        "vertices" => mesh.vertices.clone(),
        "faces" => mesh.faces.clone(),
        "materials" => mesh.materials.iter().map(|m| object!(
            "name" => m.name.clone(),
            "faces" => m.faces.clone(),
        )).collect::<Vec<_>>(),
    );
    if let Some(ref tc) = mesh.tex_coords {
        o["texCoords"] = tc.clone().into();
    }
    if let Some(ref sg) = mesh.smoothgroups {
        o["smoothGroups"] = sg.clone().into();
    }
    if let Some(ref m) = mesh.local_coords {
        o["localCoords"] = m.to_vec().into();
    }
    if let Some(ref names) = mesh.box_map_materials {
        o["boxMap"] = names.clone().into();
    }
    // Only present when they were generated.
    if !mesh.normals.is_empty() {
        o["normals"] = mesh.normals.clone().into();
    }
    if !mesh.tangents.is_empty() {
        o["tangents"] = mesh.tangents.clone().into();
        o["binormals"] = mesh.binormals.clone().into();
    }
    o
}

fn light_json(light: &LightBlock) -> JsonValue {
    let mut o = object!(
        "kind" => match light.kind { LightKind::Omni => "omni", LightKind::Spot => "spot" },
        "enabled" => light.enabled,
        "color" => vec3(light.color),
        "position" => vec3(light.position),
        "multiplier" => light.multiplier,
        "attenuation" => light.attenuation,
        "innerRange" => light.inner_range,
        "outerRange" => light.outer_range,
        "excludes" => light.excludes.clone(),
    );
    if light.kind == LightKind::Spot {
        o["target"] = vec3(light.target);
        o["hotspot"] = light.hotspot_angle.into();
        o["falloff"] = light.falloff_angle.into();
        o["roll"] = light.roll_angle.into();
        o["aspectRatio"] = light.aspect_ratio.into();
        o["seeCone"] = light.see_cone.into();
        o["castsShadows"] = light.casts_shadows.into();
        o["shadowBias"] = light.shadow_bias.into();
        o["shadowFilter"] = light.shadow_filter.into();
        o["shadowMapSize"] = light.shadow_map_size.into();
    }
    o
}

fn camera_json(camera: &CameraBlock) -> JsonValue {
    let mut o = object!(
        "location" => vec3(camera.location),
        "target" => vec3(camera.target),
        "bank" => camera.bank_angle,
        "focus" => camera.focus,
        "seeCone" => camera.see_cone,
    );
    if let Some([near, far]) = camera.ranges {
        o["ranges"] = array!(near, far);
    }
    o
}

fn material_json(mat: &MaterialBlock) -> JsonValue {
    let mut maps = object!();
    for (slot, tex) in mat.maps() {
        maps[slot] = texture_json(tex);
    }
    object!(
        "name" => mat.name.clone(),
        "ambient" => vec3(mat.ambient),
        "diffuse" => vec3(mat.diffuse),
        "specular" => vec3(mat.specular),
        "shininessRatio" => mat.shininess_ratio,
        "shininessStrength" => mat.shininess_strength,
        "transparency" => mat.transparency,
        "selfIllumination" => mat.self_illumination,
        "wireframe" => mat.wireframe,
        "wireSize" => mat.wire_size,
        "shading" => mat.shading,
        "additive" => mat.additive,
        "twoSided" => mat.two_sided,
        "maps" => maps,
    )
}

fn texture_json(tex: &TextureBlock) -> JsonValue {
    let mut o = object!(
        "filename" => tex.filename.clone(),
        "strength" => tex.strength,
        "tiling" => tex.tiling,
        "blur" => tex.blur,
        "scale" => array!(tex.u_scale, tex.v_scale),
        "offset" => array!(tex.u_offset, tex.v_offset),
        "angle" => tex.angle,
    );
    let tints = [
        ("blendColor1", tex.blend_color1),
        ("blendColor2", tex.blend_color2),
        ("redTint", tex.red_tint),
        ("greenTint", tex.green_tint),
        ("blueTint", tex.blue_tint),
    ];
    for &(key, color) in tints.iter() {
        if let Some(c) = color {
            o[key] = vec3(c);
        }
    }
    if tex.bump_percentage != 0 {
        o["bumpPercentage"] = tex.bump_percentage.into();
    }
    o
}

/// Values stored in keyframe tracks.
trait KeyJson {
    fn key_json(&self) -> JsonValue;
}

impl KeyJson for f32 {
    fn key_json(&self) -> JsonValue { (*self).into() }
}

impl KeyJson for [f32; 3] {
    fn key_json(&self) -> JsonValue { vec3(*self) }
}

impl KeyJson for RotationData {
    fn key_json(&self) -> JsonValue {
        object!("angle" => self.angle, "axis" => vec3(self.axis))
    }
}

impl KeyJson for String {
    fn key_json(&self) -> JsonValue { self.clone().into() }
}

impl KeyJson for () {
    fn key_json(&self) -> JsonValue { JsonValue::Null }
}

fn track_json<T: KeyJson>(track: &Track<T>) -> JsonValue {
    let keys = track.keys.iter().map(|key| {
        let mut o = object!(
            "frame" => key.frame,
            "value" => key.value.key_json(),
        );
        if key.spline_flags != 0 {
            o["splineFlags"] = key.spline_flags.into();
            o["spline"] = key.spline.to_vec().into();
        }
        o
    }).collect::<Vec<_>>();
    object!("flags" => track.flags, "keys" => keys)
}

fn node_json(kind: &str, tag: &NodeTag) -> JsonValue {
    let mut o = object!("kind" => kind);
    if let Some(id) = tag.id {
        o["id"] = id.into();
    }
    if let Some(ref h) = tag.header {
        o["name"] = h.name.clone().into();
        o["parent"] = h.parent.into();
        o["flags"] = array!(h.flags1, h.flags2);
    }
    o
}

fn put_track<T: KeyJson>(o: &mut JsonValue, key: &str, track: &Option<Track<T>>) {
    if let Some(ref t) = *track {
        o[key] = track_json(t);
    }
}

fn keyframes_json(kf: &KeyframeBlock) -> JsonValue {
    let mut nodes = vec![];

    for node in &kf.object_nodes {
        let mut o = node_json("object", &node.tag);
        if let Some(ref name) = node.instance_name {
            o["instanceName"] = name.clone().into();
        }
        if let Some((min, max)) = node.bounds {
            o["bounds"] = array!(vec3(min), vec3(max));
        }
        o["pivot"] = vec3(node.pivot);
        if let Some(smoothing) = node.morph_smoothing {
            o["morphSmoothing"] = smoothing.into();
        }
        put_track(&mut o, "position", &node.positions);
        put_track(&mut o, "rotation", &node.rotations);
        put_track(&mut o, "scale", &node.scales);
        put_track(&mut o, "morph", &node.morphs);
        put_track(&mut o, "hide", &node.hides);
        nodes.push(o);
    }
    for node in &kf.camera_nodes {
        let mut o = node_json("camera", &node.tag);
        put_track(&mut o, "position", &node.positions);
        put_track(&mut o, "fov", &node.fovs);
        put_track(&mut o, "roll", &node.rolls);
        nodes.push(o);
    }
    for node in &kf.camera_target_nodes {
        let mut o = node_json("cameraTarget", &node.tag);
        put_track(&mut o, "position", &node.positions);
        nodes.push(o);
    }
    for node in &kf.light_nodes {
        let mut o = node_json("light", &node.tag);
        put_track(&mut o, "position", &node.positions);
        put_track(&mut o, "color", &node.colors);
        nodes.push(o);
    }
    for node in &kf.spotlight_nodes {
        let mut o = node_json("spotlight", &node.tag);
        put_track(&mut o, "position", &node.positions);
        put_track(&mut o, "color", &node.colors);
        put_track(&mut o, "hotspot", &node.hotspots);
        put_track(&mut o, "falloff", &node.falloffs);
        put_track(&mut o, "roll", &node.rolls);
        nodes.push(o);
    }
    for node in &kf.spotlight_target_nodes {
        let mut o = node_json("spotlightTarget", &node.tag);
        put_track(&mut o, "position", &node.positions);
        nodes.push(o);
    }
    for node in &kf.ambient_nodes {
        let mut o = node_json("ambient", &node.tag);
        put_track(&mut o, "color", &node.colors);
        nodes.push(o);
    }

    object!(
        "revision" => kf.revision,
        "filename" => kf.filename.clone(),
        "animationLength" => kf.animation_length,
        "startFrame" => kf.start_frame,
        "endFrame" => kf.end_frame,
        "currentFrame" => kf.current_frame,
        "nodes" => nodes,
    )
}
