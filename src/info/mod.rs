use clap::ArgMatches;
use max3ds::discreet::keyframe::{KeyframeBlock, NodeTag, Track};
use max3ds::discreet::light::LightKind;
use max3ds::discreet::scene::{BackgroundKind, FogKind};
use max3ds::errors::{Error, Result};
use max3ds::{read_3ds_from, ObjectMesh};
use std::fs::File;
use std::path::Path;

pub fn main(matches: &ArgMatches) -> Result<()> {
    let opts = crate::read_options(matches);

    let inputs: Vec<&Path> = matches
        .values_of_os("INPUT")
        .map(|vals| vals.map(Path::new).collect())
        .unwrap_or_default();

    let mut num_failed = 0;
    for (i, path) in inputs.iter().enumerate() {
        if i != 0 {
            println!();
        }
        let res = File::open(path)
            .map_err(Error::from)
            .and_then(|f| read_3ds_from(f, opts));
        match res {
            Ok(scene) => scene_info(path, &scene),
            Err(e) => {
                error!("couldn't read {}: {}", path.display(), e);
                num_failed += 1;
            }
        }
    }

    if num_failed != 0 {
        bail!("{} of {} files couldn't be read", num_failed, inputs.len());
    }
    Ok(())
}

fn scene_info(path: &Path, scene: &ObjectMesh) {
    println!("File {}:", path.display());
    println!("  Version: {}", scene.version);
    println!("  Mesh Version: {}", scene.mesh_version);
    println!("  Master Scale: {}", scene.master_scale);
    println!("  Ambient Light: {:?}", scene.ambient_light);

    match scene.background.selected {
        BackgroundKind::None => (),
        BackgroundKind::Bitmap => {
            println!("  Background: bitmap {:?}",
                scene.background.bitmap.as_ref().map(|s| &s[..]).unwrap_or(""));
        }
        BackgroundKind::Solid => {
            println!("  Background: solid {:?}", scene.background.solid.unwrap_or([0.0; 3]));
        }
        BackgroundKind::Gradient => println!("  Background: gradient"),
    }
    match scene.fog.selected {
        FogKind::None => (),
        FogKind::Linear => println!("  Fog: linear"),
        FogKind::Layer => println!("  Fog: layer"),
        FogKind::DistanceCue => println!("  Fog: distance cue"),
    }

    println!("  Objects ({} total):", scene.num_blocks());
    for (i, block) in scene.blocks.iter().enumerate() {
        println!("    Object {}: {:?}{}", i, block.name,
            if block.hidden { " (hidden)" } else { "" });
        for (j, mesh) in block.meshes.iter().enumerate() {
            print!("      Mesh {}: {} vertices, {} faces",
                j, mesh.num_vertices(), mesh.num_faces());
            if mesh.tex_coords.is_some() {
                print!(", {} texcoords", mesh.num_tex_coords());
            }
            if mesh.smoothgroups.is_some() {
                print!(", smoothed");
            }
            println!();
            for mat in &mesh.materials {
                println!("        Material {:?}: {} faces", mat.name, mat.num_faces());
            }
        }
        for (j, light) in block.lights.iter().enumerate() {
            let kind = match light.kind {
                LightKind::Omni => "omni",
                LightKind::Spot => "spot",
            };
            println!("      Light {}: {} at {:?}{}", j, kind, light.position,
                if light.enabled { "" } else { " (off)" });
        }
        for (j, camera) in block.cameras.iter().enumerate() {
            println!("      Camera {}: at {:?} looking at {:?}, {}mm lens",
                j, camera.location, camera.target, camera.focus);
        }
    }

    println!("  Materials ({} total):", scene.num_materials());
    for (i, mat) in scene.materials.iter().enumerate() {
        println!("    Material {}: {:?}", i, mat.name);
        println!("      Diffuse: {:?}", mat.diffuse);
        if mat.transparency != 0.0 {
            println!("      Transparency: {}", mat.transparency);
        }
        for (slot, tex) in mat.maps() {
            println!("      Map {}: {:?}", slot, tex.filename);
        }
    }

    for kf in &scene.keyframes {
        keyframe_info(kf);
    }
}

fn keyframe_info(kf: &KeyframeBlock) {
    println!("  Keyframes ({} nodes):", kf.num_nodes());
    println!("    Frames: {}..{} (current {})", kf.start_frame, kf.end_frame, kf.current_frame);

    let node_name = |tag: &NodeTag| {
        tag.header.as_ref().map(|h| h.name.clone()).unwrap_or_default()
    };
    fn keys<T>(name: &str, track: &Option<Track<T>>) -> String {
        match *track {
            Some(ref t) => format!(" {}[{}]", name, t.num_keys()),
            None => String::new(),
        }
    }

    for node in &kf.object_nodes {
        println!("    Object Node {:?}:{}{}{}{}{}", node_name(&node.tag),
            keys("pos", &node.positions),
            keys("rot", &node.rotations),
            keys("scale", &node.scales),
            keys("morph", &node.morphs),
            keys("hide", &node.hides),
        );
    }
    for node in &kf.camera_nodes {
        println!("    Camera Node {:?}:{}{}{}", node_name(&node.tag),
            keys("pos", &node.positions),
            keys("fov", &node.fovs),
            keys("roll", &node.rolls),
        );
    }
    for node in kf.camera_target_nodes.iter().chain(&kf.spotlight_target_nodes) {
        println!("    Target Node {:?}:{}", node_name(&node.tag),
            keys("pos", &node.positions),
        );
    }
    for node in &kf.light_nodes {
        println!("    Light Node {:?}:{}{}", node_name(&node.tag),
            keys("pos", &node.positions),
            keys("color", &node.colors),
        );
    }
    for node in &kf.spotlight_nodes {
        println!("    Spotlight Node {:?}:{}{}{}{}{}", node_name(&node.tag),
            keys("pos", &node.positions),
            keys("color", &node.colors),
            keys("hotspot", &node.hotspots),
            keys("falloff", &node.falloffs),
            keys("roll", &node.rolls),
        );
    }
    for node in &kf.ambient_nodes {
        println!("    Ambient Node {:?}:{}", node_name(&node.tag),
            keys("color", &node.colors),
        );
    }
}
