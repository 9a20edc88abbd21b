//! Keyframer data.
//!
//! The keyframer section describes a node hierarchy with animation tracks.
//! Tracks are stored exactly as keyed in the file; nothing here interpolates
//! them.

use super::chunk::{walk_children, Dispatch, ReadOptions};
use super::chunk_ids::*;
use super::scene::{Color, Point};
use crate::errors::Result;
use crate::util::cur::Cur;
use crate::util::grow::{padded, push_padded};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeBlock {
    pub revision: u16,
    pub filename: String,
    pub animation_length: u32,
    pub start_frame: u32,
    pub end_frame: u32,
    pub current_frame: u32,

    pub object_nodes: Vec<ObjectNode>,
    pub camera_nodes: Vec<CameraNode>,
    pub camera_target_nodes: Vec<TargetNode>,
    pub light_nodes: Vec<LightNode>,
    pub spotlight_nodes: Vec<SpotlightNode>,
    pub spotlight_target_nodes: Vec<TargetNode>,
    pub ambient_nodes: Vec<AmbientNode>,
}

impl Default for KeyframeBlock {
    fn default() -> KeyframeBlock {
        KeyframeBlock {
            revision: 0,
            filename: String::new(),
            animation_length: 0,
            start_frame: 0,
            end_frame: 0,
            current_frame: 0,
            object_nodes: padded(),
            camera_nodes: padded(),
            camera_target_nodes: padded(),
            light_nodes: padded(),
            spotlight_nodes: padded(),
            spotlight_target_nodes: padded(),
            ambient_nodes: padded(),
        }
    }
}

impl KeyframeBlock {
    pub fn num_nodes(&self) -> usize {
        self.object_nodes.len() +
        self.camera_nodes.len() +
        self.camera_target_nodes.len() +
        self.light_nodes.len() +
        self.spotlight_nodes.len() +
        self.spotlight_target_nodes.len() +
        self.ambient_nodes.len()
    }
}

/// One key of a track.
///
/// `spline` holds tension, continuity, bias, ease-to and ease-from, in that
/// order. Bit `i` of `spline_flags` says whether `spline[i]` was present in
/// the file; absent parameters are zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Key<T> {
    pub frame: u32,
    pub spline_flags: u16,
    pub spline: [f32; 5],
    pub value: T,
}

pub const TENSION: usize = 0;
pub const CONTINUITY: usize = 1;
pub const BIAS: usize = 2;
pub const EASE_TO: usize = 3;
pub const EASE_FROM: usize = 4;

impl<T> Key<T> {
    pub fn spline_param(&self, which: usize) -> Option<f32> {
        if which < 5 && self.spline_flags & (1 << which) != 0 {
            Some(self.spline[which])
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track<T> {
    pub flags: u16,
    pub keys: Vec<Key<T>>,
}

impl<T> Track<T> {
    pub fn num_keys(&self) -> usize { self.keys.len() }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RotationData {
    /// Radians.
    pub angle: f32,
    pub axis: Point,
}

pub type PositionData = Point;
pub type ScaleData = Point;
pub type ColorData = Color;
pub type FieldOfViewData = f32;
pub type RollData = f32;
/// Name of the object to morph to.
pub type MorphData = String;
pub type HotspotData = f32;
pub type FalloffData = f32;

pub type KeyframePositionBlock = Track<PositionData>;
pub type KeyframeRotationBlock = Track<RotationData>;
pub type KeyframeScaleBlock = Track<ScaleData>;
pub type KeyframeColorBlock = Track<ColorData>;
pub type KeyframeFOVBlock = Track<FieldOfViewData>;
pub type KeyframeRollBlock = Track<RollData>;
pub type KeyframeMorphBlock = Track<MorphData>;
pub type KeyframeHotspotBlock = Track<HotspotData>;
pub type KeyframeFalloffBlock = Track<FalloffData>;
/// Hide keys toggle visibility; they have no payload.
pub type KeyframeHideBlock = Track<()>;

/// The payload of a key.
pub trait KeyValue: Sized {
    fn read_value(cur: &mut Cur) -> Result<Self>;
}

impl KeyValue for f32 {
    fn read_value(cur: &mut Cur) -> Result<f32> { cur.next::<f32>() }
}

impl KeyValue for Point {
    fn read_value(cur: &mut Cur) -> Result<Point> { cur.next::<Point>() }
}

impl KeyValue for RotationData {
    fn read_value(cur: &mut Cur) -> Result<RotationData> {
        fields!(cur, rotation_key {
            angle: f32,
            axis: Point,
        });
        Ok(RotationData { angle, axis })
    }
}

impl KeyValue for String {
    fn read_value(cur: &mut Cur) -> Result<String> { Ok(cur.next_cstr()) }
}

impl KeyValue for () {
    fn read_value(_cur: &mut Cur) -> Result<()> { Ok(()) }
}

pub fn read_track<T: KeyValue>(cur: &mut Cur, what: &'static str) -> Result<Track<T>> {
    fields!(cur, track {
        flags: u16,
        unknown: [u8; 8],
        num_keys: u32,
    });

    // Every key is at least six bytes; don't trust a huge count to size the
    // allocation.
    let mut keys: Vec<Key<T>> = Vec::with_capacity((num_keys as usize).min(cur.bytes_remaining() / 6));

    for _ in 0..num_keys {
        fields!(cur, key {
            frame: u32,
            spline_flags: u16,
        });
        let mut spline = [0.0; 5];
        for (i, param) in spline.iter_mut().enumerate() {
            if spline_flags & (1 << i) != 0 {
                *param = cur.next::<f32>()?;
            }
        }
        let value = T::read_value(cur)?;

        if let Some(prev) = keys.last() {
            if frame < prev.frame {
                warn!("{}: key for frame {} comes after frame {}", what, frame, prev.frame);
            }
        }

        keys.push(Key { frame, spline_flags, spline, value });
    }

    Ok(Track { flags, keys })
}

/// Reads a track into a node's slot for it. A node holds one track of each
/// kind; a repeated one replaces the earlier one.
fn read_track_into<T: KeyValue>(
    slot: &mut Option<Track<T>>,
    cur: &mut Cur,
    what: &'static str,
) -> Result<()> {
    let track = read_track(cur, what)?;
    if let Some(ref old) = *slot {
        warn!("node has a second {}; dropping the first ({} keys)", what, old.num_keys());
    }
    *slot = Some(track);
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeHeader {
    pub name: String,
    pub flags1: u16,
    pub flags2: u16,
    /// Node id of the parent, or 0xFFFF for a root.
    pub parent: u16,
}

fn read_node_header(cur: &mut Cur) -> Result<NodeHeader> {
    fields!(cur, node_header {
        name: (cstr),
        flags1: u16,
        flags2: u16,
        parent: u16,
    });
    Ok(NodeHeader { name, flags1, flags2, parent })
}

/// What every kind of node has.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTag {
    pub id: Option<u16>,
    pub header: Option<NodeHeader>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    pub tag: NodeTag,
    /// Name of this instance, when the same mesh is placed more than once.
    pub instance_name: Option<String>,
    pub bounds: Option<(Point, Point)>,
    pub pivot: Point,
    pub morph_smoothing: Option<f32>,
    pub positions: Option<KeyframePositionBlock>,
    pub rotations: Option<KeyframeRotationBlock>,
    pub scales: Option<KeyframeScaleBlock>,
    pub morphs: Option<KeyframeMorphBlock>,
    pub hides: Option<KeyframeHideBlock>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraNode {
    pub tag: NodeTag,
    pub positions: Option<KeyframePositionBlock>,
    pub fovs: Option<KeyframeFOVBlock>,
    pub rolls: Option<KeyframeRollBlock>,
}

/// The target of a camera or a spotlight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetNode {
    pub tag: NodeTag,
    pub positions: Option<KeyframePositionBlock>,
}

/// An omni light.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightNode {
    pub tag: NodeTag,
    pub positions: Option<KeyframePositionBlock>,
    pub colors: Option<KeyframeColorBlock>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotlightNode {
    pub tag: NodeTag,
    pub positions: Option<KeyframePositionBlock>,
    pub colors: Option<KeyframeColorBlock>,
    pub hotspots: Option<KeyframeHotspotBlock>,
    pub falloffs: Option<KeyframeFalloffBlock>,
    pub rolls: Option<KeyframeRollBlock>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientNode {
    pub tag: NodeTag,
    pub colors: Option<KeyframeColorBlock>,
}

/// A keyframer node. `read_node` handles the chunks all nodes share and
/// passes the rest to `read_chunk`.
trait Node: Default {
    const WHAT: &'static str;
    fn tag(&mut self) -> &mut NodeTag;
    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch>;
}

impl Node for ObjectNode {
    const WHAT: &'static str = "object node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            POS_TRACK_TAG => read_track_into(&mut self.positions, cur, "position track")?,
            ROT_TRACK_TAG => read_track_into(&mut self.rotations, cur, "rotation track")?,
            SCL_TRACK_TAG => read_track_into(&mut self.scales, cur, "scale track")?,
            MORPH_TRACK_TAG => read_track_into(&mut self.morphs, cur, "morph track")?,
            HIDE_TRACK_TAG => read_track_into(&mut self.hides, cur, "hide track")?,
            INSTANCE_NAME => self.instance_name = Some(cur.next_cstr()),
            BOUNDBOX => {
                fields!(cur, bounds {
                    min: Point,
                    max: Point,
                });
                self.bounds = Some((min, max));
            }
            PIVOT => self.pivot = cur.next::<Point>()?,
            MORPH_SMOOTH => self.morph_smoothing = Some(cur.next::<f32>()?),
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

impl Node for CameraNode {
    const WHAT: &'static str = "camera node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            POS_TRACK_TAG => read_track_into(&mut self.positions, cur, "position track")?,
            FOV_TRACK_TAG => read_track_into(&mut self.fovs, cur, "fov track")?,
            ROLL_TRACK_TAG => read_track_into(&mut self.rolls, cur, "roll track")?,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

impl Node for TargetNode {
    const WHAT: &'static str = "target node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            POS_TRACK_TAG => read_track_into(&mut self.positions, cur, "position track")?,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

impl Node for LightNode {
    const WHAT: &'static str = "light node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            POS_TRACK_TAG => read_track_into(&mut self.positions, cur, "position track")?,
            COL_TRACK_TAG => read_track_into(&mut self.colors, cur, "color track")?,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

impl Node for SpotlightNode {
    const WHAT: &'static str = "spotlight node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            POS_TRACK_TAG => read_track_into(&mut self.positions, cur, "position track")?,
            COL_TRACK_TAG => read_track_into(&mut self.colors, cur, "color track")?,
            HOT_TRACK_TAG => read_track_into(&mut self.hotspots, cur, "hotspot track")?,
            FALL_TRACK_TAG => read_track_into(&mut self.falloffs, cur, "falloff track")?,
            ROLL_TRACK_TAG => read_track_into(&mut self.rolls, cur, "roll track")?,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

impl Node for AmbientNode {
    const WHAT: &'static str = "ambient node";
    fn tag(&mut self) -> &mut NodeTag { &mut self.tag }

    fn read_chunk(&mut self, id: u16, cur: &mut Cur) -> Result<Dispatch> {
        match id {
            COL_TRACK_TAG => read_track_into(&mut self.colors, cur, "color track")?,
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    }
}

fn read_node<N: Node>(cur: &mut Cur, opts: &ReadOptions) -> Result<N> {
    let mut node = N::default();
    walk_children(cur, opts, N::WHAT, |header, body| {
        match header.id {
            NODE_ID => node.tag().id = Some(body.next::<u16>()?),
            NODE_HDR => {
                let node_header = read_node_header(body)?;
                debug!("{}: {:?}", N::WHAT, node_header.name);
                node.tag().header = Some(node_header);
            }
            id => return node.read_chunk(id, body),
        }
        Ok(Dispatch::Read)
    })?;
    Ok(node)
}

pub fn read_keyframes(cur: &mut Cur, opts: &ReadOptions) -> Result<KeyframeBlock> {
    let mut kf = KeyframeBlock::default();

    walk_children(cur, opts, "keyframe chunk", |header, body| {
        match header.id {
            KFHDR => {
                fields!(body, keyframe_header {
                    revision: u16,
                    filename: (cstr),
                    animation_length: u32,
                });
                kf.revision = revision;
                kf.filename = filename;
                kf.animation_length = animation_length;
            }
            KFSEG => {
                fields!(body, keyframe_segment {
                    start: u32,
                    end: u32,
                });
                kf.start_frame = start;
                kf.end_frame = end;
            }
            KFCURTIME => kf.current_frame = body.next::<u32>()?,
            OBJECT_NODE_TAG => {
                push_padded(&mut kf.object_nodes, read_node(body, opts)?);
            }
            CAMERA_NODE_TAG => {
                push_padded(&mut kf.camera_nodes, read_node(body, opts)?);
            }
            TARGET_NODE_TAG => {
                push_padded(&mut kf.camera_target_nodes, read_node(body, opts)?);
            }
            LIGHT_NODE_TAG => {
                push_padded(&mut kf.light_nodes, read_node(body, opts)?);
            }
            SPOTLIGHT_NODE_TAG => {
                push_padded(&mut kf.spotlight_nodes, read_node(body, opts)?);
            }
            L_TARGET_NODE_TAG => {
                push_padded(&mut kf.spotlight_target_nodes, read_node(body, opts)?);
            }
            AMBIENT_NODE_TAG => {
                push_padded(&mut kf.ambient_nodes, read_node(body, opts)?);
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    Ok(kf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_bytes::Bytes;

    #[test]
    fn test_object_node_tracks() {
        let positions = Bytes::new()
            .u16(0x0003)
            .u8s(&[0; 8])
            .u32(2)
            // Frame 0, no spline parameters
            .u32(0).u16(0)
            .f32s(&[1.0, 2.0, 3.0])
            // Frame 10 with tension and ease-to
            .u32(10).u16(0b01001)
            .f32(0.5).f32(0.25)
            .f32s(&[4.0, 5.0, 6.0])
            .build();
        let rotations = Bytes::new()
            .u16(0)
            .u8s(&[0; 8])
            .u32(1)
            .u32(0).u16(0)
            .f32(1.5).f32s(&[0.0, 0.0, 1.0])
            .build();
        let node = Bytes::new()
            .chunk(NODE_HDR, &Bytes::new().cstr("Box01").u16(0x4000).u16(0).u16(0xFFFF).build())
            .chunk(NODE_ID, &Bytes::new().u16(7).build())
            .chunk(PIVOT, &Bytes::new().f32s(&[0.5, 0.5, 0.0]).build())
            .chunk(POS_TRACK_TAG, &positions)
            .chunk(ROT_TRACK_TAG, &rotations)
            .build();
        let buf = Bytes::new()
            .chunk(KFHDR, &Bytes::new().u16(5).cstr("scene").u32(100).build())
            .chunk(KFSEG, &Bytes::new().u32(0).u32(100).build())
            .chunk(KFCURTIME, &Bytes::new().u32(20).build())
            .chunk(OBJECT_NODE_TAG, &node)
            .build();

        let kf = read_keyframes(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        assert_eq!(kf.revision, 5);
        assert_eq!(kf.filename, "scene");
        assert_eq!(kf.animation_length, 100);
        assert_eq!((kf.start_frame, kf.end_frame, kf.current_frame), (0, 100, 20));
        assert_eq!(kf.num_nodes(), 1);

        let obj = &kf.object_nodes[0];
        assert_eq!(obj.tag.id, Some(7));
        let header = obj.tag.header.as_ref().unwrap();
        assert_eq!(header.name, "Box01");
        assert_eq!(header.parent, 0xFFFF);
        assert_eq!(obj.pivot, [0.5, 0.5, 0.0]);

        let pos = obj.positions.as_ref().unwrap();
        assert_eq!(pos.flags, 3);
        assert_eq!(pos.num_keys(), 2);
        assert_eq!(pos.keys[0].value, [1.0, 2.0, 3.0]);
        assert_eq!(pos.keys[0].spline_param(TENSION), None);
        assert_eq!(pos.keys[1].frame, 10);
        assert_eq!(pos.keys[1].spline_param(TENSION), Some(0.5));
        assert_eq!(pos.keys[1].spline_param(CONTINUITY), None);
        assert_eq!(pos.keys[1].spline_param(EASE_TO), Some(0.25));
        assert_eq!(pos.keys[1].value, [4.0, 5.0, 6.0]);

        let rot = obj.rotations.as_ref().unwrap();
        assert_eq!(rot.keys[0].value, RotationData { angle: 1.5, axis: [0.0, 0.0, 1.0] });
        assert!(obj.scales.is_none());
    }

    #[test]
    fn test_repeated_track_replaces_earlier() {
        let track = |frame: u32, x: f32| Bytes::new()
            .u16(0).u8s(&[0; 8]).u32(1)
            .u32(frame).u16(0)
            .f32s(&[x, 0.0, 0.0])
            .build();
        let node = Bytes::new()
            .chunk(NODE_HDR, &Bytes::new().cstr("Camera01").u16(0).u16(0).u16(0xFFFF).build())
            .chunk(POS_TRACK_TAG, &track(0, 1.0))
            .chunk(POS_TRACK_TAG, &track(5, 2.0))
            .build();
        let buf = Bytes::new()
            .chunk(CAMERA_NODE_TAG, &node)
            .build();

        let kf = read_keyframes(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        let cam = &kf.camera_nodes[0];
        let pos = cam.positions.as_ref().unwrap();
        assert_eq!(pos.num_keys(), 1);
        assert_eq!(pos.keys[0].frame, 5);
        assert_eq!(pos.keys[0].value, [2.0, 0.0, 0.0]);
        assert!(cam.fovs.is_none());
    }

    #[test]
    fn test_hide_and_morph_tracks() {
        let hides = Bytes::new()
            .u16(0).u8s(&[0; 8]).u32(2)
            .u32(5).u16(0)
            .u32(9).u16(0)
            .build();
        let track: KeyframeHideBlock = read_track(&mut Cur::new(&hides), "hide track").unwrap();
        assert_eq!(track.keys.iter().map(|k| k.frame).collect::<Vec<_>>(), vec![5, 9]);

        let morphs = Bytes::new()
            .u16(0).u8s(&[0; 8]).u32(1)
            .u32(0).u16(0).cstr("Sphere")
            .build();
        let track: KeyframeMorphBlock = read_track(&mut Cur::new(&morphs), "morph track").unwrap();
        assert_eq!(track.keys[0].value, "Sphere");
    }
}
