//! Lights and cameras. Both start with a few fixed fields and then have
//! optional parameter chunks.

use super::chunk::{walk_children, Dispatch, ReadOptions};
use super::chunk_ids::*;
use super::color::read_byte_color;
use super::scene::{Color, Point};
use crate::errors::Result;
use crate::util::cur::Cur;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightKind {
    Omni,
    Spot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightBlock {
    pub kind: LightKind,
    pub enabled: bool,
    pub color: Color,
    pub position: Point,
    /// Only meaningful for spotlights, like the cone angles below.
    pub target: Point,
    pub hotspot_angle: f32,
    pub falloff_angle: f32,
    pub roll_angle: f32,
    pub aspect_ratio: f32,
    pub attenuation: bool,
    pub inner_range: f32,
    pub outer_range: f32,
    pub multiplier: f32,
    pub see_cone: bool,
    pub casts_shadows: bool,
    pub shadow_bias: f32,
    pub shadow_filter: f32,
    pub shadow_map_size: u16,
    /// Names of objects this light doesn't illuminate.
    pub excludes: Vec<String>,
}

impl Default for LightBlock {
    fn default() -> LightBlock {
        LightBlock {
            kind: LightKind::Omni,
            enabled: true,
            color: [0.0; 3],
            position: [0.0; 3],
            target: [0.0; 3],
            hotspot_angle: 0.0,
            falloff_angle: 0.0,
            roll_angle: 0.0,
            aspect_ratio: 1.0,
            attenuation: false,
            inner_range: 0.0,
            outer_range: 0.0,
            multiplier: 1.0,
            see_cone: false,
            casts_shadows: false,
            shadow_bias: 0.0,
            shadow_filter: 0.0,
            shadow_map_size: 0,
            excludes: vec![],
        }
    }
}

pub fn read_light(cur: &mut Cur, opts: &ReadOptions) -> Result<LightBlock> {
    fields!(cur, light {
        position: Point,
    });

    let mut light = LightBlock { position, ..LightBlock::default() };

    walk_children(cur, opts, "light block", |header, body| {
        match header.id {
            COLOR_F | LIN_COLOR_F => light.color = body.next::<Point>()?,
            COLOR_24 | LIN_COLOR_24 => light.color = read_byte_color(body)?,
            SPOTLIGHT => read_spotlight(body, opts, &mut light)?,
            LIGHT_OFF => light.enabled = false,
            LIGHT_ATTENUATION => light.attenuation = true,
            LIGHT_INNER_RANGE => light.inner_range = body.next::<f32>()?,
            LIGHT_OUTER_RANGE => light.outer_range = body.next::<f32>()?,
            LIGHT_MULTIPLIER => light.multiplier = body.next::<f32>()?,
            LIGHT_EXCLUDE => light.excludes.push(body.next_cstr()),
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    Ok(light)
}

fn read_spotlight(cur: &mut Cur, opts: &ReadOptions, light: &mut LightBlock) -> Result<()> {
    fields!(cur, spotlight {
        target: Point,
        hotspot: f32,
        falloff: f32,
    });
    light.kind = LightKind::Spot;
    light.target = target;
    light.hotspot_angle = hotspot;
    light.falloff_angle = falloff;

    walk_children(cur, opts, "spotlight block", |header, body| {
        match header.id {
            SPOT_ROLL => light.roll_angle = body.next::<f32>()?,
            SPOT_ASPECT => light.aspect_ratio = body.next::<f32>()?,
            SPOT_SEE_CONE => light.see_cone = true,
            SPOT_SHADOWED => light.casts_shadows = true,
            SPOT_LOCAL_SHADOW => {
                fields!(body, local_shadow {
                    bias: f32,
                    filter: f32,
                    map_size: u16,
                });
                light.shadow_bias = bias;
                light.shadow_filter = filter;
                light.shadow_map_size = map_size;
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraBlock {
    pub location: Point,
    pub target: Point,
    /// Rotation about the view axis, in degrees.
    pub bank_angle: f32,
    /// Lens focal length in millimeters.
    pub focus: f32,
    pub see_cone: bool,
    /// Near and far ranges, if present.
    pub ranges: Option<[f32; 2]>,
}

pub fn read_camera(cur: &mut Cur, opts: &ReadOptions) -> Result<CameraBlock> {
    fields!(cur, camera {
        location: Point,
        target: Point,
        bank_angle: f32,
        focus: f32,
    });

    let mut camera = CameraBlock {
        location, target, bank_angle, focus,
        ..CameraBlock::default()
    };

    walk_children(cur, opts, "camera block", |header, body| {
        match header.id {
            CAMERA_SEE_CONE => camera.see_cone = true,
            CAMERA_RANGES => {
                fields!(body, camera_ranges {
                    near: f32,
                    far: f32,
                });
                camera.ranges = Some([near, far]);
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    Ok(camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_bytes::Bytes;

    #[test]
    fn test_spotlight() {
        let spot = Bytes::new()
            .f32s(&[0.0, 0.0, -10.0])
            .f32(30.0)
            .f32(45.0)
            .chunk(SPOT_ROLL, &Bytes::new().f32(5.0).build())
            .chunk(SPOT_SHADOWED, &[])
            .chunk(SPOT_LOCAL_SHADOW, &Bytes::new().f32(1.5).f32(3.0).u16(512).build())
            .build();
        let buf = Bytes::new()
            .f32s(&[1.0, 2.0, 3.0])
            .chunk(COLOR_F, &Bytes::new().f32s(&[1.0, 0.5, 0.25]).build())
            .chunk(SPOTLIGHT, &spot)
            .chunk(LIGHT_OFF, &[])
            .chunk(LIGHT_EXCLUDE, &Bytes::new().cstr("Floor").build())
            .build();

        let light = read_light(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        assert_eq!(light.kind, LightKind::Spot);
        assert_eq!(light.position, [1.0, 2.0, 3.0]);
        assert_eq!(light.color, [1.0, 0.5, 0.25]);
        assert_eq!(light.target, [0.0, 0.0, -10.0]);
        assert_eq!(light.hotspot_angle, 30.0);
        assert_eq!(light.falloff_angle, 45.0);
        assert_eq!(light.roll_angle, 5.0);
        assert!(light.casts_shadows);
        assert_eq!(light.shadow_map_size, 512);
        assert!(!light.enabled);
        assert_eq!(light.excludes, vec!["Floor".to_string()]);
    }

    #[test]
    fn test_camera() {
        let buf = Bytes::new()
            .f32s(&[0.0, -100.0, 50.0])
            .f32s(&[0.0, 0.0, 0.0])
            .f32(0.0)
            .f32(35.0)
            .chunk(CAMERA_RANGES, &Bytes::new().f32(1.0).f32(1000.0).build())
            .build();

        let camera = read_camera(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        assert_eq!(camera.location, [0.0, -100.0, 50.0]);
        assert_eq!(camera.focus, 35.0);
        assert!(!camera.see_cone);
        assert_eq!(camera.ranges, Some([1.0, 1000.0]));
    }
}
