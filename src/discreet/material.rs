use super::chunk::{walk_children, Dispatch, ReadOptions};
use super::chunk_ids::*;
use super::color::{read_byte_color, read_color, read_percentage};
use super::scene::Color;
use crate::errors::Result;
use crate::util::cur::Cur;

/// A material from the material editor.
///
/// Percentages (shininess, transparency, ...) are stored as fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBlock {
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess_ratio: f32,
    pub shininess_strength: f32,
    pub transparency: f32,
    pub self_illumination: f32,
    pub wireframe: bool,
    pub wire_size: f32,
    /// 0 wire, 1 flat, 2 Gouraud, 3 Phong, 4 metal.
    pub shading: u16,
    pub additive: bool,
    pub two_sided: bool,

    pub texture1: Option<TextureBlock>,
    pub texture2: Option<TextureBlock>,
    pub shininess_map: Option<TextureBlock>,
    pub specular_map: Option<TextureBlock>,
    pub opacity_map: Option<TextureBlock>,
    pub reflection_map: Option<TextureBlock>,
    pub bump_map: Option<TextureBlock>,

    pub texture1_mask: Option<TextureBlock>,
    pub texture2_mask: Option<TextureBlock>,
    pub shininess_mask: Option<TextureBlock>,
    pub specular_mask: Option<TextureBlock>,
    pub opacity_mask: Option<TextureBlock>,
    pub reflection_mask: Option<TextureBlock>,
    pub bump_mask: Option<TextureBlock>,
}

impl Default for MaterialBlock {
    fn default() -> MaterialBlock {
        MaterialBlock {
            name: String::new(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            shininess_ratio: 0.0,
            shininess_strength: 0.0,
            transparency: 0.0,
            self_illumination: 0.0,
            wireframe: false,
            wire_size: 1.0,
            shading: 0,
            additive: false,
            two_sided: false,
            texture1: None,
            texture2: None,
            shininess_map: None,
            specular_map: None,
            opacity_map: None,
            reflection_map: None,
            bump_map: None,
            texture1_mask: None,
            texture2_mask: None,
            shininess_mask: None,
            specular_mask: None,
            opacity_mask: None,
            reflection_mask: None,
            bump_mask: None,
        }
    }
}

impl MaterialBlock {
    /// The map slot for a map or mask chunk id.
    fn map_slot(&mut self, id: u16) -> Option<&mut Option<TextureBlock>> {
        Some(match id {
            MAT_TEXMAP => &mut self.texture1,
            MAT_TEX2MAP => &mut self.texture2,
            MAT_SHINMAP => &mut self.shininess_map,
            MAT_SPECMAP => &mut self.specular_map,
            MAT_OPACMAP => &mut self.opacity_map,
            MAT_REFLMAP => &mut self.reflection_map,
            MAT_BUMPMAP => &mut self.bump_map,
            MAT_TEXMASK => &mut self.texture1_mask,
            MAT_TEX2MASK => &mut self.texture2_mask,
            MAT_SHINMASK => &mut self.shininess_mask,
            MAT_SPECMASK => &mut self.specular_mask,
            MAT_OPACMASK => &mut self.opacity_mask,
            MAT_REFLMASK => &mut self.reflection_mask,
            MAT_BUMPMASK => &mut self.bump_mask,
            _ => return None,
        })
    }

    /// The filled map slots with a name for each, in a fixed order.
    pub fn maps(&self) -> Vec<(&'static str, &TextureBlock)> {
        let slots = [
            ("texture1", &self.texture1),
            ("texture2", &self.texture2),
            ("shininess", &self.shininess_map),
            ("specular", &self.specular_map),
            ("opacity", &self.opacity_map),
            ("reflection", &self.reflection_map),
            ("bump", &self.bump_map),
            ("texture1_mask", &self.texture1_mask),
            ("texture2_mask", &self.texture2_mask),
            ("shininess_mask", &self.shininess_mask),
            ("specular_mask", &self.specular_mask),
            ("opacity_mask", &self.opacity_mask),
            ("reflection_mask", &self.reflection_mask),
            ("bump_mask", &self.bump_mask),
        ];
        slots.iter()
            .filter_map(|&(name, slot)| slot.as_ref().map(|tex| (name, tex)))
            .collect()
    }
}

/// One texture map (or mask) of a material. Only the filename is recorded;
/// the image itself isn't loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBlock {
    pub filename: String,
    pub strength: f32,
    pub tiling: u16,
    pub blur: f32,
    pub u_scale: f32,
    pub v_scale: f32,
    pub u_offset: f32,
    pub v_offset: f32,
    /// Rotation, in degrees.
    pub angle: f32,
    pub blend_color1: Option<Color>,
    pub blend_color2: Option<Color>,
    pub red_tint: Option<Color>,
    pub green_tint: Option<Color>,
    pub blue_tint: Option<Color>,
    pub bump_percentage: u16,
}

impl Default for TextureBlock {
    fn default() -> TextureBlock {
        TextureBlock {
            filename: String::new(),
            strength: 1.0,
            tiling: 0,
            blur: 0.0,
            u_scale: 1.0,
            v_scale: 1.0,
            u_offset: 0.0,
            v_offset: 0.0,
            angle: 0.0,
            blend_color1: None,
            blend_color2: None,
            red_tint: None,
            green_tint: None,
            blue_tint: None,
            bump_percentage: 0,
        }
    }
}

pub fn read_material(cur: &mut Cur, opts: &ReadOptions) -> Result<MaterialBlock> {
    let mut mat = MaterialBlock::default();

    walk_children(cur, opts, "material block", |header, body| {
        match header.id {
            MAT_NAME => {
                mat.name = body.next_cstr();
                debug!("material: {:?}", mat.name);
            }
            MAT_AMBIENT => {
                if let Some(c) = read_color(body, opts, "material ambient")? {
                    mat.ambient = c;
                }
            }
            MAT_DIFFUSE => {
                if let Some(c) = read_color(body, opts, "material diffuse")? {
                    mat.diffuse = c;
                }
            }
            MAT_SPECULAR => {
                if let Some(c) = read_color(body, opts, "material specular")? {
                    mat.specular = c;
                }
            }
            MAT_SHININESS => {
                if let Some(p) = read_percentage(body, opts, "material shininess")? {
                    mat.shininess_ratio = p;
                }
            }
            MAT_SHIN2PCT => {
                if let Some(p) = read_percentage(body, opts, "material shininess strength")? {
                    mat.shininess_strength = p;
                }
            }
            MAT_TRANSPARENCY => {
                if let Some(p) = read_percentage(body, opts, "material transparency")? {
                    mat.transparency = p;
                }
            }
            MAT_SELF_ILPCT => {
                if let Some(p) = read_percentage(body, opts, "material self illumination")? {
                    mat.self_illumination = p;
                }
            }
            MAT_WIREFRAME => mat.wireframe = true,
            MAT_WIRESIZE => {
                fields!(body, wire_size { size: f32 });
                mat.wire_size = size;
            }
            MAT_SHADING => {
                fields!(body, shading { kind: u16 });
                mat.shading = kind;
            }
            MAT_ADDITIVE => mat.additive = true,
            MAT_TWO_SIDE => mat.two_sided = true,
            id => {
                let tex = match mat.map_slot(id) {
                    Some(slot) => slot,
                    None => return Ok(Dispatch::Skip),
                };
                *tex = Some(read_texture(body, opts)?);
            }
        }
        Ok(Dispatch::Read)
    })?;

    Ok(mat)
}

fn read_texture(cur: &mut Cur, opts: &ReadOptions) -> Result<TextureBlock> {
    let mut tex = TextureBlock::default();
    // Like read_percentage, the first percentage wins.
    let mut strength: Option<f32> = None;

    walk_children(cur, opts, "texture block", |header, body| {
        match header.id {
            INT_PERCENT => {
                fields!(body, int_percent { value: u16 });
                strength = strength.or(Some(value as f32 * 0.01));
            }
            FLOAT_PERCENT => {
                fields!(body, float_percent { value: f32 });
                strength = strength.or(Some(value));
            }
            MAT_MAPNAME => tex.filename = body.next_cstr(),
            MAT_MAP_TILING => {
                fields!(body, tiling { flags: u16 });
                tex.tiling = flags;
            }
            MAT_MAP_TEXBLUR => tex.blur = body.next::<f32>()?,
            MAT_MAP_USCALE => tex.u_scale = body.next::<f32>()?,
            MAT_MAP_VSCALE => tex.v_scale = body.next::<f32>()?,
            MAT_MAP_UOFFSET => tex.u_offset = body.next::<f32>()?,
            MAT_MAP_VOFFSET => tex.v_offset = body.next::<f32>()?,
            MAT_MAP_ANG => tex.angle = body.next::<f32>()?,
            MAT_MAP_COL1 => tex.blend_color1 = Some(read_byte_color(body)?),
            MAT_MAP_COL2 => tex.blend_color2 = Some(read_byte_color(body)?),
            MAT_MAP_RCOL => tex.red_tint = Some(read_byte_color(body)?),
            MAT_MAP_GCOL => tex.green_tint = Some(read_byte_color(body)?),
            MAT_MAP_BCOL => tex.blue_tint = Some(read_byte_color(body)?),
            MAT_BUMP_PERCENT => {
                fields!(body, bump_percent { value: u16 });
                tex.bump_percentage = value;
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;

    if let Some(strength) = strength {
        tex.strength = strength;
    }

    Ok(tex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_bytes::Bytes;

    #[test]
    fn test_material() {
        let texmap = Bytes::new()
            .chunk(INT_PERCENT, &Bytes::new().u16(60).build())
            .chunk(MAT_MAPNAME, &Bytes::new().cstr("BRICK.TGA").build())
            .chunk(MAT_MAP_USCALE, &Bytes::new().f32(2.0).build())
            .chunk(MAT_MAP_COL1, &[255, 255, 0])
            .build();
        let buf = Bytes::new()
            .chunk(MAT_NAME, &Bytes::new().cstr("Red Brick").build())
            .chunk(MAT_DIFFUSE, &Bytes::new()
                .chunk(COLOR_24, &[255, 0, 0])
                .chunk(LIN_COLOR_24, &[0, 255, 0])
                .build())
            .chunk(MAT_TRANSPARENCY, &Bytes::new()
                .chunk(INT_PERCENT, &Bytes::new().u16(25).build())
                .build())
            .chunk(MAT_SHADING, &Bytes::new().u16(3).build())
            .chunk(MAT_TWO_SIDE, &[])
            .chunk(MAT_TEXMAP, &texmap)
            .chunk(0xA0FF, &[1, 2, 3, 4])
            .build();

        let mat = read_material(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        assert_eq!(mat.name, "Red Brick");
        // The first color wins
        assert_eq!(mat.diffuse, [1.0, 0.0, 0.0]);
        assert!((mat.transparency - 0.25).abs() < 1e-6);
        assert_eq!(mat.shading, 3);
        assert!(mat.two_sided);
        assert!(!mat.additive);

        let tex = mat.texture1.as_ref().unwrap();
        assert_eq!(tex.filename, "BRICK.TGA");
        assert!((tex.strength - 0.6).abs() < 1e-6);
        assert_eq!(tex.u_scale, 2.0);
        assert_eq!(tex.v_scale, 1.0);
        assert_eq!(tex.blend_color1, Some([1.0, 1.0, 0.0]));
        assert!(mat.bump_map.is_none());

        let maps = mat.maps();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].0, "texture1");
    }

    #[test]
    fn test_texture_strength_first_percentage_wins() {
        let texmap = Bytes::new()
            .chunk(FLOAT_PERCENT, &Bytes::new().f32(0.3).build())
            .chunk(INT_PERCENT, &Bytes::new().u16(80).build())
            .chunk(MAT_MAPNAME, &Bytes::new().cstr("BUMPS.TGA").build())
            .build();
        let buf = Bytes::new()
            .chunk(MAT_NAME, &Bytes::new().cstr("Bumpy").build())
            .chunk(MAT_BUMPMAP, &texmap)
            .chunk(MAT_REFLMAP, &Bytes::new()
                .chunk(MAT_MAPNAME, &Bytes::new().cstr("SKY.TGA").build())
                .build())
            .build();

        let mat = read_material(&mut Cur::new(&buf), &ReadOptions::strict()).unwrap();
        let bump = mat.bump_map.as_ref().unwrap();
        assert_eq!(bump.strength, 0.3);
        assert_eq!(bump.filename, "BUMPS.TGA");
        // No percentage at all keeps full strength
        let refl = mat.reflection_map.as_ref().unwrap();
        assert_eq!(refl.strength, 1.0);
    }
}
