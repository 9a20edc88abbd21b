//! Color and percentage sub-chunks.
//!
//! Colors come either as three floats or as three bytes; the "linear"
//! variants have the same layout. A chunk that has a color (a material's
//! diffuse color, the ambient light, ...) holds one or more of these as
//! children, usually a gamma-corrected one followed by a linear one.

use super::chunk::{walk_children, Dispatch, ReadOptions};
use super::chunk_ids::*;
use super::scene::{Color, Point};
use crate::errors::Result;
use crate::util::cur::Cur;

/// Three bytes scaled to `[0, 1]`.
pub fn read_byte_color(cur: &mut Cur) -> Result<Color> {
    fields!(cur, byte_color {
        r: u8,
        g: u8,
        b: u8,
    });
    Ok([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
}

/// Reads every color sub-chunk in the rest of `cur`, in file order.
pub fn read_colors(cur: &mut Cur, opts: &ReadOptions, what: &'static str) -> Result<Vec<Color>> {
    let mut colors = vec![];
    walk_children(cur, opts, what, |header, body| {
        match header.id {
            COLOR_F | LIN_COLOR_F => {
                fields!(body, color_f { rgb: Point });
                colors.push(rgb);
            }
            COLOR_24 | LIN_COLOR_24 => {
                colors.push(read_byte_color(body)?);
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;
    Ok(colors)
}

/// The first color in the rest of `cur`.
pub fn read_color(cur: &mut Cur, opts: &ReadOptions, what: &'static str) -> Result<Option<Color>> {
    let colors = read_colors(cur, opts, what)?;
    if colors.is_empty() {
        debug!("no color in {}", what);
    }
    Ok(colors.first().cloned())
}

/// Reads a percentage sub-chunk, returned as a fraction (`0x0030` holds a
/// whole number of percent, `0x0031` a float).
pub fn read_percentage(cur: &mut Cur, opts: &ReadOptions, what: &'static str) -> Result<Option<f32>> {
    let mut pct = None;
    walk_children(cur, opts, what, |header, body| {
        match header.id {
            INT_PERCENT => {
                fields!(body, int_percent { value: u16 });
                pct = pct.or(Some(value as f32 * 0.01));
            }
            FLOAT_PERCENT => {
                fields!(body, float_percent { value: f32 });
                pct = pct.or(Some(value));
            }
            _ => return Ok(Dispatch::Skip),
        }
        Ok(Dispatch::Read)
    })?;
    Ok(pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::test_bytes::{chunk, Bytes};

    #[test]
    fn test_colors_in_order() {
        let buf = Bytes::new()
            .chunk(COLOR_24, &[255, 0, 51])
            .chunk(LIN_COLOR_F, &Bytes::new().f32s(&[0.5, 0.25, 1.0]).build())
            .build();
        let colors = read_colors(&mut Cur::new(&buf), &ReadOptions::default(), "test").unwrap();
        assert_eq!(colors, vec![[1.0, 0.0, 0.2], [0.5, 0.25, 1.0]]);

        let first = read_color(&mut Cur::new(&buf), &ReadOptions::default(), "test").unwrap();
        assert_eq!(first, Some([1.0, 0.0, 0.2]));
    }

    #[test]
    fn test_percentages() {
        let opts = ReadOptions::default();

        let buf = chunk(INT_PERCENT, &Bytes::new().u16(45).build());
        let pct = read_percentage(&mut Cur::new(&buf), &opts, "test").unwrap().unwrap();
        assert!((pct - 0.45).abs() < 1e-6);

        let buf = chunk(FLOAT_PERCENT, &Bytes::new().f32(0.75).build());
        let pct = read_percentage(&mut Cur::new(&buf), &opts, "test").unwrap();
        assert_eq!(pct, Some(0.75));

        let buf = chunk(0x0099, &[1, 2, 3]);
        assert_eq!(read_percentage(&mut Cur::new(&buf), &opts, "test").unwrap(), None);
    }
}
