//! Stencil compositing: pasting a layer through a greyscale mask.
//!
//! The mask value is a linear blend weight, not a threshold:
//! `out = (dst * (255 - m) + src * m) / 255`, rounded to nearest.

use image::{GrayImage, Rgb, RgbImage};

use crate::error::{PaintError, Result};
use crate::types::Colour;

/// Divide by 255 with rounding, exact for all `v` in `0..=255 * 255`.
#[inline]
fn div255(v: u32) -> u8 {
    let t = v + 128;
    (((t >> 8) + t) >> 8) as u8
}

/// Blend one channel of `src` over `dst` with weight `m`.
#[inline]
pub fn blend_channel(dst: u8, src: u8, m: u8) -> u8 {
    let m = m as u32;
    div255(dst as u32 * (255 - m) + src as u32 * m)
}

fn check_size(what: &str, canvas: (u32, u32), other: (u32, u32)) -> Result<()> {
    if canvas != other {
        return Err(PaintError::Composite {
            message: format!(
                "{} is {}x{} but the canvas is {}x{}",
                what, other.0, other.1, canvas.0, canvas.1
            ),
        });
    }
    Ok(())
}

/// Paste `layer` onto `canvas` using `mask` as per-pixel alpha.
pub fn stencil_paste(canvas: &mut RgbImage, layer: &RgbImage, mask: &GrayImage) -> Result<()> {
    check_size("layer", canvas.dimensions(), layer.dimensions())?;
    check_size("mask", canvas.dimensions(), mask.dimensions())?;

    for ((dst, src), m) in canvas.pixels_mut().zip(layer.pixels()).zip(mask.pixels()) {
        let m = m[0];
        for c in 0..3 {
            dst[c] = blend_channel(dst[c], src[c], m);
        }
    }

    Ok(())
}

/// Paste a solid colour onto `canvas` through `mask`.
pub fn paste_colour(canvas: &mut RgbImage, colour: Colour, mask: &GrayImage) -> Result<()> {
    check_size("mask", canvas.dimensions(), mask.dimensions())?;

    let src = colour.to_pixel();
    for (dst, m) in canvas.pixels_mut().zip(mask.pixels()) {
        let m = m[0];
        for c in 0..3 {
            dst[c] = blend_channel(dst[c], src[c], m);
        }
    }

    Ok(())
}

/// A black canvas of the given size.
pub fn black_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([0, 0, 0]))
}

/// A solid colour stenciled through `mask` onto black, sized like the mask.
pub fn tint_mask(mask: &GrayImage, colour: Colour) -> RgbImage {
    let src = colour.to_pixel();
    RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let m = mask.get_pixel(x, y)[0];
        Rgb([
            blend_channel(0, src[0], m),
            blend_channel(0, src[1], m),
            blend_channel(0, src[2], m),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_div255_exact() {
        for v in 0..=(255u32 * 255) {
            let expected = (v as f64 / 255.0).round() as u8;
            assert_eq!(div255(v), expected, "v = {}", v);
        }
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend_channel(10, 200, 0), 10);
        assert_eq!(blend_channel(10, 200, 255), 200);
        assert_eq!(blend_channel(0, 255, 128), 128);
    }

    #[test]
    fn test_tint_mask_is_linear() {
        let mut mask = GrayImage::new(3, 1);
        mask.put_pixel(0, 0, Luma([0]));
        mask.put_pixel(1, 0, Luma([255]));
        mask.put_pixel(2, 0, Luma([51]));

        let tinted = tint_mask(&mask, Colour::rgb(255, 100, 0));
        assert_eq!(tinted.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(tinted.get_pixel(1, 0).0, [255, 100, 0]);
        assert_eq!(tinted.get_pixel(2, 0).0, [51, 20, 0]);
    }

    #[test]
    fn test_stencil_paste_keeps_unmasked_pixels() {
        let mut canvas = RgbImage::from_pixel(2, 1, Rgb([9, 9, 9]));
        let layer = RgbImage::from_pixel(2, 1, Rgb([200, 0, 0]));
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(1, 0, Luma([255]));

        stencil_paste(&mut canvas, &layer, &mask).unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, [9, 9, 9]);
        assert_eq!(canvas.get_pixel(1, 0).0, [200, 0, 0]);
    }

    #[test]
    fn test_paste_colour_size_mismatch() {
        let mut canvas = black_canvas(2, 2);
        let mask = GrayImage::new(3, 2);
        let err = paste_colour(&mut canvas, Colour::WHITE, &mask).unwrap_err();
        assert!(matches!(err, PaintError::Composite { .. }));
    }

    #[test]
    fn test_paste_colour_white() {
        let mut canvas = black_canvas(1, 1);
        let mask = GrayImage::from_pixel(1, 1, Luma([255]));
        paste_colour(&mut canvas, Colour::WHITE, &mask).unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
    }
}
