// Applies the mask to the photo: black mask pixels keep the photo, white ones
// cut it away. Any gray in between gives partial alpha.
use image::{GrayImage, Rgba, RgbaImage};

/// Photo colour with alpha = 255 - mask luminance.
/// Returns `None` when the two images differ in size.
pub fn apply_mask(photo: &RgbaImage, mask: &GrayImage) -> Option<RgbaImage> {
    if photo.dimensions() != mask.dimensions() {
        return None;
    }
    let mut out = RgbaImage::new(photo.width(), photo.height());
    for ((dst, src), m) in out.pixels_mut().zip(photo.pixels()).zip(mask.pixels()) {
        let keep = 255 - m.0[0];
        let alpha = mul_div255(u16::from(src.0[3]), u16::from(keep));
        *dst = Rgba([src.0[0], src.0[1], src.0[2], alpha]);
    }
    Some(out)
}

/// Straight-alpha `src` over an opaque 0x00RRGGBB pixel.
#[inline]
pub fn over_rgb(dst: u32, src: [u8; 3], alpha: u8) -> u32 {
    let a = u16::from(alpha);
    let inv = 255 - a;
    let dr = ((dst >> 16) & 0xFF) as u16;
    let dg = ((dst >> 8) & 0xFF) as u16;
    let db = (dst & 0xFF) as u16;
    let r = mul_div255(u16::from(src[0]), a) as u32 + mul_div255(dr, inv) as u32;
    let g = mul_div255(u16::from(src[1]), a) as u32 + mul_div255(dg, inv) as u32;
    let b = mul_div255(u16::from(src[2]), a) as u32 + mul_div255(db, inv) as u32;
    (r.min(255) << 16) | (g.min(255) << 8) | b.min(255)
}

#[inline]
fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn black_keeps_and_white_cuts() {
        let photo = RgbaImage::from_pixel(2, 1, Rgba([10, 20, 30, 255]));
        let mut mask = GrayImage::new(2, 1);
        mask.put_pixel(0, 0, Luma([0]));
        mask.put_pixel(1, 0, Luma([255]));

        let out = apply_mask(&photo, &mask).unwrap();
        assert_eq!(out.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
        assert_eq!(out.get_pixel(1, 0).0[3], 0);
        // colour survives even where cut, only alpha changes
        assert_eq!(&out.get_pixel(1, 0).0[..3], &[10, 20, 30]);
    }

    #[test]
    fn existing_photo_alpha_is_respected() {
        let photo = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let mask = GrayImage::from_pixel(1, 1, Luma([0]));
        assert_eq!(apply_mask(&photo, &mask).unwrap().get_pixel(0, 0).0[3], 128);
    }

    #[test]
    fn size_mismatch_is_skipped() {
        let photo = RgbaImage::new(3, 3);
        let mask = GrayImage::new(2, 3);
        assert!(apply_mask(&photo, &mask).is_none());
    }

    #[test]
    fn over_rgb_endpoints() {
        assert_eq!(over_rgb(0x00_00_00_00, [255, 0, 0], 255), 0x00_FF_00_00);
        assert_eq!(over_rgb(0x00_12_34_56, [255, 0, 0], 0), 0x00_12_34_56);
        let half = over_rgb(0x00_00_00_00, [0, 0, 255], 128);
        assert_eq!(half, 0x00_00_00_80);
    }
}
