// Loads the photo to cut out and shrinks it to fit the window bounds.
use crate::error::{Error, Result};
use image::{RgbaImage, imageops::FilterType};
use std::path::Path;
use tracing::info;

/// Decode `path` (any format the `image` crate knows) and downsize it to fit
/// inside `max_w` x `max_h`, keeping the aspect ratio. Never upscales.
pub fn load_photo(path: &Path, max_w: u32, max_h: u32) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let photo = fit_within(decoded.into_rgba8(), max_w, max_h);
    info!("loaded {} at {}x{}", path.display(), photo.width(), photo.height());
    Ok(photo)
}

pub fn fit_within(photo: RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = photo.dimensions();
    let (fw, fh) = fitted_size(w, h, max_w, max_h);
    if (fw, fh) == (w, h) {
        return photo;
    }
    image::imageops::resize(&photo, fw, fh, FilterType::Triangle)
}

/// Largest size with the same aspect as `w` x `h` inside the bounds
/// (at least 1x1).
pub fn fitted_size(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let fw = ((w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let fh = ((h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (fw, fh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn small_photos_are_left_alone() {
        assert_eq!(fitted_size(640, 480, 1024, 768), (640, 480));
    }

    #[test]
    fn large_photos_shrink_by_the_tighter_bound() {
        assert_eq!(fitted_size(4000, 3000, 1024, 768), (1024, 768));
        assert_eq!(fitted_size(3000, 4000, 1024, 768), (576, 768));
        assert_eq!(fitted_size(2048, 100, 1024, 768), (1024, 50));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fitted_size(10_000, 1, 100, 100), (100, 1));
    }

    #[test]
    fn fit_within_resizes_pixels() {
        let photo = RgbaImage::from_pixel(200, 100, Rgba([5, 5, 5, 255]));
        assert_eq!(fit_within(photo, 50, 50).dimensions(), (50, 25));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_photo(Path::new("does/not/exist.png"), 10, 10).unwrap_err();
        assert!(matches!(err, Error::ImageLoad { .. }));
        assert!(err.to_string().contains("exist.png"));
    }

    #[test]
    fn round_trips_a_png_from_disk() {
        let dir = std::env::temp_dir().join(format!("crop-tool-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("photo.png");
        RgbaImage::from_pixel(30, 10, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let photo = load_photo(&path, 15, 15).unwrap();
        assert_eq!(photo.dimensions(), (15, 5));
        std::fs::remove_dir_all(&dir).ok();
    }
}
