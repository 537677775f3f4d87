// "Share": writes the mask and the cut-out next to each other as PNGs.
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Files written by one save.
#[derive(Debug, PartialEq)]
pub struct Saved {
    pub mask: PathBuf,
    pub cutout: Option<PathBuf>, // absent when there is no photo to cut
}

/// Write `<stem>-mask.png` and `<stem>-cutout.png` into `out_dir`.
/// Nothing is written (and `Ok(None)` returned) before the first stroke.
pub fn save_outputs(canvas: &Canvas, out_dir: &Path, stem: &str) -> Result<Option<Saved>> {
    let Some(mask) = canvas.mask() else {
        debug!("save skipped: nothing drawn yet");
        return Ok(None);
    };
    std::fs::create_dir_all(out_dir)?;

    let mask_path = out_dir.join(format!("{stem}-mask.png"));
    mask.save(&mask_path).map_err(|source| Error::ImageSave { path: mask_path.clone(), source })?;

    let cutout = match canvas.composite() {
        Some(composite) => {
            let path = out_dir.join(format!("{stem}-cutout.png"));
            composite
                .save(&path)
                .map_err(|source| Error::ImageSave { path: path.clone(), source })?;
            Some(path)
        }
        None => None,
    };

    info!(
        "saved {}{}",
        mask_path.display(),
        cutout.as_ref().map(|p| format!(" and {}", p.display())).unwrap_or_default()
    );
    Ok(Some(Saved { mask: mask_path, cutout }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use image::{Rgba, RgbaImage};

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crop-tool-{name}-{}", std::process::id()))
    }

    fn triangle(canvas: &mut Canvas) {
        canvas.begin_stroke(Point::new(1.0, 1.0));
        canvas.extend_stroke(Point::new(7.0, 1.0));
        canvas.end_stroke(Some(Point::new(4.0, 7.0)));
    }

    #[test]
    fn nothing_is_written_before_the_first_stroke() {
        let dir = scratch_dir("empty");
        let canvas = Canvas::new(8, 8);
        assert_eq!(save_outputs(&canvas, &dir, "shot").unwrap(), None);
        assert!(!dir.exists());
    }

    #[test]
    fn writes_mask_and_cutout() {
        let dir = scratch_dir("both");
        let mut canvas = Canvas::new(8, 8);
        canvas.set_source_image(RgbaImage::from_pixel(8, 8, Rgba([50, 60, 70, 255])));
        triangle(&mut canvas);

        let saved = save_outputs(&canvas, &dir, "shot").unwrap().unwrap();
        assert!(saved.mask.ends_with("shot-mask.png"));
        let cutout = saved.cutout.unwrap();

        let mask = image::open(&saved.mask).unwrap().into_luma8();
        assert_eq!(mask.dimensions(), (8, 8));
        assert_eq!(mask.get_pixel(4, 3).0[0], 0);
        let cut = image::open(&cutout).unwrap().into_rgba8();
        assert_eq!(cut.get_pixel(4, 3), &Rgba([50, 60, 70, 255]));
        assert_eq!(cut.get_pixel(0, 7).0[3], 0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn mask_only_without_photo() {
        let dir = scratch_dir("mask-only");
        let mut canvas = Canvas::new(8, 8);
        triangle(&mut canvas);

        let saved = save_outputs(&canvas, &dir, "shot").unwrap().unwrap();
        assert!(saved.mask.exists());
        assert!(saved.cutout.is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
