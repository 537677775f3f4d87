// Builds the frame the window shows from the canvas state.
// Visual: the photo with the cut-away part washed out, the bare mask, or the
// cut-out over a checkerboard, plus the stroke currently being drawn.
use crate::canvas::Canvas;
use crate::composite::over_rgb;
use crate::raster::{for_each_fill_pixel, for_each_polyline_pixel};
use crate::types::{FrameBuffer, Operation, Point};
use image::RgbaImage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    /// Photo, with areas outside the selection faded toward white.
    #[default]
    Overlay,
    /// The stencil itself: black = kept, white = cut.
    Mask,
    /// The cut-out on a checkerboard.
    Cutout,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Overlay => View::Mask,
            View::Mask => View::Cutout,
            View::Cutout => View::Overlay,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Overlay => "OVERLAY",
            View::Mask => "MASK",
            View::Cutout => "CUTOUT",
        }
    }
}

const WHITE: u32 = 0x00_FF_FF_FF;
const CHECKER_LIGHT: u32 = 0x00_CC_CC_CC;
const CHECKER_DARK: u32 = 0x00_99_99_99;
const CHECKER_SIZE: usize = 8;
const FADE_ALPHA: u8 = 170; // how strongly unselected photo is washed out

const UNION_COLOR: [u8; 3] = [0x00, 0x00, 0xFF]; // blue
const SUBTRACTION_COLOR: [u8; 3] = [0xFF, 0x00, 0x00]; // red
const PREVIEW_FILL_ALPHA: u8 = 128;

/// Draw the canvas into `screen` (same size as the canvas).
pub fn render(canvas: &Canvas, view: View, screen: &mut FrameBuffer) {
    match view {
        View::Overlay => render_overlay(canvas, screen),
        View::Mask => render_mask(canvas, screen),
        View::Cutout => render_cutout(canvas, screen),
    }
    if let Some(path) = canvas.current_path() {
        draw_preview(screen, path, canvas.operation());
    }
}

fn render_overlay(canvas: &Canvas, screen: &mut FrameBuffer) {
    match canvas.source() {
        Some(photo) => copy_photo(photo, screen),
        None => screen.pixels.fill(WHITE),
    }
    let Some(mask) = canvas.mask() else { return };
    for (px, m) in screen.pixels.iter_mut().zip(mask.pixels()) {
        let cut = m.0[0];
        if cut > 0 {
            let a = ((u16::from(cut) * u16::from(FADE_ALPHA)) / 255) as u8;
            *px = over_rgb(*px, [0xFF, 0xFF, 0xFF], a);
        }
    }
}

fn render_mask(canvas: &Canvas, screen: &mut FrameBuffer) {
    match canvas.mask() {
        Some(mask) => {
            for (px, m) in screen.pixels.iter_mut().zip(mask.pixels()) {
                let v = u32::from(m.0[0]);
                *px = (v << 16) | (v << 8) | v;
            }
        }
        None => screen.pixels.fill(WHITE),
    }
}

fn render_cutout(canvas: &Canvas, screen: &mut FrameBuffer) {
    let Some(cut) = canvas.composite() else {
        // nothing selected yet: show what there is
        return render_overlay(canvas, screen);
    };
    let w = screen.width;
    for (i, (px, src)) in screen.pixels.iter_mut().zip(cut.pixels()).enumerate() {
        let (x, y) = (i % w, i / w);
        let checker = if ((x / CHECKER_SIZE) + (y / CHECKER_SIZE)) % 2 == 0 {
            CHECKER_LIGHT
        } else {
            CHECKER_DARK
        };
        *px = over_rgb(checker, [src.0[0], src.0[1], src.0[2]], src.0[3]);
    }
}

fn copy_photo(photo: &RgbaImage, screen: &mut FrameBuffer) {
    for (px, src) in screen.pixels.iter_mut().zip(photo.pixels()) {
        *px = over_rgb(WHITE, [src.0[0], src.0[1], src.0[2]], src.0[3]);
    }
}

/// The unfinished stroke: translucent fill plus an opaque open outline.
fn draw_preview(screen: &mut FrameBuffer, path: &[Point], operation: Operation) {
    let color = match operation {
        Operation::Union => UNION_COLOR,
        Operation::Subtraction => SUBTRACTION_COLOR,
    };
    let (w, h) = (screen.width, screen.height);
    for_each_fill_pixel(path, w, h, |x, y| {
        let idx = y * w + x;
        screen.pixels[idx] = over_rgb(screen.pixels[idx], color, PREVIEW_FILL_ALPHA);
    });
    let solid = (u32::from(color[0]) << 16) | (u32::from(color[1]) << 8) | u32::from(color[2]);
    for_each_polyline_pixel(path, w, h, |x, y| {
        screen.pixels[y * w + x] = solid;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn screen_for(canvas: &Canvas) -> FrameBuffer {
        FrameBuffer::new(canvas.width() as usize, canvas.height() as usize)
    }

    fn square(canvas: &mut Canvas) {
        canvas.begin_stroke(Point::new(2.0, 2.0));
        canvas.extend_stroke(Point::new(8.0, 2.0));
        canvas.extend_stroke(Point::new(8.0, 8.0));
        canvas.end_stroke(Some(Point::new(2.0, 8.0)));
    }

    #[test]
    fn views_cycle() {
        assert_eq!(View::Overlay.next(), View::Mask);
        assert_eq!(View::Mask.next(), View::Cutout);
        assert_eq!(View::Cutout.next(), View::Overlay);
    }

    #[test]
    fn blank_canvas_renders_white() {
        let canvas = Canvas::new(4, 4);
        for view in [View::Overlay, View::Mask, View::Cutout] {
            let mut screen = screen_for(&canvas);
            render(&canvas, view, &mut screen);
            assert!(screen.pixels.iter().all(|&p| p == WHITE));
        }
    }

    #[test]
    fn mask_view_shows_black_selection() {
        let mut canvas = Canvas::new(10, 10);
        square(&mut canvas);
        let mut screen = screen_for(&canvas);
        render(&canvas, View::Mask, &mut screen);
        assert_eq!(screen.pixels[5 * 10 + 5], 0);
        assert_eq!(screen.pixels[0], WHITE);
    }

    #[test]
    fn overlay_keeps_selection_and_fades_the_rest() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_source_image(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        square(&mut canvas);
        let mut screen = screen_for(&canvas);
        render(&canvas, View::Overlay, &mut screen);
        assert_eq!(screen.pixels[5 * 10 + 5], 0);
        assert_ne!(screen.pixels[0], 0);
    }

    #[test]
    fn cutout_shows_checkerboard_outside_selection() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_source_image(RgbaImage::from_pixel(20, 20, Rgba([10, 20, 30, 255])));
        square(&mut canvas);
        let mut screen = screen_for(&canvas);
        render(&canvas, View::Cutout, &mut screen);
        assert_eq!(screen.pixels[5 * 20 + 5], 0x00_0A_14_1E);
        assert_eq!(screen.pixels[0], CHECKER_LIGHT);
        assert_eq!(screen.pixels[19 * 20 + 9], CHECKER_DARK);
    }

    #[test]
    fn stroke_in_progress_is_tinted_by_mode() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_operation(Operation::Subtraction);
        canvas.begin_stroke(Point::new(1.0, 1.0));
        canvas.extend_stroke(Point::new(8.0, 1.0));
        canvas.extend_stroke(Point::new(8.0, 8.0));
        let mut screen = screen_for(&canvas);
        render(&canvas, View::Overlay, &mut screen);
        // outline is solid red, interior is half red over white
        assert_eq!(screen.pixels[10 + 4], 0x00_FF_00_00);
        let inside = screen.pixels[3 * 10 + 6];
        assert_eq!((inside >> 16) & 0xFF, 0xFF);
        assert!((inside & 0xFF) > 0 && (inside & 0xFF) < 0xFF);
    }
}
