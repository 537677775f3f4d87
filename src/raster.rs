// Software rasterization of closed strokes into the mask.
// Every stroke is filled (non-zero winding, sampled at pixel centres) and then
// outlined with a 1-pixel line, so even thin slivers leave a trace.
use crate::types::{Operation, Point, Stroke};
use image::{GrayImage, Luma};

/// Mask background: nothing selected yet.
pub const BACKGROUND: u8 = 255;

/// Render all strokes, in order, into a fresh white mask of `width` x `height`.
/// Later strokes overwrite earlier ones where they overlap.
pub fn rasterize(strokes: &[Stroke], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
    for stroke in strokes {
        paint_stroke(&mut mask, stroke);
    }
    mask
}

/// Paint one stroke into the mask with its operation's value.
pub fn paint_stroke(mask: &mut GrayImage, stroke: &Stroke) {
    paint_path(mask, &stroke.points, stroke.operation);
}

pub fn paint_path(mask: &mut GrayImage, points: &[Point], operation: Operation) {
    let value = Luma([operation.mask_value()]);
    let (w, h) = mask.dimensions();
    for_each_fill_pixel(points, w as usize, h as usize, |x, y| {
        mask.put_pixel(x as u32, y as u32, value);
    });
    for_each_outline_pixel(points, w as usize, h as usize, |x, y| {
        mask.put_pixel(x as u32, y as u32, value);
    });
}

/// Visit every pixel whose centre lies inside the closed polygon `points`
/// (non-zero winding rule). Pixels outside `width` x `height` are skipped.
pub fn for_each_fill_pixel<F>(points: &[Point], width: usize, height: usize, mut put: F)
where
    F: FnMut(usize, usize),
{
    if points.len() < 3 || width == 0 || height == 0 {
        return;
    }

    let (min_y, max_y) = points
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let first_row = (min_y.floor().max(0.0)) as usize;
    let last_row = (max_y.ceil().min(height as f32)).max(0.0) as usize;

    // (x at the scanline, +1 for an upward edge / -1 for a downward one)
    let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(points.len());

    for row in first_row..last_row {
        let yc = row as f32 + 0.5;
        crossings.clear();

        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            let dir = if a.y <= yc && yc < b.y {
                1
            } else if b.y <= yc && yc < a.y {
                -1
            } else {
                continue; // horizontal, or does not span this scanline
            };
            let t = (yc - a.y) / (b.y - a.y);
            crossings.push((a.x + t * (b.x - a.x), dir));
        }

        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut winding = 0;
        let mut span_start = 0.0_f32;
        for &(x, dir) in &crossings {
            let was_inside = winding != 0;
            winding += dir;
            if !was_inside && winding != 0 {
                span_start = x;
            } else if was_inside && winding == 0 {
                fill_span(span_start, x, row, width, &mut put);
            }
        }
    }
}

/// Pixels whose centre x (px + 0.5) lies in [x0, x1).
#[inline]
fn fill_span<F: FnMut(usize, usize)>(x0: f32, x1: f32, row: usize, width: usize, put: &mut F) {
    let first = (x0 - 0.5).ceil().max(0.0) as usize;
    let end = ((x1 - 0.5).ceil().min(width as f32)).max(0.0) as usize;
    for x in first..end {
        put(x, row);
    }
}

/// Visit the pixels of the closed 1-pixel outline through `points`,
/// including the closing segment back to the first point.
pub fn for_each_outline_pixel<F>(points: &[Point], width: usize, height: usize, mut put: F)
where
    F: FnMut(usize, usize),
{
    if points.len() < 2 {
        return;
    }
    for (i, a) in points.iter().enumerate() {
        if points.len() == 2 && i == 1 {
            break; // a two-point path is a single segment; don't walk it twice
        }
        let b = &points[(i + 1) % points.len()];
        draw_segment(a, b, width, height, &mut put);
    }
}

/// Visit every pixel of the open polyline through `points` (no closing edge).
pub fn for_each_polyline_pixel<F>(points: &[Point], width: usize, height: usize, mut put: F)
where
    F: FnMut(usize, usize),
{
    for pair in points.windows(2) {
        draw_segment(&pair[0], &pair[1], width, height, &mut put);
    }
}

/// Clip the segment to the canvas, then walk the pixels that land on it.
fn draw_segment<F>(a: &Point, b: &Point, width: usize, height: usize, put: &mut F)
where
    F: FnMut(usize, usize),
{
    let Some((a, b)) = clip_segment(a, b, width, height) else {
        return;
    };
    walk_line(to_pixel(a), to_pixel(b), |x, y| {
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            put(x as usize, y as usize);
        }
    });
}

/// Liang-Barsky clip of `a`-`b` to [-1, width] x [-1, height], in f64 so a
/// far-away endpoint keeps its direction. `None` when nothing is left.
fn clip_segment(
    a: &Point,
    b: &Point,
    width: usize,
    height: usize,
) -> Option<((f64, f64), (f64, f64))> {
    let (ax, ay) = (f64::from(a.x), f64::from(a.y));
    let (bx, by) = (f64::from(b.x), f64::from(b.y));
    if !(ax.is_finite() && ay.is_finite() && bx.is_finite() && by.is_finite()) {
        return None;
    }
    let (xmin, ymin) = (-1.0, -1.0);
    let (xmax, ymax) = (width as f64, height as f64);
    let (dx, dy) = (bx - ax, by - ay);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, ax - xmin), (dx, xmax - ax), (-dy, ay - ymin), (dy, ymax - ay)] {
        if p == 0.0 {
            if q < 0.0 {
                return None; // parallel to this edge and outside it
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let clamp = |x: f64, y: f64| (x.clamp(xmin, xmax), y.clamp(ymin, ymax));
    Some((clamp(ax + t0 * dx, ay + t0 * dy), clamp(ax + t1 * dx, ay + t1 * dy)))
}

#[inline]
fn to_pixel((x, y): (f64, f64)) -> (i64, i64) {
    (x.floor() as i64, y.floor() as i64)
}

/// Bresenham between two pixel positions, both ends inclusive.
fn walk_line<F: FnMut(i64, i64)>((x0, y0): (i64, i64), (x1, y1): (i64, i64), mut put: F) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put(x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
