// The drawing surface: collects closed strokes from pointer input, keeps the
// mask and the cut-out in step with them, and owns the source photo.
//
// Nothing here fails. Input that cannot be used (no stroke in progress, a
// path too short to close, no photo yet) is skipped and logged at debug.
use crate::composite::apply_mask;
use crate::raster::rasterize;
use crate::types::{Operation, Point, Stroke};
use image::{GrayImage, RgbaImage, imageops::FilterType};
use tracing::debug;

pub struct Canvas {
    width: u32,
    height: u32,
    strokes: Vec<Stroke>,
    path: Option<Vec<Point>>, // the stroke being drawn right now
    operation: Operation,
    source: Option<RgbaImage>,
    mask: Option<GrayImage>,
    composite: Option<RgbaImage>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            strokes: Vec::new(),
            path: None,
            operation: Operation::Union,
            source: None,
            mask: None,
            composite: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pen down: start a new path. An unfinished path is dropped.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.path.is_some() {
            debug!("begin_stroke: discarding unfinished path");
        }
        self.path = Some(vec![point]);
    }

    /// Pen moved: add a segment to the path being drawn.
    pub fn extend_stroke(&mut self, point: Point) {
        let Some(path) = self.path.as_mut() else {
            debug!("extend_stroke: no stroke in progress");
            return;
        };
        // repeated samples at the same spot add nothing
        if path.last() != Some(&point) {
            path.push(point);
        }
    }

    /// Pen up: close the path, append it with the current operation and
    /// rebuild the mask and cut-out.
    pub fn end_stroke(&mut self, point: Option<Point>) {
        if let Some(p) = point {
            self.extend_stroke(p);
        }
        let Some(points) = self.path.take() else {
            debug!("end_stroke: no stroke in progress");
            return;
        };
        if points.len() < 2 {
            debug!("end_stroke: path of {} point(s) dropped", points.len());
            return;
        }
        self.strokes.push(Stroke { points, operation: self.operation });
        self.redraw();
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Replace the photo. A photo of another size is scaled to the canvas.
    pub fn set_source_image(&mut self, image: RgbaImage) {
        let image = if image.dimensions() != (self.width, self.height) {
            debug!(
                "set_source_image: scaling {}x{} to {}x{}",
                image.width(),
                image.height(),
                self.width,
                self.height
            );
            image::imageops::resize(&image, self.width, self.height, FilterType::Triangle)
        } else {
            image
        };
        self.source = Some(image);
        self.recomposite();
    }

    /// Clear strokes, the path in progress and both derived images.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.path = None;
        self.mask = None;
        self.composite = None;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn current_path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }

    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    pub fn mask(&self) -> Option<&GrayImage> {
        self.mask.as_ref()
    }

    pub fn composite(&self) -> Option<&RgbaImage> {
        self.composite.as_ref()
    }

    fn redraw(&mut self) {
        let mask = rasterize(&self.strokes, self.width, self.height);
        debug!(
            "rasterized {} stroke(s) into {}x{} mask",
            self.strokes.len(),
            self.width,
            self.height
        );
        self.mask = Some(mask);
        self.recomposite();
    }

    fn recomposite(&mut self) {
        self.composite = match (&self.source, &self.mask) {
            (Some(source), Some(mask)) => apply_mask(source, mask),
            (None, Some(_)) => {
                debug!("composite skipped: no source image");
                None
            }
            _ => None,
        };
    }
}
