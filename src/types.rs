// Core types shared by the canvas, the rasterizer and the window.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// A position in canvas pixel space (same space as the mask and the window).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// How a stroke combines with what is already in the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Operation {
    /// Paints the enclosed area as kept (black in the mask).
    #[default]
    Union,
    /// Paints the enclosed area as cut away (white in the mask).
    Subtraction,
}

impl Operation {
    pub fn toggled(self) -> Self {
        match self {
            Operation::Union => Operation::Subtraction,
            Operation::Subtraction => Operation::Union,
        }
    }

    /// Mask luminance this operation writes.
    pub fn mask_value(self) -> u8 {
        match self {
            Operation::Union => 0,
            Operation::Subtraction => 255,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Union => "ADD",
            Operation::Subtraction => "SUBTRACT",
        }
    }
}

/// One closed freehand contour. The closing edge (last point back to the
/// first) is implicit.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub operation: Operation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_the_two_modes() {
        assert_eq!(Operation::Union.toggled(), Operation::Subtraction);
        assert_eq!(Operation::Subtraction.toggled(), Operation::Union);
        assert_eq!(Operation::default(), Operation::Union);
    }

    #[test]
    fn union_paints_black_and_subtraction_white() {
        assert_eq!(Operation::Union.mask_value(), 0);
        assert_eq!(Operation::Subtraction.mask_value(), 255);
    }
}
