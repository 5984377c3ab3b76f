use thiserror::Error;

use crate::app::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha taken from a 0..=1 opacity; out-of-range and NaN clamp.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        Self {
            a: (opacity * 255.0).round() as u8,
            ..self
        }
    }

    pub(crate) fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text placement follows the canvas convention: `y` is the baseline and
/// `align` decides which end of the run sits at `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size_px: f32,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(color: Color, size_px: f32) -> Self {
        Self {
            color,
            size_px,
            align: TextAlign::Left,
        }
    }

    pub const fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("frame buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("{primitive} received non-finite geometry")]
    NonFiniteGeometry { primitive: &'static str },
    #[error("failed to present frame: {0}")]
    Present(String),
}

/// Drawable target for scenes. Coordinates are surface units with the origin
/// at the top-left corner and y growing downward.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError>;
    fn stroke_rect(&mut self, rect: Rect, line_width: f32, color: Color)
        -> Result<(), SurfaceError>;
    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) -> Result<(), SurfaceError>;
}

pub(crate) fn ensure_finite_rect(rect: Rect, primitive: &'static str) -> Result<(), SurfaceError> {
    let finite = rect.x.is_finite()
        && rect.y.is_finite()
        && rect.width.is_finite()
        && rect.height.is_finite();
    if finite {
        Ok(())
    } else {
        Err(SurfaceError::NonFiniteGeometry { primitive })
    }
}
