use crate::app::{Rect, Vec2};

use super::font::{glyph_rows, GlyphRows, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::surface::{ensure_finite_rect, Color, Surface, SurfaceError, TextAlign, TextStyle};

const FALLBACK_GLYPH_CHAR: char = '?';

/// RGBA8 framebuffer view that rasterizes surface commands with alpha blending.
pub struct PixelFrame<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelFrame<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * 4;
        if frame.len() != expected {
            return Err(SurfaceError::BufferSize {
                width,
                height,
                expected,
                actual: frame.len(),
            });
        }
        Ok(Self {
            frame,
            width,
            height,
        })
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.frame[offset..offset + 4]);
        out
    }

    fn fill_px(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Color) {
        let start_x = left.max(0);
        let start_y = top.max(0);
        let end_x = right.min(self.width as i32);
        let end_y = bottom.min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for y in start_y..end_y {
            for x in start_x..end_x {
                self.blend_pixel(x as usize, y as usize, color);
            }
        }
    }

    fn blend_pixel(&mut self, x: usize, y: usize, color: Color) {
        let Some(pixel_offset) = y
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x))
        else {
            return;
        };
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        let Some(dst) = self.frame.get_mut(byte_offset..byte_offset + 4) else {
            return;
        };
        match color.a {
            0 => {}
            255 => dst.copy_from_slice(&color.to_rgba()),
            alpha => {
                let src = color.to_rgba();
                let alpha = alpha as u32;
                for channel in 0..3 {
                    let blended =
                        (src[channel] as u32 * alpha + dst[channel] as u32 * (255 - alpha) + 127)
                            / 255;
                    dst[channel] = blended as u8;
                }
                dst[3] = 255;
            }
        }
    }

    fn draw_glyph(&mut self, left: i32, top: i32, rows: GlyphRows, scale: i32, color: Color) {
        for (row_index, row_bits) in rows.iter().enumerate() {
            let glyph_y = top + row_index as i32 * scale;
            for col in 0..GLYPH_WIDTH {
                if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let glyph_x = left + col * scale;
                self.fill_px(glyph_x, glyph_y, glyph_x + scale, glyph_y + scale, color);
            }
        }
    }
}

/// Integer glyph scale for a requested font size; the 7-row cell never drops below 1x.
pub(crate) fn text_scale(size_px: f32) -> i32 {
    if !size_px.is_finite() {
        return 1;
    }
    ((size_px / GLYPH_HEIGHT as f32).round() as i32).max(1)
}

pub(crate) fn text_width_px(text: &str, size_px: f32) -> i32 {
    let scale = text_scale(size_px);
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return 0;
    }
    chars * (GLYPH_WIDTH + 1) * scale - scale
}

impl Surface for PixelFrame<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        ensure_finite_rect(rect, "fill_rect")?;
        self.fill_px(
            rect.x.round() as i32,
            rect.y.round() as i32,
            rect.right().round() as i32,
            rect.bottom().round() as i32,
            color,
        );
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        line_width: f32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        ensure_finite_rect(rect, "stroke_rect")?;
        if !line_width.is_finite() {
            return Err(SurfaceError::NonFiniteGeometry {
                primitive: "stroke_rect",
            });
        }
        let half = (line_width.max(1.0) / 2.0).round().max(1.0) as i32;
        let left = rect.x.round() as i32;
        let top = rect.y.round() as i32;
        let right = rect.right().round() as i32;
        let bottom = rect.bottom().round() as i32;

        // Bands are disjoint so translucent strokes do not double-blend corners.
        self.fill_px(left - half, top - half, right + half, top + half, color);
        self.fill_px(left - half, bottom - half, right + half, bottom + half, color);
        self.fill_px(left - half, top + half, left + half, bottom - half, color);
        self.fill_px(right - half, top + half, right + half, bottom - half, color);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) -> Result<(), SurfaceError> {
        if !at.x.is_finite() || !at.y.is_finite() {
            return Err(SurfaceError::NonFiniteGeometry {
                primitive: "fill_text",
            });
        }
        let scale = text_scale(style.size_px);
        let width = text_width_px(text, style.size_px);
        let anchor_x = at.x.round() as i32;
        let mut x = match style.align {
            TextAlign::Left => anchor_x,
            TextAlign::Center => anchor_x - width / 2,
            TextAlign::Right => anchor_x - width,
        };
        let top = at.y.round() as i32 - GLYPH_HEIGHT * scale;
        let fallback = glyph_rows(FALLBACK_GLYPH_CHAR).unwrap_or_default();
        for ch in text.chars() {
            let rows = glyph_rows(ch).unwrap_or(fallback);
            self.draw_glyph(x, top, rows, scale, style.color);
            x += (GLYPH_WIDTH + 1) * scale;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; width as usize * height as usize * 4]
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let mut bytes = vec![0u8; 10];
        let error = PixelFrame::new(&mut bytes, 4, 4).err().expect("error");
        assert_eq!(
            error,
            SurfaceError::BufferSize {
                width: 4,
                height: 4,
                expected: 64,
                actual: 10
            }
        );
    }

    #[test]
    fn opaque_fill_writes_only_inside_rect() {
        let mut bytes = buffer(8, 8);
        let mut frame = PixelFrame::new(&mut bytes, 8, 8).expect("frame");
        let red = Color::rgb(255, 0, 0);
        frame
            .fill_rect(Rect::new(2.0, 2.0, 3.0, 3.0), red)
            .expect("fill");

        assert_eq!(frame.pixel(2, 2), [255, 0, 0, 255]);
        assert_eq!(frame.pixel(4, 4), [255, 0, 0, 255]);
        assert_eq!(frame.pixel(5, 5), [0, 0, 0, 0]);
        assert_eq!(frame.pixel(1, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn fill_outside_bounds_is_clipped_without_panic() {
        let mut bytes = buffer(4, 4);
        let mut frame = PixelFrame::new(&mut bytes, 4, 4).expect("frame");
        frame
            .fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Color::WHITE)
            .expect("fill");
        frame
            .fill_rect(Rect::new(50.0, 50.0, 5.0, 5.0), Color::BLACK)
            .expect("fill");

        assert_eq!(frame.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn translucent_fill_blends_with_existing_pixels() {
        let mut bytes = buffer(2, 2);
        let mut frame = PixelFrame::new(&mut bytes, 2, 2).expect("frame");
        frame.clear(Color::WHITE);
        frame
            .fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::BLACK.with_opacity(0.5))
            .expect("fill");

        let [r, g, b, a] = frame.pixel(1, 1);
        assert_eq!(a, 255);
        assert!((126..=128).contains(&r), "r = {r}");
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn fully_transparent_fill_is_a_no_op() {
        let mut bytes = buffer(2, 2);
        let mut frame = PixelFrame::new(&mut bytes, 2, 2).expect("frame");
        frame.clear(Color::WHITE);
        frame
            .fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::BLACK.with_opacity(0.0))
            .expect("fill");
        assert_eq!(frame.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn stroke_leaves_interior_untouched() {
        let mut bytes = buffer(20, 20);
        let mut frame = PixelFrame::new(&mut bytes, 20, 20).expect("frame");
        frame
            .stroke_rect(Rect::new(5.0, 5.0, 10.0, 10.0), 2.0, Color::WHITE)
            .expect("stroke");

        assert_eq!(frame.pixel(5, 5), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(14, 10), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn text_scale_follows_font_size() {
        assert_eq!(text_scale(14.0), 2);
        assert_eq!(text_scale(16.0), 2);
        assert_eq!(text_scale(20.0), 3);
        assert_eq!(text_scale(1.0), 1);
        assert_eq!(text_scale(f32::NAN), 1);
    }

    #[test]
    fn text_width_counts_advance_minus_trailing_gap() {
        assert_eq!(text_width_px("", 16.0), 0);
        assert_eq!(text_width_px("A", 7.0), 5);
        assert_eq!(text_width_px("AB", 7.0), 11);
    }

    #[test]
    fn text_is_drawn_above_baseline() {
        let mut bytes = buffer(40, 20);
        let mut frame = PixelFrame::new(&mut bytes, 40, 20).expect("frame");
        frame
            .fill_text(
                "I",
                Vec2::new(0.0, 10.0),
                TextStyle::new(Color::WHITE, 7.0),
            )
            .expect("text");

        // Top row of 'I' is 0b01110 starting at y = 10 - 7.
        assert_eq!(frame.pixel(1, 3), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(0, 3), [0, 0, 0, 0]);
        assert_eq!(frame.pixel(2, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn right_aligned_text_ends_at_anchor() {
        let mut bytes = buffer(40, 20);
        let mut frame = PixelFrame::new(&mut bytes, 40, 20).expect("frame");
        frame
            .fill_text(
                "_",
                Vec2::new(20.0, 10.0),
                TextStyle::new(Color::WHITE, 7.0).aligned(TextAlign::Right),
            )
            .expect("text");

        assert_eq!(frame.pixel(19, 9), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(15, 9), [255, 255, 255, 255]);
        assert_eq!(frame.pixel(20, 9), [0, 0, 0, 0]);
        assert_eq!(frame.pixel(14, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn unknown_characters_draw_fallback_without_panic() {
        let mut bytes = buffer(40, 20);
        let mut frame = PixelFrame::new(&mut bytes, 40, 20).expect("frame");
        frame
            .fill_text(
                "\u{e9}",
                Vec2::new(0.0, 10.0),
                TextStyle::new(Color::WHITE, 7.0),
            )
            .expect("text");
        let lit = (0..40)
            .flat_map(|x| (0..20).map(move |y| (x, y)))
            .filter(|(x, y)| frame.pixel(*x, *y)[3] != 0)
            .count();
        assert!(lit > 0);
    }
}
