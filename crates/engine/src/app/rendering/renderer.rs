use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{Scene, Vec2};

use super::frame::PixelFrame;
use super::surface::{Color, SurfaceError};

const CLEAR_COLOR: Color = Color::BLACK;

/// Presents a fixed-size canvas scaled into the window.
pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    canvas_width: u32,
    canvas_height: u32,
}

impl Renderer {
    pub fn new(window: Arc<Window>, canvas_width: u32, canvas_height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(
            Arc::clone(&window),
            canvas_width,
            canvas_height,
            size.width,
            size.height,
        )?;
        Ok(Self {
            window,
            pixels,
            canvas_width,
            canvas_height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(
            Arc::clone(&self.window),
            self.canvas_width,
            self.canvas_height,
            width,
            height,
        )?;
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        canvas_width: u32,
        canvas_height: u32,
        window_width: u32,
        window_height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(window_width, window_height, window);
        Pixels::new(canvas_width, canvas_height, surface)
    }

    /// Maps a physical window position to canvas coordinates; `None` when
    /// the point falls in the letterbox around the canvas.
    pub fn window_to_canvas(&self, x: f32, y: f32) -> Option<Vec2> {
        self.pixels
            .window_pos_to_pixel((x, y))
            .ok()
            .map(|(px, py)| Vec2::new(px as f32, py as f32))
    }

    pub(crate) fn render_scene(&mut self, scene: &dyn Scene) -> Result<(), SurfaceError> {
        {
            let mut frame = PixelFrame::new(
                self.pixels.frame_mut(),
                self.canvas_width,
                self.canvas_height,
            )?;
            frame.clear(CLEAR_COLOR);
            scene.render(&mut frame)?;
        }
        self.pixels
            .render()
            .map_err(|error| SurfaceError::Present(error.to_string()))
    }
}
