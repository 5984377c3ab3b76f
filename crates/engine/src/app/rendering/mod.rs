mod font;
mod frame;
mod recorder;
mod renderer;
mod surface;

pub use frame::PixelFrame;
pub use recorder::{CommandRecorder, DrawCommand};
pub use renderer::Renderer;
pub use surface::{Color, Surface, SurfaceError, TextAlign, TextStyle};
