mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{
    Color, CommandRecorder, DrawCommand, PixelFrame, Renderer, Surface, SurfaceError, TextAlign,
    TextStyle,
};
pub use scene::{InputSnapshot, Rect, Scene, SceneCommand, Vec2};
