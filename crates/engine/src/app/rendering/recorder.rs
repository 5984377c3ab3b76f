use crate::app::{Rect, Vec2};

use super::surface::{ensure_finite_rect, Color, Surface, SurfaceError, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        line_width: f32,
        color: Color,
    },
    Text {
        text: String,
        at: Vec2,
        style: TextStyle,
    },
}

/// Surface that keeps the draw commands instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    pub fn filled_with(&self, color: Color) -> impl Iterator<Item = Rect> + '_ {
        self.commands.iter().filter_map(move |command| match command {
            DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
            _ => None,
        })
    }
}

impl Surface for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        ensure_finite_rect(rect, "fill_rect")?;
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        line_width: f32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        ensure_finite_rect(rect, "stroke_rect")?;
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            line_width,
            color,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: TextStyle) -> Result<(), SurfaceError> {
        if !at.x.is_finite() || !at.y.is_finite() {
            return Err(SurfaceError::NonFiniteGeometry {
                primitive: "fill_text",
            });
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_commands_in_issue_order() {
        let mut recorder = CommandRecorder::new(800, 600);
        recorder
            .fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK)
            .expect("fill");
        recorder
            .fill_text("hello", Vec2::new(1.0, 2.0), TextStyle::new(Color::WHITE, 16.0))
            .expect("text");

        assert_eq!(recorder.size(), (800, 600));
        assert_eq!(recorder.commands().len(), 2);
        assert!(matches!(
            recorder.commands()[0],
            DrawCommand::FillRect { .. }
        ));
        assert!(recorder.contains_text("ell"));
        assert_eq!(recorder.texts().collect::<Vec<_>>(), vec!["hello"]);
    }

    #[test]
    fn filled_with_filters_by_color() {
        let mut recorder = CommandRecorder::new(10, 10);
        let red = Color::rgb(255, 0, 0);
        recorder
            .fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), red)
            .expect("fill");
        recorder
            .fill_rect(Rect::new(3.0, 3.0, 2.0, 2.0), Color::WHITE)
            .expect("fill");

        let reds: Vec<Rect> = recorder.filled_with(red).collect();
        assert_eq!(reds, vec![Rect::new(1.0, 1.0, 2.0, 2.0)]);
    }

    #[test]
    fn non_finite_text_position_is_an_error() {
        let mut recorder = CommandRecorder::new(10, 10);
        let result = recorder.fill_text(
            "x",
            Vec2::new(f32::NAN, 0.0),
            TextStyle::new(Color::WHITE, 16.0),
        );
        assert!(result.is_err());
        assert!(recorder.commands().is_empty());
    }
}
