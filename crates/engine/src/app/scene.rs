use super::input::{ActionStates, InputAction};
use super::rendering::{Surface, SurfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Inclusive on every edge, matching how click hit-regions are tested.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// Everything a scene may read about player input for one fixed tick.
///
/// Held actions persist across ticks; confirm, checkpoint toggle and click
/// are press edges and appear in exactly one snapshot per physical press.
/// Click coordinates are already mapped into surface space.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    actions: ActionStates,
    confirm_pressed: bool,
    checkpoint_toggle_pressed: bool,
    click_position: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        actions: ActionStates,
        confirm_pressed: bool,
        checkpoint_toggle_pressed: bool,
        click_position: Option<Vec2>,
    ) -> Self {
        Self {
            quit_requested,
            actions,
            confirm_pressed,
            checkpoint_toggle_pressed,
            click_position,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_quit_requested(mut self, quit_requested: bool) -> Self {
        self.quit_requested = quit_requested;
        self
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_confirm_pressed(mut self, confirm_pressed: bool) -> Self {
        self.confirm_pressed = confirm_pressed;
        self
    }

    pub fn with_checkpoint_toggle_pressed(mut self, checkpoint_toggle_pressed: bool) -> Self {
        self.checkpoint_toggle_pressed = checkpoint_toggle_pressed;
        self
    }

    pub fn with_click_at(mut self, click_position: Option<Vec2>) -> Self {
        self.click_position = click_position;
        self
    }

    pub fn confirm_pressed(&self) -> bool {
        self.confirm_pressed
    }

    pub fn checkpoint_toggle_pressed(&self) -> bool {
        self.checkpoint_toggle_pressed
    }

    pub fn click_position(&self) -> Option<Vec2> {
        self.click_position
    }

    /// Signed horizontal intent: -1 left, +1 right, 0 for none or both.
    pub fn horizontal_axis(&self) -> i8 {
        axis(
            self.is_down(InputAction::MoveLeft),
            self.is_down(InputAction::MoveRight),
        )
    }

    /// Signed vertical intent in surface space: -1 up, +1 down.
    pub fn vertical_axis(&self) -> i8 {
        axis(
            self.is_down(InputAction::MoveUp),
            self.is_down(InputAction::MoveDown),
        )
    }
}

fn axis(negative: bool, positive: bool) -> i8 {
    match (negative, positive) {
        (true, false) => -1,
        (false, true) => 1,
        _ => 0,
    }
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, fixed_dt_ms: f64, input: &InputSnapshot) -> SceneCommand;
    fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError>;
    fn unload(&mut self) {}
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_inclusive_on_edges() {
        let rect = Rect::new(350.0, 520.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(350.0, 520.0)));
        assert!(rect.contains(Vec2::new(450.0, 570.0)));
        assert!(!rect.contains(Vec2::new(450.1, 540.0)));
        assert!(!rect.contains(Vec2::new(400.0, 519.9)));
    }

    #[test]
    fn inflate_grows_every_side() {
        let rect = Rect::new(10.0, 10.0, 4.0, 6.0).inflate(3.0);
        assert_eq!(rect, Rect::new(7.0, 7.0, 10.0, 12.0));
    }

    #[test]
    fn empty_snapshot_has_no_intent() {
        let snapshot = InputSnapshot::empty();
        assert_eq!(snapshot.horizontal_axis(), 0);
        assert_eq!(snapshot.vertical_axis(), 0);
        assert!(!snapshot.confirm_pressed());
        assert!(!snapshot.checkpoint_toggle_pressed());
        assert!(snapshot.click_position().is_none());
    }

    #[test]
    fn opposing_directions_cancel_on_axis() {
        let snapshot = InputSnapshot::empty()
            .with_action_down(InputAction::MoveLeft, true)
            .with_action_down(InputAction::MoveRight, true)
            .with_action_down(InputAction::MoveDown, true);

        assert_eq!(snapshot.horizontal_axis(), 0);
        assert_eq!(snapshot.vertical_axis(), 1);
        assert!(snapshot.is_down(InputAction::MoveLeft));
    }

    #[test]
    fn builder_carries_edges_and_click() {
        let snapshot = InputSnapshot::empty()
            .with_confirm_pressed(true)
            .with_checkpoint_toggle_pressed(true)
            .with_click_at(Some(Vec2::new(12.0, 34.0)));

        assert!(snapshot.confirm_pressed());
        assert!(snapshot.checkpoint_toggle_pressed());
        assert_eq!(snapshot.click_position(), Some(Vec2::new(12.0, 34.0)));
    }
}
