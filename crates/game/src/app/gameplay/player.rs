use engine::{Rect, Vec2};

pub(crate) const PLAYER_SIZE: f32 = 30.0;
pub(crate) const PLAYER_SPEED: f32 = 1.67;
pub(crate) const PLAYER_MAX_HEALTH: i32 = 100;
pub(crate) const PLAYER_START: Vec2 = Vec2::new(50.0, 300.0);

/// The overworld avatar. Health is shared with the battle's dodge phase.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    pub(crate) position: Vec2,
    pub(crate) speed: f32,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
}

impl Player {
    pub(crate) fn new() -> Self {
        Self {
            position: PLAYER_START,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub(crate) fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub(crate) fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}
