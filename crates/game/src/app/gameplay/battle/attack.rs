use engine::Color;

const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
const DARK_GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
const BRIGHT_GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DamageZone {
    pub(crate) start: f32,
    pub(crate) end: f32,
    pub(crate) damage: i32,
    pub(crate) color: Color,
}

impl DamageZone {
    const fn new(start: f32, end: f32, damage: i32, color: Color) -> Self {
        Self {
            start,
            end,
            damage,
            color,
        }
    }

    fn contains(&self, position: f32) -> bool {
        position >= self.start && position <= self.end
    }
}

/// Track coordinates, both ends inclusive. Shared boundaries resolve to the
/// earlier zone.
pub(crate) const DAMAGE_ZONES: [DamageZone; 7] = [
    DamageZone::new(50.0, 80.0, 5, RED),
    DamageZone::new(80.0, 120.0, 10, YELLOW),
    DamageZone::new(120.0, 160.0, 20, DARK_GREEN),
    DamageZone::new(160.0, 190.0, 30, BRIGHT_GREEN),
    DamageZone::new(190.0, 230.0, 20, DARK_GREEN),
    DamageZone::new(230.0, 270.0, 10, YELLOW),
    DamageZone::new(270.0, 300.0, 5, RED),
];

pub(crate) fn damage_at(position: f32) -> i32 {
    DAMAGE_ZONES
        .iter()
        .find(|zone| zone.contains(position))
        .map_or(0, |zone| zone.damage)
}

/// Oscillating timing line for the attack phase.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AttackLine {
    position: f32,
    speed: f32,
    direction: f32,
    track_end: f32,
    active: bool,
}

impl AttackLine {
    pub(crate) fn new(speed: f32, track_end: f32) -> Self {
        Self {
            position: 0.0,
            speed,
            direction: 1.0,
            track_end,
            active: false,
        }
    }

    pub(crate) fn start(&mut self) {
        self.position = 0.0;
        self.direction = 1.0;
        self.active = true;
    }

    pub(crate) fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.position = (self.position + self.speed * self.direction).clamp(0.0, self.track_end);
        if self.position <= 0.0 || self.position >= self.track_end {
            self.direction = -self.direction;
        }
    }

    /// Freezes the line and returns the damage for where it stopped.
    pub(crate) fn stop(&mut self) -> Option<i32> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(damage_at(self.position))
    }

    pub(crate) fn position(&self) -> f32 {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> f32 {
        self.direction
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }
}
