use engine::{InputAction, InputSnapshot, Rect};
use rand::Rng;

use super::BattleTuning;
use crate::app::gameplay::collision::intersects;
use crate::app::gameplay::player::Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projectile {
    pub(crate) rect: Rect,
    pub(crate) speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DodgeStep {
    Continue,
    PlayerDefeated,
}

/// Defend-phase state: the heart, falling projectiles and the hit window.
#[derive(Debug, Clone)]
pub(crate) struct DodgeField {
    heart: Rect,
    projectiles: Vec<Projectile>,
    elapsed_ms: f64,
    invulnerable: bool,
    invulnerability_timer_ms: f64,
}

impl DodgeField {
    pub(crate) fn new(tuning: &BattleTuning) -> Self {
        Self {
            heart: heart_at_start(tuning),
            projectiles: Vec::new(),
            elapsed_ms: 0.0,
            invulnerable: false,
            invulnerability_timer_ms: 0.0,
        }
    }

    pub(crate) fn begin_round(&mut self, tuning: &BattleTuning) {
        self.heart = heart_at_start(tuning);
        self.projectiles.clear();
        self.elapsed_ms = 0.0;
    }

    pub(crate) fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }

    pub(crate) fn heart(&self) -> Rect {
        self.heart
    }

    pub(crate) fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub(crate) fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    #[cfg(test)]
    pub(crate) fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    #[cfg(test)]
    pub(crate) fn place_heart(&mut self, position: engine::Vec2) {
        self.heart.x = position.x;
        self.heart.y = position.y;
    }

    pub(crate) fn step<R: Rng>(
        &mut self,
        fixed_dt_ms: f64,
        input: &InputSnapshot,
        rng: &mut R,
        player: &mut Player,
        tuning: &BattleTuning,
    ) -> DodgeStep {
        self.elapsed_ms += fixed_dt_ms;
        self.move_heart(input, tuning);

        if rng.random::<f32>() < tuning.spawn_chance {
            let x = tuning.arena.x + rng.random::<f32>() * tuning.arena.width;
            let speed =
                tuning.projectile_min_speed + rng.random::<f32>() * tuning.projectile_speed_spread;
            self.projectiles.push(Projectile {
                rect: Rect::new(
                    x,
                    tuning.arena.y,
                    tuning.projectile_size.x,
                    tuning.projectile_size.y,
                ),
                speed,
            });
        }

        let arena_bottom = tuning.arena.bottom();
        let heart = self.heart;
        let mut hit = false;
        let invulnerable = self.invulnerable;
        self.projectiles.retain_mut(|projectile| {
            projectile.rect.y += projectile.speed;
            if !invulnerable && !hit && intersects(&heart, &projectile.rect) {
                hit = true;
                return false;
            }
            projectile.rect.y < arena_bottom
        });

        if hit {
            player.take_damage(tuning.hit_damage);
            self.invulnerable = true;
            self.invulnerability_timer_ms = tuning.invulnerability_ms;
            if player.is_defeated() {
                return DodgeStep::PlayerDefeated;
            }
        }
        DodgeStep::Continue
    }

    pub(crate) fn tick_invulnerability(&mut self, fixed_dt_ms: f64) {
        if !self.invulnerable {
            return;
        }
        self.invulnerability_timer_ms -= fixed_dt_ms;
        if self.invulnerability_timer_ms <= 0.0 {
            self.invulnerable = false;
        }
    }

    fn move_heart(&mut self, input: &InputSnapshot, tuning: &BattleTuning) {
        let arena = tuning.arena;
        let step = tuning.heart_step;
        let heart = &mut self.heart;
        if input.is_down(InputAction::MoveUp) {
            heart.y = (heart.y - step).max(arena.y);
        }
        if input.is_down(InputAction::MoveDown) {
            heart.y = (heart.y + step).min(arena.bottom() - heart.height);
        }
        if input.is_down(InputAction::MoveLeft) {
            heart.x = (heart.x - step).max(arena.x);
        }
        if input.is_down(InputAction::MoveRight) {
            heart.x = (heart.x + step).min(arena.right() - heart.width);
        }
    }
}

fn heart_at_start(tuning: &BattleTuning) -> Rect {
    Rect::new(
        tuning.heart_start.x,
        tuning.heart_start.y,
        tuning.heart_size,
        tuning.heart_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TICK_MS: f64 = 16.67;

    fn quiet_tuning() -> BattleTuning {
        BattleTuning {
            spawn_chance: 0.0,
            ..BattleTuning::default()
        }
    }

    fn projectile_at(x: f32, y: f32) -> Projectile {
        Projectile {
            rect: Rect::new(x, y, 5.0, 15.0),
            speed: 1.0,
        }
    }

    #[test]
    fn heart_moves_two_units_and_clamps_to_arena() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut player = Player::new();
        let left = InputSnapshot::empty().with_action_down(InputAction::MoveLeft, true);

        field.step(TICK_MS, &left, &mut rng, &mut player, &tuning);
        assert_eq!(field.heart().x, 398.0);

        for _ in 0..200 {
            field.step(TICK_MS, &left, &mut rng, &mut player, &tuning);
        }
        assert_eq!(field.heart().x, 250.0);

        let down = InputSnapshot::empty().with_action_down(InputAction::MoveDown, true);
        for _ in 0..200 {
            field.step(TICK_MS, &down, &mut rng, &mut player, &tuning);
        }
        assert_eq!(field.heart().y, 380.0);
    }

    #[test]
    fn single_hit_deals_damage_once_and_opens_window() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut player = Player::new();
        field.push_projectile(projectile_at(405.0, 290.0));
        field.push_projectile(projectile_at(410.0, 295.0));

        let step = field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);

        assert_eq!(step, DodgeStep::Continue);
        assert_eq!(player.health, 85);
        assert!(field.is_invulnerable());
        assert_eq!(field.projectiles().len(), 1);

        field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);
        assert_eq!(player.health, 85);
    }

    #[test]
    fn invulnerability_lasts_two_seconds_of_simulated_time() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut player = Player::new();
        field.push_projectile(projectile_at(405.0, 295.0));
        field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);
        assert!(field.is_invulnerable());

        for _ in 0..119 {
            field.tick_invulnerability(TICK_MS);
        }
        assert!(field.is_invulnerable());

        field.tick_invulnerability(TICK_MS);
        assert!(!field.is_invulnerable());
    }

    #[test]
    fn projectiles_leaving_arena_are_discarded() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut player = Player::new();
        field.push_projectile(projectile_at(260.0, 399.0));
        field.push_projectile(projectile_at(300.0, 250.0));

        field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);

        assert_eq!(field.projectiles().len(), 1);
        assert_eq!(field.projectiles()[0].rect.y, 251.0);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn lethal_hit_reports_defeat() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut player = Player::new();
        player.health = 15;
        field.place_heart(Vec2::new(300.0, 300.0));
        field.push_projectile(projectile_at(305.0, 300.0));

        let step = field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);

        assert_eq!(step, DodgeStep::PlayerDefeated);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn spawned_projectiles_start_on_arena_top_edge() {
        let tuning = BattleTuning {
            spawn_chance: 1.0,
            ..BattleTuning::default()
        };
        let mut field = DodgeField::new(&tuning);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut player = Player::new();

        for _ in 0..20 {
            field.step(TICK_MS, &InputSnapshot::empty(), &mut rng, &mut player, &tuning);
        }

        assert_eq!(field.projectiles().len(), 20);
        for projectile in field.projectiles() {
            assert!(projectile.rect.x >= 250.0 && projectile.rect.x < 550.0);
            assert!(projectile.speed >= 1.0 && projectile.speed < 2.0);
            assert!(projectile.rect.y > 200.0 && projectile.rect.y <= 240.0);
        }
    }

    #[test]
    fn begin_round_recentres_heart_and_clears_projectiles() {
        let tuning = quiet_tuning();
        let mut field = DodgeField::new(&tuning);
        field.place_heart(Vec2::new(260.0, 210.0));
        field.push_projectile(projectile_at(300.0, 250.0));

        field.begin_round(&tuning);

        assert_eq!(field.heart(), Rect::new(400.0, 300.0, 20.0, 20.0));
        assert!(field.projectiles().is_empty());
        assert_eq!(field.elapsed_ms(), 0.0);
    }
}
