//! Turn-based battle: fade in, pick FIGHT, stop the attack line, survive the
//! dodge round, repeat until one side runs out of health.

use engine::{InputSnapshot, Rect, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::player::Player;

mod attack;
mod dodge;
mod render;

pub(crate) use attack::{AttackLine, DAMAGE_ZONES};
pub(crate) use dodge::{DodgeField, DodgeStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BattlePhase {
    FadeIn,
    Menu,
    EnemySelect,
    Attack,
    Defend,
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BattleOutcome {
    Won,
    Lost,
}

/// Fixed battle content and timing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BattleTuning {
    pub(crate) enemy_name: &'static str,
    pub(crate) enemy_max_health: i32,
    pub(crate) fade_step: f32,
    pub(crate) line_speed: f32,
    pub(crate) line_track_end: f32,
    pub(crate) fight_button: Rect,
    pub(crate) enemy_region: Rect,
    pub(crate) arena: Rect,
    pub(crate) heart_start: Vec2,
    pub(crate) heart_size: f32,
    pub(crate) heart_step: f32,
    pub(crate) spawn_chance: f32,
    pub(crate) projectile_size: Vec2,
    pub(crate) projectile_min_speed: f32,
    pub(crate) projectile_speed_spread: f32,
    pub(crate) hit_damage: i32,
    pub(crate) invulnerability_ms: f64,
    pub(crate) defend_duration_ms: f64,
}

impl Default for BattleTuning {
    fn default() -> Self {
        Self {
            enemy_name: "Field Monster",
            enemy_max_health: 60,
            fade_step: 0.05,
            line_speed: 3.0,
            line_track_end: 350.0,
            fight_button: Rect::new(350.0, 520.0, 100.0, 50.0),
            enemy_region: Rect::new(350.0, 50.0, 100.0, 50.0),
            arena: Rect::new(250.0, 200.0, 300.0, 200.0),
            heart_start: Vec2::new(400.0, 300.0),
            heart_size: 20.0,
            heart_step: 2.0,
            spawn_chance: 0.025,
            projectile_size: Vec2::new(5.0, 15.0),
            projectile_min_speed: 1.0,
            projectile_speed_spread: 1.0,
            hit_damage: 15,
            invulnerability_ms: 2_000.0,
            defend_duration_ms: 15_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BattleEnemy {
    pub(crate) name: &'static str,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
}

pub(crate) struct BattleEngine {
    tuning: BattleTuning,
    rng: ChaCha8Rng,
    active: bool,
    phase: BattlePhase,
    fade_alpha: f32,
    enemy: BattleEnemy,
    attack_line: AttackLine,
    dodge: DodgeField,
}

impl BattleEngine {
    pub(crate) fn new(tuning: BattleTuning, seed: u64) -> Self {
        let enemy = BattleEnemy {
            name: tuning.enemy_name,
            health: tuning.enemy_max_health,
            max_health: tuning.enemy_max_health,
        };
        let attack_line = AttackLine::new(tuning.line_speed, tuning.line_track_end);
        let dodge = DodgeField::new(&tuning);
        Self {
            tuning,
            rng: ChaCha8Rng::seed_from_u64(seed),
            active: false,
            phase: BattlePhase::FadeIn,
            fade_alpha: 0.0,
            enemy,
            attack_line,
            dodge,
        }
    }

    pub(crate) fn start(&mut self) {
        self.active = true;
        self.phase = BattlePhase::FadeIn;
        self.fade_alpha = 0.0;
        self.enemy.health = self.enemy.max_health;
        self.attack_line = AttackLine::new(self.tuning.line_speed, self.tuning.line_track_end);
        self.dodge = DodgeField::new(&self.tuning);
        info!(
            enemy = self.enemy.name,
            enemy_health = self.enemy.health,
            "battle_started"
        );
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn fade_alpha(&self) -> f32 {
        self.fade_alpha
    }

    #[cfg(test)]
    pub(crate) fn enemy(&self) -> &BattleEnemy {
        &self.enemy
    }

    #[cfg(test)]
    pub(crate) fn attack_line(&self) -> &AttackLine {
        &self.attack_line
    }

    #[cfg(test)]
    pub(crate) fn dodge(&self) -> &DodgeField {
        &self.dodge
    }

    /// Advances one fixed tick. Returns the outcome on the tick the battle ends,
    /// after which the engine stays inactive until the next `start`.
    pub(crate) fn update(
        &mut self,
        fixed_dt_ms: f64,
        input: &InputSnapshot,
        player: &mut Player,
    ) -> Option<BattleOutcome> {
        if !self.active {
            return None;
        }

        let outcome = match self.phase {
            BattlePhase::FadeIn => {
                self.fade_alpha += self.tuning.fade_step;
                if self.fade_alpha >= 1.0 {
                    self.fade_alpha = 1.0;
                    self.set_phase(BattlePhase::Menu);
                }
                None
            }
            BattlePhase::Menu => {
                if clicked_inside(input, self.tuning.fight_button) {
                    self.set_phase(BattlePhase::EnemySelect);
                }
                None
            }
            BattlePhase::EnemySelect => {
                if clicked_inside(input, self.tuning.enemy_region) {
                    self.attack_line.start();
                    self.set_phase(BattlePhase::Attack);
                }
                None
            }
            BattlePhase::Attack => {
                if input.click_position().is_some() {
                    self.resolve_attack();
                } else {
                    self.attack_line.advance();
                }
                None
            }
            BattlePhase::Defend => self.update_defend(fixed_dt_ms, input, player),
            BattlePhase::FadeOut => {
                self.fade_alpha -= self.tuning.fade_step;
                if self.fade_alpha <= 0.0 {
                    self.fade_alpha = 0.0;
                    Some(BattleOutcome::Won)
                } else {
                    None
                }
            }
        };

        self.dodge.tick_invulnerability(fixed_dt_ms);

        if let Some(outcome) = outcome {
            self.active = false;
            self.dodge.clear_projectiles();
            info!(
                outcome = ?outcome,
                player_health = player.health,
                enemy_health = self.enemy.health,
                "battle_ended"
            );
        }
        outcome
    }

    fn resolve_attack(&mut self) {
        let Some(damage) = self.attack_line.stop() else {
            return;
        };
        self.enemy.health -= damage;
        debug!(
            line_position = self.attack_line.position(),
            damage,
            enemy_health = self.enemy.health,
            "attack_resolved"
        );
        if self.enemy.health <= 0 {
            self.set_phase(BattlePhase::FadeOut);
        } else {
            self.dodge.begin_round(&self.tuning);
            self.set_phase(BattlePhase::Defend);
        }
    }

    fn update_defend(
        &mut self,
        fixed_dt_ms: f64,
        input: &InputSnapshot,
        player: &mut Player,
    ) -> Option<BattleOutcome> {
        let step = self
            .dodge
            .step(fixed_dt_ms, input, &mut self.rng, player, &self.tuning);
        if step == DodgeStep::PlayerDefeated {
            return Some(BattleOutcome::Lost);
        }
        if self.dodge.elapsed_ms() >= self.tuning.defend_duration_ms {
            self.dodge.clear_projectiles();
            self.set_phase(BattlePhase::Menu);
        }
        None
    }

    fn set_phase(&mut self, next: BattlePhase) {
        if self.phase != next {
            debug!(from = ?self.phase, to = ?next, "battle_phase_changed");
            self.phase = next;
        }
    }

    /// Remaining defend time in seconds, for the on-screen countdown.
    pub(crate) fn defend_time_left_secs(&self) -> f64 {
        ((self.tuning.defend_duration_ms - self.dodge.elapsed_ms()) / 1000.0).max(0.0)
    }
}

fn clicked_inside(input: &InputSnapshot, region: Rect) -> bool {
    input
        .click_position()
        .is_some_and(|point| region.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::InputAction;

    const TICK_MS: f64 = 16.67;

    fn click(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot::empty().with_click_at(Some(Vec2::new(x, y)))
    }

    fn quiet_engine() -> BattleEngine {
        BattleEngine::new(
            BattleTuning {
                spawn_chance: 0.0,
                ..BattleTuning::default()
            },
            7,
        )
    }

    fn tick(
        engine: &mut BattleEngine,
        input: &InputSnapshot,
        player: &mut Player,
    ) -> Option<BattleOutcome> {
        engine.update(TICK_MS, input, player)
    }

    fn run_fade_in(engine: &mut BattleEngine, player: &mut Player) {
        for _ in 0..25 {
            if engine.phase() != BattlePhase::FadeIn {
                break;
            }
            assert_eq!(tick(engine, &InputSnapshot::empty(), player), None);
        }
        assert_eq!(engine.phase(), BattlePhase::Menu);
    }

    fn enter_attack(engine: &mut BattleEngine, player: &mut Player) {
        run_fade_in(engine, player);
        tick(engine, &click(400.0, 545.0), player);
        assert_eq!(engine.phase(), BattlePhase::EnemySelect);
        tick(engine, &click(400.0, 75.0), player);
        assert_eq!(engine.phase(), BattlePhase::Attack);
    }

    fn advance_line_to(engine: &mut BattleEngine, player: &mut Player, ticks: usize) {
        for _ in 0..ticks {
            tick(engine, &InputSnapshot::empty(), player);
        }
    }

    #[test]
    fn fade_in_reaches_menu_with_full_alpha_and_ignores_clicks() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();

        tick(&mut engine, &click(400.0, 545.0), &mut player);
        assert_eq!(engine.phase(), BattlePhase::FadeIn);
        assert!((engine.fade_alpha() - 0.05).abs() < 1e-6);

        run_fade_in(&mut engine, &mut player);
        assert_eq!(engine.fade_alpha(), 1.0);
    }

    #[test]
    fn clicks_outside_regions_are_ignored() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        run_fade_in(&mut engine, &mut player);

        tick(&mut engine, &click(100.0, 100.0), &mut player);
        assert_eq!(engine.phase(), BattlePhase::Menu);

        tick(&mut engine, &click(450.0, 570.0), &mut player);
        assert_eq!(engine.phase(), BattlePhase::EnemySelect);

        tick(&mut engine, &click(400.0, 545.0), &mut player);
        assert_eq!(engine.phase(), BattlePhase::EnemySelect);
    }

    #[test]
    fn attack_reduces_enemy_health_by_zone_damage_then_defends() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        enter_attack(&mut engine, &mut player);
        assert_eq!(engine.attack_line().position(), 0.0);

        advance_line_to(&mut engine, &mut player, 55);
        assert_eq!(engine.attack_line().position(), 165.0);

        tick(&mut engine, &click(10.0, 10.0), &mut player);

        assert_eq!(engine.enemy().health, 30);
        assert!(!engine.attack_line().is_active());
        assert_eq!(engine.phase(), BattlePhase::Defend);
        assert_eq!(engine.dodge().heart(), Rect::new(400.0, 300.0, 20.0, 20.0));
        assert!(engine.dodge().projectiles().is_empty());
    }

    #[test]
    fn missed_attack_deals_no_damage() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        enter_attack(&mut engine, &mut player);

        tick(&mut engine, &click(10.0, 10.0), &mut player);

        assert_eq!(engine.enemy().health, 60);
        assert_eq!(engine.phase(), BattlePhase::Defend);
    }

    #[test]
    fn defend_ends_after_fifteen_simulated_seconds() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        enter_attack(&mut engine, &mut player);
        tick(&mut engine, &click(10.0, 10.0), &mut player);
        assert_eq!(engine.phase(), BattlePhase::Defend);

        for _ in 0..899 {
            assert_eq!(tick(&mut engine, &InputSnapshot::empty(), &mut player), None);
        }
        assert_eq!(engine.phase(), BattlePhase::Defend);

        tick(&mut engine, &InputSnapshot::empty(), &mut player);
        assert_eq!(engine.phase(), BattlePhase::Menu);
        assert!(engine.dodge().projectiles().is_empty());
        assert_eq!(player.health, 100);
    }

    #[test]
    fn lethal_attacks_fade_out_then_report_win_once() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        engine.enemy.health = 30;
        enter_attack(&mut engine, &mut player);
        advance_line_to(&mut engine, &mut player, 55);
        tick(&mut engine, &click(10.0, 10.0), &mut player);

        assert_eq!(engine.enemy().health, 0);
        assert_eq!(engine.phase(), BattlePhase::FadeOut);

        let mut outcomes = Vec::new();
        for _ in 0..40 {
            if let Some(outcome) = tick(&mut engine, &click(400.0, 75.0), &mut player) {
                outcomes.push(outcome);
            }
        }
        assert_eq!(outcomes, vec![BattleOutcome::Won]);
        assert_eq!(engine.enemy().health, 0);
        assert!(!engine.is_active());
    }

    #[test]
    fn player_defeat_during_defend_reports_loss() {
        let mut engine = BattleEngine::new(
            BattleTuning {
                spawn_chance: 1.0,
                ..BattleTuning::default()
            },
            11,
        );
        let mut player = Player::new();
        player.health = 10;
        engine.start();
        enter_attack(&mut engine, &mut player);
        tick(&mut engine, &click(10.0, 10.0), &mut player);

        let hold_up = InputSnapshot::empty().with_action_down(InputAction::MoveUp, true);
        let mut outcome = None;
        for _ in 0..900 {
            outcome = tick(&mut engine, &hold_up, &mut player);
            if outcome.is_some() {
                break;
            }
        }

        assert_eq!(outcome, Some(BattleOutcome::Lost));
        assert!(player.health <= 0);
        assert!(!engine.is_active());
        assert_eq!(tick(&mut engine, &hold_up, &mut player), None);
    }

    #[test]
    fn restart_resets_enemy_and_fade() {
        let mut engine = quiet_engine();
        let mut player = Player::new();
        engine.start();
        enter_attack(&mut engine, &mut player);
        advance_line_to(&mut engine, &mut player, 55);
        tick(&mut engine, &click(10.0, 10.0), &mut player);

        engine.start();

        assert_eq!(engine.phase(), BattlePhase::FadeIn);
        assert_eq!(engine.fade_alpha(), 0.0);
        assert_eq!(engine.enemy().health, 60);
    }
}
