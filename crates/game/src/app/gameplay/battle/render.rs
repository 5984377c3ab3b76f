use engine::{Color, Rect, Surface, SurfaceError, TextAlign, TextStyle, Vec2};

use super::{BattleEngine, BattlePhase, DAMAGE_ZONES};
use crate::app::gameplay::player::Player;

const ENEMY_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);
const HEART_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);
const HEART_FLASH_COLOR: Color = Color::rgb(0xFF, 0x69, 0xB4);
const PROJECTILE_COLOR: Color = Color::rgb(0x87, 0xCE, 0xEB);
const ZONE_BAR_X: f32 = 200.0;
const ZONE_BAR_Y: f32 = 450.0;
const ZONE_BAR_HEIGHT: f32 = 30.0;
const CENTER_X: f32 = 400.0;

fn body() -> TextStyle {
    TextStyle::new(Color::WHITE, 16.0)
}

fn centered(size_px: f32) -> TextStyle {
    TextStyle::new(Color::WHITE, size_px).aligned(TextAlign::Center)
}

impl BattleEngine {
    pub(crate) fn render(
        &self,
        surface: &mut dyn Surface,
        player: &Player,
    ) -> Result<(), SurfaceError> {
        if !self.active {
            return Ok(());
        }
        let (width, height) = surface.size();
        let full = Rect::new(0.0, 0.0, width as f32, height as f32);
        surface.fill_rect(full, Color::BLACK.with_opacity(self.fade_alpha))?;
        if self.fade_alpha < 1.0 {
            return Ok(());
        }

        surface.fill_rect(self.tuning.enemy_region, ENEMY_COLOR)?;
        surface.fill_text(self.enemy.name, Vec2::new(CENTER_X, 80.0), centered(16.0))?;

        match self.phase {
            BattlePhase::Menu => self.render_menu(surface)?,
            BattlePhase::EnemySelect => {
                surface.fill_text(
                    "Click on the enemy to attack!",
                    Vec2::new(CENTER_X, 450.0),
                    centered(16.0),
                )?;
            }
            BattlePhase::Attack => self.render_attack(surface)?,
            BattlePhase::Defend => self.render_defend(surface)?,
            BattlePhase::FadeIn | BattlePhase::FadeOut => {}
        }

        surface.fill_text(
            &format!("HP: {}/{}", player.health, player.max_health),
            Vec2::new(50.0, 550.0),
            body(),
        )?;
        surface.fill_text(
            &format!(
                "{} HP: {}/{}",
                self.enemy.name, self.enemy.health, self.enemy.max_health
            ),
            Vec2::new(50.0, 580.0),
            body(),
        )
    }

    fn render_menu(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        surface.stroke_rect(self.tuning.fight_button, 2.0, Color::WHITE)?;
        surface.fill_text("FIGHT", Vec2::new(CENTER_X, 550.0), centered(20.0))
    }

    fn render_attack(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        for zone in &DAMAGE_ZONES {
            surface.fill_rect(
                Rect::new(
                    ZONE_BAR_X + zone.start,
                    ZONE_BAR_Y,
                    zone.end - zone.start,
                    ZONE_BAR_HEIGHT,
                ),
                zone.color,
            )?;
        }
        if self.attack_line.is_active() {
            surface.fill_rect(
                Rect::new(
                    ZONE_BAR_X + self.attack_line.position(),
                    ZONE_BAR_Y - 10.0,
                    3.0,
                    ZONE_BAR_HEIGHT + 20.0,
                ),
                Color::WHITE,
            )?;
        }
        surface.fill_text(
            "Click to stop the line!",
            Vec2::new(CENTER_X, 430.0),
            centered(16.0),
        )
    }

    fn render_defend(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        surface.stroke_rect(self.tuning.arena, 3.0, Color::WHITE)?;
        let heart_color = if self.dodge.is_invulnerable() {
            HEART_FLASH_COLOR
        } else {
            HEART_COLOR
        };
        surface.fill_rect(self.dodge.heart(), heart_color)?;
        for projectile in self.dodge.projectiles() {
            surface.fill_rect(projectile.rect, PROJECTILE_COLOR)?;
        }
        surface.fill_text(
            &format!("Time: {:.1}s", self.defend_time_left_secs()),
            Vec2::new(CENTER_X, 500.0),
            centered(16.0),
        )?;
        surface.fill_text(
            "Use WASD or Arrow Keys to move",
            Vec2::new(CENTER_X, 520.0),
            centered(16.0),
        )
    }
}
