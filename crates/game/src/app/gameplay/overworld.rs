use engine::{Color, InputSnapshot, Rect, Surface, SurfaceError, TextStyle, Vec2};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::collision::intersects;
use super::player::{Player, PLAYER_SIZE};
use super::rain::Rain;
use super::save::SaveRecord;

pub(crate) const CANVAS_WIDTH: f32 = 800.0;
pub(crate) const CANVAS_HEIGHT: f32 = 600.0;
pub(crate) const TOTAL_ROOMS: u32 = 10;
const PATHWAY_Y: f32 = 200.0;
const PATHWAY_HEIGHT: f32 = 200.0;
const CHECKPOINT_ROOM: u32 = TOTAL_ROOMS - 1;
const CHECKPOINT_MIN_X: f32 = CANVAS_WIDTH - 80.0;
const CHECKPOINT_MARKER: Rect = Rect::new(
    CANVAS_WIDTH - 40.0,
    PATHWAY_Y + PATHWAY_HEIGHT / 2.0 - 20.0,
    30.0,
    40.0,
);
const ENEMY_RECT: Rect = Rect::new(400.0, 300.0, 40.0, 40.0);

const CORRIDOR_BACKGROUND: Color = Color::BLACK;
const FIELD_BACKGROUND: Color = Color::rgb(0x22, 0x8B, 0x22);
const PATHWAY_COLOR: Color = Color::rgb(0x4B, 0x00, 0x82);
const CHECKPOINT_COLOR: Color = Color::rgb(0xFF, 0xD7, 0x00);
const ENEMY_COLOR: Color = Color::rgb(0xFF, 0x00, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverworldEvent {
    BattleTriggered,
}

/// Corridor rooms, the field, and everything the player walks into.
#[derive(Debug, Clone)]
pub(crate) struct Overworld {
    player: Player,
    room: u32,
    enemy_defeated: bool,
    rain: Rain,
}

impl Overworld {
    pub(crate) fn new(rain_rng: ChaCha8Rng) -> Self {
        Self {
            player: Player::new(),
            room: 0,
            enemy_defeated: false,
            rain: Rain::new(CANVAS_WIDTH, CANVAS_HEIGHT, rain_rng),
        }
    }

    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub(crate) fn room(&self) -> u32 {
        self.room
    }

    pub(crate) fn in_field(&self) -> bool {
        self.room >= TOTAL_ROOMS
    }

    pub(crate) fn enemy_defeated(&self) -> bool {
        self.enemy_defeated
    }

    pub(crate) fn at_checkpoint(&self) -> bool {
        self.room == CHECKPOINT_ROOM && self.player.position.x > CHECKPOINT_MIN_X
    }

    pub(crate) fn reset_new_game(&mut self) {
        self.player = Player::new();
        self.room = 0;
        self.enemy_defeated = false;
    }

    pub(crate) fn snapshot(&self, timestamp: u64) -> SaveRecord {
        SaveRecord {
            current_room: self.room,
            player_x: self.player.position.x,
            player_y: self.player.position.y,
            player_health: self.player.health,
            enemy_defeated: self.enemy_defeated,
            timestamp,
        }
    }

    pub(crate) fn apply_save(&mut self, record: &SaveRecord) {
        self.room = record.current_room.min(TOTAL_ROOMS);
        self.player.position = Vec2::new(record.player_x, record.player_y);
        self.player.health = if record.player_health > 0 {
            record.player_health.min(self.player.max_health)
        } else {
            self.player.max_health
        };
        self.enemy_defeated = record.enemy_defeated;
        self.clamp_player();
    }

    pub(crate) fn mark_enemy_defeated(&mut self) {
        self.enemy_defeated = true;
    }

    /// One exploring tick. Callers only invoke this while no other mode owns input.
    pub(crate) fn update(&mut self, input: &InputSnapshot) -> Option<OverworldEvent> {
        let speed = self.player.speed;
        self.player.position.x += f32::from(input.horizontal_axis()) * speed;
        self.player.position.y += f32::from(input.vertical_axis()) * speed;
        self.clamp_player();
        self.apply_room_transition();

        if !self.in_field() {
            return None;
        }
        self.rain.update();
        if !self.enemy_defeated && intersects(&self.player.rect(), &ENEMY_RECT) {
            return Some(OverworldEvent::BattleTriggered);
        }
        None
    }

    fn clamp_player(&mut self) {
        let (min_y, max_y) = if self.in_field() {
            (0.0, CANVAS_HEIGHT - PLAYER_SIZE)
        } else {
            (PATHWAY_Y, PATHWAY_Y + PATHWAY_HEIGHT - PLAYER_SIZE)
        };
        let position = &mut self.player.position;
        position.y = position.y.clamp(min_y, max_y);
        position.x = position.x.clamp(0.0, CANVAS_WIDTH - PLAYER_SIZE);
    }

    // Reaching a corridor edge is enough; the field has no exits.
    fn apply_room_transition(&mut self) {
        let right_edge = CANVAS_WIDTH - PLAYER_SIZE;
        let x = self.player.position.x;
        if self.in_field() {
            return;
        }
        if x >= right_edge {
            self.change_room(self.room + 1, 0.0);
        } else if x <= 0.0 && self.room > 0 {
            self.change_room(self.room - 1, right_edge);
        }
    }

    fn change_room(&mut self, room: u32, player_x: f32) {
        let from = self.room;
        self.room = room;
        self.player.position.x = player_x;
        self.clamp_player();
        info!(from, to = room, field = self.in_field(), "room_changed");
    }

    pub(crate) fn room_label(&self) -> String {
        if self.in_field() {
            "The Field".to_string()
        } else {
            format!("Room {}/{}", self.room + 1, TOTAL_ROOMS)
        }
    }

    pub(crate) fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        let canvas = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        if self.in_field() {
            surface.fill_rect(canvas, FIELD_BACKGROUND)?;
            self.rain.render(surface)?;
            if !self.enemy_defeated {
                surface.fill_rect(ENEMY_RECT, ENEMY_COLOR)?;
            }
        } else {
            surface.fill_rect(canvas, CORRIDOR_BACKGROUND)?;
            surface.fill_rect(
                Rect::new(0.0, PATHWAY_Y, CANVAS_WIDTH, PATHWAY_HEIGHT),
                PATHWAY_COLOR,
            )?;
            if self.room == CHECKPOINT_ROOM {
                surface.fill_rect(CHECKPOINT_MARKER, CHECKPOINT_COLOR)?;
            }
        }

        surface.fill_rect(self.player.rect(), Color::WHITE)?;

        let label_style = TextStyle::new(Color::WHITE, 16.0);
        surface.fill_text(&self.room_label(), Vec2::new(10.0, 30.0), label_style)?;
        if self.at_checkpoint() {
            surface.fill_text(
                "Press E to save",
                Vec2::new(CANVAS_WIDTH - 120.0, PATHWAY_Y - 10.0),
                label_style,
            )?;
        }
        Ok(())
    }
}
