use engine::{InputSnapshot, Scene, SceneCommand, Surface, SurfaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use super::battle::{BattleEngine, BattleOutcome, BattleTuning};
use super::checkpoint::{CheckpointMenu, MenuAction};
use super::dialogue::DialogueEngine;
use super::overworld::{Overworld, OverworldEvent, CANVAS_HEIGHT, CANVAS_WIDTH};
use super::save::{now_epoch_ms, SaveSlot, SaveStore};

/// Which subsystem owns input this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameMode {
    Exploring,
    Dialogue,
    CheckpointMenu,
    Battle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GameConfig {
    pub(crate) start_slot: Option<SaveSlot>,
    pub(crate) seed: u64,
}

pub(crate) struct AirballScene {
    config: GameConfig,
    mode: GameMode,
    overworld: Overworld,
    dialogue: DialogueEngine,
    checkpoint_menu: CheckpointMenu,
    battle: BattleEngine,
    saves: SaveStore,
    active_slot: Option<SaveSlot>,
}

impl AirballScene {
    pub(crate) fn new(config: GameConfig, saves: SaveStore) -> Self {
        let rain_rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));
        Self {
            config,
            mode: GameMode::Dialogue,
            overworld: Overworld::new(rain_rng),
            dialogue: DialogueEngine::intro(),
            checkpoint_menu: CheckpointMenu::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            battle: BattleEngine::new(BattleTuning::default(), config.seed),
            saves,
            active_slot: None,
        }
    }

    pub(crate) fn mode(&self) -> GameMode {
        self.mode
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.mode != mode {
            info!(from = ?self.mode, to = ?mode, "mode_changed");
            self.mode = mode;
        }
    }

    fn start_new_game(&mut self) {
        self.overworld.reset_new_game();
        self.active_slot = None;
        self.dialogue.start();
        self.mode = if self.dialogue.is_active() {
            GameMode::Dialogue
        } else {
            GameMode::Exploring
        };
        info!("new_game_started");
    }

    fn update_dialogue(&mut self, fixed_dt_ms: f64, input: &InputSnapshot) {
        if input.confirm_pressed() {
            self.dialogue.advance();
        }
        self.dialogue.update(fixed_dt_ms);
        if !self.dialogue.is_active() {
            self.set_mode(GameMode::Exploring);
        }
    }

    fn update_exploring(&mut self, input: &InputSnapshot) {
        if input.checkpoint_toggle_pressed() && self.overworld.at_checkpoint() {
            self.checkpoint_menu.open(self.saves.slot_labels());
            self.set_mode(GameMode::CheckpointMenu);
            return;
        }
        if let Some(OverworldEvent::BattleTriggered) = self.overworld.update(input) {
            self.battle.start();
            self.set_mode(GameMode::Battle);
        }
    }

    fn update_checkpoint_menu(&mut self, input: &InputSnapshot) {
        if input.checkpoint_toggle_pressed() {
            self.set_mode(GameMode::Exploring);
            return;
        }
        let Some(click) = input.click_position() else {
            return;
        };
        match self.checkpoint_menu.handle_click(click) {
            MenuAction::None => {}
            MenuAction::Close => self.set_mode(GameMode::Exploring),
            MenuAction::Save(slot) => {
                let record = self.overworld.snapshot(now_epoch_ms());
                match self.saves.save(slot, &record) {
                    Ok(()) => self.active_slot = Some(slot),
                    Err(error) => warn!(slot = slot.number(), error = %error, "save_failed"),
                }
                self.set_mode(GameMode::Exploring);
            }
        }
    }

    fn update_battle(&mut self, fixed_dt_ms: f64, input: &InputSnapshot) {
        let outcome = self
            .battle
            .update(fixed_dt_ms, input, self.overworld.player_mut());
        if let Some(outcome) = outcome {
            self.resolve_battle(outcome);
        }
    }

    fn resolve_battle(&mut self, outcome: BattleOutcome) {
        match outcome {
            BattleOutcome::Won => self.overworld.mark_enemy_defeated(),
            BattleOutcome::Lost => {
                let restored = self
                    .active_slot
                    .and_then(|slot| self.saves.load(slot).map(|record| (slot, record)));
                match restored {
                    Some((slot, record)) => {
                        self.overworld.apply_save(&record);
                        info!(slot = slot.number(), room = record.current_room, "save_restored");
                    }
                    None => {
                        self.overworld.reset_new_game();
                        info!("progress_reset");
                    }
                }
            }
        }
        self.set_mode(GameMode::Exploring);
    }
}

impl Scene for AirballScene {
    fn load(&mut self) {
        let restored = self
            .config
            .start_slot
            .and_then(|slot| self.saves.load(slot).map(|record| (slot, record)));
        match restored {
            Some((slot, record)) => {
                self.overworld.apply_save(&record);
                self.active_slot = Some(slot);
                self.mode = GameMode::Exploring;
                info!(
                    slot = slot.number(),
                    room = record.current_room,
                    health = self.overworld.player().health,
                    "save_restored"
                );
            }
            None => self.start_new_game(),
        }
    }

    fn update(&mut self, fixed_dt_ms: f64, input: &InputSnapshot) -> SceneCommand {
        if input.quit_requested() {
            return SceneCommand::Quit;
        }
        match self.mode {
            GameMode::Dialogue => self.update_dialogue(fixed_dt_ms, input),
            GameMode::Exploring => self.update_exploring(input),
            GameMode::CheckpointMenu => self.update_checkpoint_menu(input),
            GameMode::Battle => self.update_battle(fixed_dt_ms, input),
        }
        SceneCommand::None
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<(), SurfaceError> {
        self.overworld.render(surface)?;
        if self.mode == GameMode::CheckpointMenu {
            self.checkpoint_menu.render(surface)?;
        }
        self.dialogue.render(surface)?;
        self.battle.render(surface, self.overworld.player())
    }

    fn unload(&mut self) {
        info!(
            room = self.overworld.room(),
            enemy_defeated = self.overworld.enemy_defeated(),
            "game_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let slot = self
            .active_slot
            .map_or_else(|| "-".to_string(), |slot| slot.to_string());
        let mode = match self.mode {
            GameMode::Battle => format!("Battle/{:?}", self.battle.phase()),
            other => format!("{other:?}"),
        };
        Some(format!(
            "{} | mode: {mode} | HP {} | slot {slot}",
            self.overworld.room_label(),
            self.overworld.player().health,
        ))
    }
}
