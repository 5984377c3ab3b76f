mod battle;
mod checkpoint;
mod collision;
mod dialogue;
mod overworld;
mod player;
mod rain;
mod save;
mod scene;

use engine::Scene;

pub(crate) use save::{SaveSlot, SaveStore};
pub(crate) use scene::GameConfig;

use scene::AirballScene;

pub(crate) fn build_scene(config: GameConfig, saves: SaveStore) -> Box<dyn Scene> {
    Box::new(AirballScene::new(config, saves))
}
