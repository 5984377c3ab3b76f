use engine::{resolve_app_paths, FileStore, KeyValueStore, LoopConfig, MemoryStore, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, GameConfig, SaveSlot, SaveStore};

const SAVE_SLOT_ENV_VAR: &str = "AIRBALL_SAVE_SLOT";
const SEED_ENV_VAR: &str = "AIRBALL_SEED";
const RESET_SLOT_ENV_VAR: &str = "AIRBALL_RESET_SLOT";

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Airball Land Startup ===");

    let start_slot = parse_slot_env(SAVE_SLOT_ENV_VAR, env_value(SAVE_SLOT_ENV_VAR).as_deref());
    let seed = parse_seed(env_value(SEED_ENV_VAR).as_deref()).unwrap_or_else(rand::random::<u64>);
    let mut saves = SaveStore::new(open_store());

    if let Some(slot) = parse_slot_env(RESET_SLOT_ENV_VAR, env_value(RESET_SLOT_ENV_VAR).as_deref())
    {
        match saves.delete(slot) {
            Ok(()) => info!(slot = slot.number(), "save_slot_reset"),
            Err(error) => warn!(slot = slot.number(), error = %error, "save_slot_reset_failed"),
        }
    }

    info!(
        seed,
        start_slot = start_slot.map(SaveSlot::number),
        "startup"
    );
    let scene = gameplay::build_scene(GameConfig { start_slot, seed }, saves);

    AppWiring {
        config: LoopConfig::default(),
        scene,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn open_store() -> Box<dyn KeyValueStore> {
    match resolve_app_paths() {
        Ok(paths) => {
            info!(
                root = %paths.root.display(),
                saves_dir = %paths.saves_dir.display(),
                "save_store_ready"
            );
            Box::new(FileStore::new(paths.saves_dir))
        }
        Err(error) => {
            warn!(error = %error, "save_store_unavailable_using_memory");
            Box::new(MemoryStore::new())
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn parse_slot_env(name: &str, raw: Option<&str>) -> Option<SaveSlot> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let slot = SaveSlot::parse(raw);
    if slot.is_none() {
        warn!(var = name, value = raw, "invalid_save_slot_env");
    }
    slot
}

fn parse_seed(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    match raw.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(error) => {
            warn!(value = raw, error = %error, "invalid_seed_env");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_env_accepts_one_through_three() {
        let slot = parse_slot_env(SAVE_SLOT_ENV_VAR, Some(" 2 ")).expect("slot");
        assert_eq!(slot.number(), 2);
        assert_eq!(parse_slot_env(SAVE_SLOT_ENV_VAR, Some("4")), None);
        assert_eq!(parse_slot_env(SAVE_SLOT_ENV_VAR, Some("")), None);
        assert_eq!(parse_slot_env(SAVE_SLOT_ENV_VAR, None), None);
    }

    #[test]
    fn seed_env_must_be_an_unsigned_integer() {
        assert_eq!(parse_seed(Some("1234")), Some(1234));
        assert_eq!(parse_seed(Some("-1")), None);
        assert_eq!(parse_seed(Some("abc")), None);
        assert_eq!(parse_seed(None), None);
    }
}
