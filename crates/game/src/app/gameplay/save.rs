use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use engine::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::player::PLAYER_MAX_HEALTH;

const SAVE_KEY_PREFIX: &str = "airballland_save_";
pub(crate) const SLOT_COUNT: u8 = 3;
const MS_PER_DAY: u64 = 86_400_000;

type SaveResult<T> = Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SaveSlot(u8);

impl SaveSlot {
    pub(crate) fn new(number: u8) -> Option<Self> {
        (1..=SLOT_COUNT).contains(&number).then_some(Self(number))
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub(crate) fn all() -> impl Iterator<Item = SaveSlot> {
        (1..=SLOT_COUNT).map(Self)
    }

    pub(crate) fn number(self) -> u8 {
        self.0
    }

    pub(crate) fn store_key(self) -> String {
        format!("{SAVE_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of overworld progress, written whole on every save.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveRecord {
    pub(crate) current_room: u32,
    pub(crate) player_x: f32,
    pub(crate) player_y: f32,
    #[serde(default = "default_player_health")]
    pub(crate) player_health: i32,
    #[serde(default)]
    pub(crate) enemy_defeated: bool,
    pub(crate) timestamp: u64,
}

fn default_player_health() -> i32 {
    PLAYER_MAX_HEALTH
}

pub(crate) struct SaveStore {
    store: Box<dyn KeyValueStore>,
}

impl SaveStore {
    pub(crate) fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub(crate) fn save(&mut self, slot: SaveSlot, record: &SaveRecord) -> SaveResult<()> {
        let json = serde_json::to_string(record)
            .map_err(|error| format!("encode save json: {error}"))?;
        self.store
            .put(&slot.store_key(), &json)
            .map_err(|error| format!("write slot {slot}: {error}"))?;
        info!(
            slot = slot.number(),
            room = record.current_room,
            health = record.player_health,
            "save_written"
        );
        Ok(())
    }

    /// Missing, unreadable and malformed records all read as absent.
    pub(crate) fn load(&self, slot: SaveSlot) -> Option<SaveRecord> {
        let raw = match self.store.get(&slot.store_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(error) => {
                warn!(slot = slot.number(), error = %error, "load_failed");
                return None;
            }
        };
        match parse_save_record_json(&raw) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(slot = slot.number(), error = %error, "save_malformed");
                None
            }
        }
    }

    pub(crate) fn delete(&mut self, slot: SaveSlot) -> SaveResult<()> {
        self.store
            .delete(&slot.store_key())
            .map_err(|error| format!("delete slot {slot}: {error}"))
    }

    /// One menu label per slot, in slot order.
    pub(crate) fn slot_labels(&self) -> Vec<String> {
        SaveSlot::all()
            .map(|slot| slot_label(slot, self.load(slot).as_ref()))
            .collect()
    }
}

fn parse_save_record_json(raw: &str) -> SaveResult<SaveRecord> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, SaveRecord>(&mut deserializer) {
        Ok(record) => Ok(record),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(format!("parse save json: {source}"))
            } else {
                Err(format!("parse save json at {path}: {source}"))
            }
        }
    }
}

pub(crate) fn slot_label(slot: SaveSlot, record: Option<&SaveRecord>) -> String {
    match record {
        Some(record) => format!(
            "Slot {slot} - Room {} ({})",
            record.current_room + 1,
            format_date(record.timestamp)
        ),
        None => format!("Slot {slot} - Empty"),
    }
}

pub(crate) fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// UTC calendar date as `YYYY-MM-DD`.
pub(crate) fn format_date(epoch_ms: u64) -> String {
    let (year, month, day) = civil_from_days((epoch_ms / MS_PER_DAY) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

// Days since 1970-01-01 to proleptic Gregorian (year, month, day).
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_index = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
    let month = (if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    }) as u32;
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
