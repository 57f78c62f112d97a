//! One pure function per schema bump.
//!
//! Each step receives the payload of schema `from` and leaves it in the shape
//! of `from + 1`. Steps only add or reshape fields; nothing the player earned
//! is dropped.

use hiker_core::{GameConfig, Season};
use serde_json::{Map, Value, json};

use super::MigrationError;

pub(crate) type Fields = Map<String, Value>;

/// Fields every current-schema payload carries.
pub(crate) const CURRENT_FIELDS: &[&str] = &[
    "player",
    "day",
    "season",
    "day_in_season",
    "time_of_day",
    "stamina",
    "days_without_meal",
    "ate_meal_today",
    "ate_snack_today",
    "inventory",
    "rapport",
    "flags",
    "quests",
    "discovered_landmarks",
    "current_landmark",
    "landmark_stability",
    "recent_events",
    "steps_since_forage",
    "timed_modifiers",
    "status",
];

/// Legacy saves stored the season as an index into this order.
const SEASON_ORDER: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

/// 1 → 2: introduce the recent-event history.
pub(crate) fn add_recent_events(fields: &mut Fields) -> Result<(), MigrationError> {
    const VERSION: u32 = 1;
    for key in ["player", "day", "stamina", "inventory"] {
        require(fields, VERSION, key)?;
    }

    fields.entry("rapport").or_insert_with(|| json!({}));
    fields.entry("flags").or_insert_with(|| json!({}));
    fields.entry("discovered_landmarks").or_insert_with(|| json!([]));
    fields.entry("current_landmark").or_insert(Value::Null);

    let capacity = GameConfig::DEFAULT_HISTORY_CAPACITY;
    let history = match fields.remove("recent_events") {
        None | Some(Value::Null) => json!({ "capacity": capacity, "entries": [] }),
        // Some pre-versioning builds wrote a bare list of ids.
        Some(Value::Array(ids)) => {
            let skip = ids.len().saturating_sub(capacity);
            let entries: Vec<Value> = ids.into_iter().skip(skip).collect();
            json!({ "capacity": capacity, "entries": entries })
        }
        Some(other @ Value::Object(_)) => other,
        Some(_) => return Err(MigrationError::malformed(VERSION, "recent_events has the wrong type")),
    };
    fields.insert("recent_events".to_owned(), history);
    Ok(())
}

/// 2 → 3: derive `season`/`day_in_season` from the old index pair and add
/// the time of day.
pub(crate) fn calendar_fields(fields: &mut Fields) -> Result<(), MigrationError> {
    const VERSION: u32 = 2;
    let index = require_u64(fields, VERSION, "season_index")?;
    let season_day = require_u64(fields, VERSION, "season_day")?;

    let day_in_season = season_day
        .checked_add(1)
        .and_then(|day| u32::try_from(day).ok())
        .ok_or_else(|| MigrationError::malformed(VERSION, "season_day is out of range"))?;

    let season = SEASON_ORDER[(index % SEASON_ORDER.len() as u64) as usize];
    fields.remove("season_index");
    fields.remove("season_day");
    fields.insert("season".to_owned(), json!(season));
    fields.insert("day_in_season".to_owned(), json!(day_in_season));
    fields.entry("time_of_day").or_insert_with(|| json!("dawn"));
    Ok(())
}

/// 3 → 4: replace the meal counter with hunger tracking and seed path
/// stability for landmarks found before it existed.
pub(crate) fn hunger_fields(fields: &mut Fields) -> Result<(), MigrationError> {
    const VERSION: u32 = 3;
    let meals = require_u64(fields, VERSION, "meals")?;
    fields.remove("meals");

    fields.insert("days_without_meal".to_owned(), json!(0));
    fields.insert("ate_meal_today".to_owned(), json!(meals > 0));
    fields.insert("ate_snack_today".to_owned(), json!(false));

    if !fields.contains_key("landmark_stability") {
        let discovered = require(fields, VERSION, "discovered_landmarks")?
            .as_array()
            .ok_or_else(|| MigrationError::malformed(VERSION, "discovered_landmarks is not a list"))?;
        let stability: Fields = discovered
            .iter()
            .filter_map(Value::as_str)
            .map(|id| (id.to_owned(), json!(1)))
            .collect();
        fields.insert("landmark_stability".to_owned(), Value::Object(stability));
    }
    Ok(())
}

/// 4 → 5: flatten per-NPC flags, move Act I runestone counters into quest
/// records, and add run status, timed modifiers and the forage counter.
pub(crate) fn quests_and_flat_flags(fields: &mut Fields) -> Result<(), MigrationError> {
    const VERSION: u32 = 4;

    let mut flags = match fields.remove("flags") {
        Some(Value::Object(flags)) => flags,
        None | Some(Value::Null) => Fields::new(),
        Some(_) => return Err(MigrationError::malformed(VERSION, "flags is not a map")),
    };

    match fields.remove("npc_flags") {
        None | Some(Value::Null) => {}
        Some(Value::Object(per_npc)) => {
            for (npc, npc_flags) in per_npc {
                let Value::Object(npc_flags) = npc_flags else {
                    return Err(MigrationError::malformed(
                        VERSION,
                        format!("npc_flags.{npc} is not a map"),
                    ));
                };
                for (flag, value) in npc_flags {
                    flags.entry(format!("{npc}.{flag}")).or_insert(value);
                }
            }
        }
        Some(_) => return Err(MigrationError::malformed(VERSION, "npc_flags is not a map")),
    }

    let mut quests = match fields.remove("quests") {
        Some(Value::Object(quests)) => quests,
        None | Some(Value::Null) => Fields::new(),
        Some(_) => return Err(MigrationError::malformed(VERSION, "quests is not a map")),
    };
    for (legacy, quest) in [
        ("act1_quest_stage", "act1"),
        ("act1_repaired_runestones", "runestones"),
    ] {
        if let Some(stage) = fields.remove(legacy).as_ref().and_then(Value::as_u64) {
            let current = quests.get(quest).and_then(Value::as_u64).unwrap_or(0);
            quests.insert(quest.to_owned(), json!(current.max(stage)));
        }
    }
    fields.remove("act1_total_runestones");
    if fields
        .remove("act1_forest_stabilized")
        .as_ref()
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        flags.insert("act1.forest_stabilized".to_owned(), json!(true));
    }

    fields.insert("flags".to_owned(), Value::Object(flags));
    fields.insert("quests".to_owned(), Value::Object(quests));
    fields.entry("status").or_insert_with(|| json!("Active"));
    fields.entry("timed_modifiers").or_insert_with(|| json!([]));
    fields.entry("steps_since_forage").or_insert_with(|| json!(0));
    Ok(())
}

pub(crate) fn require<'a>(
    fields: &'a Fields,
    version: u32,
    key: &str,
) -> Result<&'a Value, MigrationError> {
    fields
        .get(key)
        .ok_or_else(|| MigrationError::missing(version, key))
}

fn require_u64(fields: &Fields, version: u32, key: &str) -> Result<u64, MigrationError> {
    require(fields, version, key)?
        .as_u64()
        .ok_or_else(|| MigrationError::malformed(version, format!("{key} is not an unsigned integer")))
}
