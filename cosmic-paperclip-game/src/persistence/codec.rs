//! Conversion between [`GameState`] and the versioned save records, plus the
//! load/save/clear procedures that run against a [`KeyValueStore`].
//!
//! Loading never fails outward: anything unreadable is logged and reported as
//! "no save", and the caller starts a fresh game.
use anyhow::Context;
use log::{info, warn};
use thiserror::Error;

use super::records::{SaveV1, SaveV2};
use crate::KeyValueStore;
use crate::allocation::{AllocationDraft, normalize};
use crate::constants::{NEWS_CAPACITY, SAVE_KEY_V1, SAVE_KEY_V2, SAVE_VERSION};
use crate::numbers::saved_number_to_u32;
use crate::quantity::Quantity;
use crate::state::{GameState, Multipliers};

const LEGACY_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("save record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },
}

/// Snapshot `state` into the current save shape.
#[must_use]
pub fn dehydrate(state: &GameState) -> SaveV2 {
    SaveV2 {
        version: SAVE_VERSION,
        stage_id: state.stage_id,
        matter: state.matter,
        wire: state.wire,
        clips: state.clips,
        auto_clippers: state.auto_clippers,
        mega_clippers: state.mega_clippers,
        wire_harvesters: state.wire_harvesters,
        probes_unlocked: state.probes_unlocked,
        probes: state.probes,
        allocation: AllocationDraft::from(state.allocation),
        trust: state.trust,
        unused_trust: state.unused_trust,
        multipliers: state.multipliers,
        news: state.news.iter().cloned().collect(),
        milestone_flags: state.milestone_flags.clone(),
    }
}

/// Rebuild a state from a current-version record.
///
/// Resources are clamped to be non-negative, the allocation is renormalized,
/// unusable multipliers fall back to 1, and news is cut to capacity.
///
/// # Errors
///
/// Returns [`CodecError::Version`] if the record is not version 2.
pub fn hydrate(saved: SaveV2) -> Result<GameState, CodecError> {
    if saved.version != SAVE_VERSION {
        return Err(CodecError::Version {
            found: saved.version,
            expected: SAVE_VERSION,
        });
    }
    let mut news = saved.news;
    news.truncate(NEWS_CAPACITY);
    Ok(GameState {
        version: SAVE_VERSION,
        stage_id: saved.stage_id,
        matter: non_negative(saved.matter),
        wire: non_negative(saved.wire),
        clips: non_negative(saved.clips),
        auto_clippers: saved.auto_clippers,
        mega_clippers: saved.mega_clippers,
        wire_harvesters: saved.wire_harvesters,
        probes_unlocked: saved.probes_unlocked,
        probes: non_negative(saved.probes),
        allocation: normalize(saved.allocation),
        trust: saved.trust,
        unused_trust: saved.unused_trust,
        multipliers: saved.multipliers.sanitized(),
        news: news.into(),
        milestone_flags: saved.milestone_flags,
    })
}

/// Carry a version 1 record forward, filling absent fields from a fresh game.
#[must_use]
pub fn migrate_v1_to_v2(saved: SaveV1) -> SaveV2 {
    let fresh = GameState::new();
    let partial = saved.multipliers.unwrap_or_default();
    SaveV2 {
        version: SAVE_VERSION,
        stage_id: saved.stage_id,
        matter: Quantity::from_f64(saved.matter),
        wire: Quantity::from_f64(saved.wire),
        clips: Quantity::from_f64(saved.clips),
        auto_clippers: saved_number_to_u32(saved.auto_clippers),
        mega_clippers: saved_number_to_u32(saved.mega_clippers),
        wire_harvesters: saved_number_to_u32(saved.wire_harvesters),
        probes_unlocked: saved.probes_unlocked,
        probes: Quantity::from_f64(saved.probes),
        allocation: saved.allocation,
        trust: saved.trust.map_or(fresh.trust, saved_number_to_u32),
        unused_trust: saved.unused_trust.map_or(fresh.unused_trust, saved_number_to_u32),
        multipliers: Multipliers {
            speed: partial.speed.unwrap_or(fresh.multipliers.speed),
            efficiency: partial.efficiency.unwrap_or(fresh.multipliers.efficiency),
        },
        news: saved.news,
        milestone_flags: saved.milestone_flags.unwrap_or(fresh.milestone_flags),
    }
}

/// Parse and version-check a version 2 save.
///
/// # Errors
///
/// Returns an error if the text is not a well-formed version 2 record.
pub fn parse_v2(raw: &str) -> Result<SaveV2, CodecError> {
    let saved: SaveV2 = serde_json::from_str(raw)?;
    check_version(saved.version, SAVE_VERSION)?;
    Ok(saved)
}

/// Parse and version-check a version 1 save.
///
/// # Errors
///
/// Returns an error if the text is not a well-formed version 1 record.
pub fn parse_v1(raw: &str) -> Result<SaveV1, CodecError> {
    let saved: SaveV1 = serde_json::from_str(raw)?;
    check_version(saved.version, LEGACY_VERSION)?;
    Ok(saved)
}

/// Load the newest readable save, migrating a version 1 save if that is all
/// there is. Returns `None` when nothing usable is stored.
pub fn load_state<S: KeyValueStore>(store: &S) -> Option<GameState> {
    match load_current(store) {
        Ok(Some(state)) => return Some(state),
        Ok(None) => {}
        Err(err) => warn!("discarding unreadable save: {err:#}"),
    }
    match load_legacy(store) {
        Ok(state) => state,
        Err(err) => {
            warn!("discarding unreadable legacy save: {err:#}");
            None
        }
    }
}

/// Write `state` under the current key. Failures are logged and dropped.
pub fn save_state<S: KeyValueStore>(store: &S, state: &GameState) {
    let written = serde_json::to_string(&dehydrate(state))
        .context("encoding save")
        .and_then(|json| {
            store
                .set(SAVE_KEY_V2, &json)
                .with_context(|| format!("writing {SAVE_KEY_V2}"))
        });
    if let Err(err) = written {
        warn!("failed to save game: {err:#}");
    }
}

/// Remove every save version. Safe to call when nothing is stored.
pub fn clear_save<S: KeyValueStore>(store: &S) {
    for key in [SAVE_KEY_V1, SAVE_KEY_V2] {
        if let Err(err) = store.remove(key) {
            warn!("failed to remove {key}: {err}");
        }
    }
}

fn check_version(found: u32, expected: u32) -> Result<(), CodecError> {
    if found == expected {
        Ok(())
    } else {
        Err(CodecError::Version { found, expected })
    }
}

fn non_negative(value: Quantity) -> Quantity {
    value.max(Quantity::ZERO)
}

fn load_current<S: KeyValueStore>(store: &S) -> anyhow::Result<Option<GameState>> {
    let Some(raw) = store
        .get(SAVE_KEY_V2)
        .with_context(|| format!("reading {SAVE_KEY_V2}"))?
    else {
        return Ok(None);
    };
    let saved = parse_v2(&raw).with_context(|| format!("parsing {SAVE_KEY_V2}"))?;
    Ok(Some(hydrate(saved)?))
}

fn load_legacy<S: KeyValueStore>(store: &S) -> anyhow::Result<Option<GameState>> {
    let Some(raw) = store
        .get(SAVE_KEY_V1)
        .with_context(|| format!("reading {SAVE_KEY_V1}"))?
    else {
        return Ok(None);
    };
    let legacy = parse_v1(&raw).with_context(|| format!("parsing {SAVE_KEY_V1}"))?;
    let migrated = migrate_v1_to_v2(legacy);
    info!("migrated {SAVE_KEY_V1} to {SAVE_KEY_V2}");
    match serde_json::to_string(&migrated) {
        Ok(json) => {
            if let Err(err) = store.set(SAVE_KEY_V2, &json) {
                warn!("failed to persist migrated save: {err}");
            }
        }
        Err(err) => warn!("failed to encode migrated save: {err}"),
    }
    Ok(Some(hydrate(migrated)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::stage::StageId;
    use serde_json::json;

    fn v1_record() -> serde_json::Value {
        json!({
            "version": 1,
            "stageId": "planetary",
            "matter": 5.0e27,
            "wire": 40.0,
            "clips": 12345,
            "autoClippers": 3,
            "megaClippers": 1,
            "wireHarvesters": 0,
            "probesUnlocked": true,
            "probes": 2,
            "allocation": { "replicate": 50, "harvest": 25, "manufacture": 25 },
            "news": ["old news"]
        })
    }

    #[test]
    fn migration_stringifies_quantities_and_fills_defaults() {
        let saved = parse_v1(&v1_record().to_string()).unwrap();
        let migrated = migrate_v1_to_v2(saved);
        let encoded = serde_json::to_value(&migrated).unwrap();
        assert_eq!(encoded["version"], 2);
        assert_eq!(encoded["clips"], "12345");
        assert_eq!(encoded["probes"], "2");
        assert_eq!(encoded["trust"], 0);
        assert_eq!(encoded["unusedTrust"], 0);
        assert_eq!(encoded["multipliers"], json!({ "speed": 1.0, "efficiency": 1.0 }));
        assert_eq!(migrated.auto_clippers, 3);
    }

    #[test]
    fn partial_multipliers_keep_saved_factors() {
        let mut record = v1_record();
        record["multipliers"] = json!({ "speed": 1.5625 });
        let migrated = migrate_v1_to_v2(parse_v1(&record.to_string()).unwrap());
        assert!((migrated.multipliers.speed - 1.5625).abs() < f64::EPSILON);
        assert!((migrated.multipliers.efficiency - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hydrate_sanitizes_out_of_range_fields() {
        let mut saved = dehydrate(&GameState::new());
        saved.clips = Quantity::from(-20.0);
        saved.allocation = AllocationDraft::new(10.0, 10.0, 0.0);
        saved.multipliers = Multipliers {
            speed: f64::NAN,
            efficiency: -1.0,
        };
        saved.news = (0..50).map(|n| format!("line {n}")).collect();
        let state = hydrate(saved).unwrap();
        assert!(state.clips.is_zero());
        assert_eq!(state.allocation.sum(), 100);
        assert_eq!(state.allocation.replicate(), 50);
        assert_eq!(state.multipliers, Multipliers::default());
        assert_eq!(state.news.len(), NEWS_CAPACITY);
        assert_eq!(state.latest_news(), Some("line 0"));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let mut saved = dehydrate(&GameState::new());
        saved.version = 3;
        assert!(matches!(
            hydrate(saved),
            Err(CodecError::Version {
                found: 3,
                expected: 2
            })
        ));
        let mut record = v1_record();
        record["version"] = json!(2);
        assert!(parse_v1(&record.to_string()).is_err());
    }

    #[test]
    fn unknown_stage_fails_validation() {
        let mut record = serde_json::to_value(dehydrate(&GameState::new())).unwrap();
        record["stageId"] = json!("galactic");
        assert!(parse_v2(&record.to_string()).is_err());
    }

    #[test]
    fn unknown_milestone_stage_rejects_the_record() {
        let mut record = serde_json::to_value(dehydrate(&GameState::new())).unwrap();
        record["milestoneFlags"] = json!({ "planetary": { "half": true } });
        assert!(parse_v2(&record.to_string()).is_ok());

        record["milestoneFlags"] = json!({
            "planetary": { "half": true },
            "galactic": { "half": true },
        });
        assert!(parse_v2(&record.to_string()).is_err());

        let store = MemoryStore::new();
        store.set(SAVE_KEY_V2, &record.to_string()).unwrap();
        assert!(load_state(&store).is_none());
    }

    #[test]
    fn legacy_load_writes_the_migrated_record_forward() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY_V1, &v1_record().to_string()).unwrap();

        let state = load_state(&store).unwrap();
        assert_eq!(state.stage_id, StageId::Planetary);
        assert_eq!(state.clips, Quantity::from(12_345.0));

        let forwarded = store.get(SAVE_KEY_V2).unwrap().unwrap();
        assert_eq!(hydrate(parse_v2(&forwarded).unwrap()).unwrap(), state);
    }

    #[test]
    fn broken_current_save_falls_back_to_legacy() {
        let store = MemoryStore::new();
        store.set(SAVE_KEY_V2, "{not json").unwrap();
        store.set(SAVE_KEY_V1, &v1_record().to_string()).unwrap();
        let state = load_state(&store).unwrap();
        assert_eq!(state.auto_clippers, 3);
    }

    #[test]
    fn unavailable_store_is_swallowed() {
        let store = MemoryStore::unavailable();
        save_state(&store, &GameState::new());
        assert_eq!(load_state(&store), None);
        clear_save(&store);
    }
}
