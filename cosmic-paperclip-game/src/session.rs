//! Host-side glue: owns the live state, feeds frames into the reducer, and
//! keeps the save slot current.
use log::{debug, info};

use crate::KeyValueStore;
use crate::constants::{AUTOSAVE_INTERVAL_SECONDS, MAX_FRAME_DELTA_SECONDS};
use crate::persistence::SaveSlot;
use crate::reducer::{GameAction, reduce};
use crate::state::GameState;

/// Clamp the gap between two frame timestamps to `[0, MAX_FRAME_DELTA_SECONDS]`.
#[must_use]
pub fn frame_delta(last_seconds: f64, now_seconds: f64) -> f64 {
    let dt = now_seconds - last_seconds;
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DELTA_SECONDS)
    } else {
        0.0
    }
}

/// A running game bound to a save slot.
#[derive(Debug)]
pub struct GameSession<S> {
    state: GameState,
    slot: SaveSlot<S>,
    last_frame: Option<f64>,
    next_autosave: f64,
}

impl<S: KeyValueStore> GameSession<S> {
    /// Resume the stored game, or start fresh if nothing usable is saved.
    pub fn restore_or_new(store: S) -> Self {
        let slot = SaveSlot::new(store);
        let state = slot.load().map_or_else(
            || {
                debug!("no saved game, starting fresh");
                GameState::new()
            },
            |state| {
                info!("restored saved game in stage {}", state.stage_id);
                state
            },
        );
        Self::from_parts(state, slot)
    }

    /// Wrap an existing state without touching the store.
    pub fn from_state(state: GameState, store: S) -> Self {
        Self::from_parts(state, SaveSlot::new(store))
    }

    const fn from_parts(state: GameState, slot: SaveSlot<S>) -> Self {
        Self {
            state,
            slot,
            last_frame: None,
            next_autosave: 0.0,
        }
    }

    /// Run `action` through the reducer. A reset also wipes every save.
    pub fn dispatch(&mut self, action: GameAction) {
        self.state = reduce(&self.state, action);
        if matches!(action, GameAction::Reset) {
            self.slot.clear();
        }
    }

    /// Feed a frame timestamp, in seconds. Returns the tick length applied.
    ///
    /// The first frame only primes the clock. Later frames tick by the clamped
    /// gap since the previous one and autosave once the interval has passed.
    pub fn advance_frame(&mut self, now_seconds: f64) -> f64 {
        if !now_seconds.is_finite() {
            return 0.0;
        }
        let Some(last) = self.last_frame.replace(now_seconds) else {
            self.next_autosave = now_seconds + AUTOSAVE_INTERVAL_SECONDS;
            return 0.0;
        };
        let dt = frame_delta(last, now_seconds);
        if dt > 0.0 {
            self.dispatch(GameAction::Tick { dt });
        }
        if now_seconds >= self.next_autosave {
            self.save();
            self.next_autosave = now_seconds + AUTOSAVE_INTERVAL_SECONDS;
        }
        dt
    }

    /// The host went to the background; persist immediately.
    pub fn on_hidden(&self) {
        debug!("host hidden, saving");
        self.save();
    }

    pub fn save(&self) {
        self.slot.save(&self.state);
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn slot(&self) -> &SaveSlot<S> {
        &self.slot
    }
}
