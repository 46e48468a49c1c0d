//! Cosmic Paperclip Game Engine
//!
//! Deterministic simulation core for an incremental paperclip game: matter is
//! turned into wire and wire into clips, machines and probes scale the flow,
//! and exhausted stages hand over to ever larger ones. Rendering and input
//! live elsewhere; hosts read [`GameState`] and dispatch [`GameAction`]s.

pub mod allocation;
pub mod constants;
pub mod cost;
pub mod format;
pub mod milestones;
pub mod numbers;
pub mod persistence;
pub mod quantity;
pub mod rates;
pub mod reducer;
pub mod session;
pub mod stage;
pub mod state;
pub mod tick;

// Re-export commonly used types
pub use allocation::{AllocationDraft, Axis, ProbeAllocation, normalize, set_axis};
pub use cost::{
    CostCurve, ProductionUnit, auto_clipper_cost, mega_clipper_cost, wire_harvester_cost,
};
pub use format::{format_number, format_rate};
pub use milestones::{Milestone, emit_milestones, pending_milestone};
pub use persistence::{
    CodecError, FileStore, MemoryStore, MemoryStoreError, SaveSlot, SaveV1, SaveV2, StoreError,
    clear_save, load_state, migrate_v1_to_v2, save_state,
};
pub use quantity::{Quantity, QuantityParseError};
pub use rates::{
    ProbeRates, is_short_of_wire, machine_clip_rate, probe_rates, remaining_fraction,
    remaining_percent, wire_rate,
};
pub use reducer::{GameAction, reduce};
pub use session::{GameSession, frame_delta};
pub use stage::{STAGES, Stage, StageId};
pub use state::{GameState, MilestoneFlags, Multipliers};
pub use tick::{advance_stage, tick};

/// Trait for abstracting string key-value storage
/// Platform-specific implementations should provide this
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store refuses the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}
