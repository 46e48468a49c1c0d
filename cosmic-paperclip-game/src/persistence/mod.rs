//! Versioned save persistence.
//!
//! [`codec`] holds the format logic; [`SaveSlot`] is the narrow
//! load/save/clear handle hosts keep around.
pub mod codec;
pub mod file;
pub mod memory;
pub mod records;

pub use codec::{
    CodecError, clear_save, dehydrate, hydrate, load_state, migrate_v1_to_v2, parse_v1, parse_v2,
    save_state,
};
pub use file::{FileStore, StoreError};
pub use memory::{MemoryStore, MemoryStoreError};
pub use records::{PartialMultipliers, SaveV1, SaveV2};

use crate::KeyValueStore;
use crate::state::GameState;

/// Save handle bound to one store.
#[derive(Debug, Clone)]
pub struct SaveSlot<S> {
    store: S,
}

impl<S: KeyValueStore> SaveSlot<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored game, or `None` if nothing usable is saved.
    #[must_use]
    pub fn load(&self) -> Option<GameState> {
        load_state(&self.store)
    }

    pub fn save(&self, state: &GameState) {
        save_state(&self.store, state);
    }

    pub fn clear(&self) {
        clear_save(&self.store);
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
