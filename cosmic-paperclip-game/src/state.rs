use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::allocation::ProbeAllocation;
use crate::constants::{NEWS_BOOT, NEWS_BOOT_WIRE, NEWS_CAPACITY, SAVE_VERSION};
use crate::quantity::Quantity;
use crate::stage::{Stage, StageId};

/// Permanent trust-bought multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multipliers {
    /// Scales every machine rate; grows with upgrades.
    pub speed: f64,
    /// Wire spent per machine-made clip; shrinks with upgrades.
    pub efficiency: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            efficiency: 1.0,
        }
    }
}

impl Multipliers {
    /// Replace non-positive or non-finite factors with the neutral value.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let fix = |value: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                1.0
            }
        };
        Self {
            speed: fix(self.speed),
            efficiency: fix(self.efficiency),
        }
    }
}

/// One-shot remaining-matter milestones for a single stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MilestoneFlags {
    #[serde(default)]
    pub half: bool,
    #[serde(default)]
    pub ten: bool,
    #[serde(default)]
    pub one: bool,
}

/// Complete simulation snapshot.
///
/// Values are replaced wholesale by [`crate::reduce`]; callers never observe a
/// state changing underneath them.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub version: u32,
    pub stage_id: StageId,
    pub matter: Quantity,
    pub wire: Quantity,
    pub clips: Quantity,
    pub auto_clippers: u32,
    pub mega_clippers: u32,
    pub wire_harvesters: u32,
    pub probes_unlocked: bool,
    pub probes: Quantity,
    pub allocation: ProbeAllocation,
    pub trust: u32,
    pub unused_trust: u32,
    pub multipliers: Multipliers,
    /// Most recent first, capped at [`NEWS_CAPACITY`].
    pub news: VecDeque<String>,
    pub milestone_flags: BTreeMap<StageId, MilestoneFlags>,
}

impl Default for GameState {
    fn default() -> Self {
        let stage = StageId::Lab.stage();
        Self {
            version: SAVE_VERSION,
            stage_id: stage.id,
            matter: stage.total_matter(),
            wire: Quantity::ONE,
            clips: Quantity::ZERO,
            auto_clippers: 0,
            mega_clippers: 0,
            wire_harvesters: 0,
            probes_unlocked: false,
            probes: Quantity::ZERO,
            allocation: ProbeAllocation::default(),
            trust: 0,
            unused_trust: 0,
            multipliers: Multipliers::default(),
            news: VecDeque::from([NEWS_BOOT.to_string(), NEWS_BOOT_WIRE.to_string()]),
            milestone_flags: BTreeMap::new(),
        }
    }
}

impl GameState {
    /// Fresh game, identical to `GameState::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> &'static Stage {
        self.stage_id.stage()
    }

    /// Milestone flags for the current stage; unset when the stage has none yet.
    #[must_use]
    pub fn current_flags(&self) -> MilestoneFlags {
        self.milestone_flags
            .get(&self.stage_id)
            .copied()
            .unwrap_or_default()
    }

    /// Prepend a news line, dropping the oldest beyond capacity.
    pub(crate) fn push_news(&mut self, message: impl Into<String>) {
        self.news.push_front(message.into());
        self.news.truncate(NEWS_CAPACITY);
    }

    /// Builder-style variant of [`Self::push_news`].
    #[must_use]
    pub(crate) fn with_news(mut self, message: impl Into<String>) -> Self {
        self.push_news(message);
        self
    }

    #[must_use]
    pub fn latest_news(&self) -> Option<&str> {
        self.news.front().map(String::as_str)
    }
}
