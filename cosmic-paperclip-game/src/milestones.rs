//! Remaining-matter milestones and the trust they grant.
use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{MILESTONE_HALF_FRACTION, MILESTONE_ONE_FRACTION, MILESTONE_TEN_FRACTION};
use crate::rates::remaining_fraction;
use crate::state::{GameState, MilestoneFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Milestone {
    /// Half of the stage's matter consumed.
    Half,
    /// Ninety percent consumed.
    Ten,
    /// Final one percent remaining.
    One,
}

impl Milestone {
    /// Evaluation priority; only the first eligible milestone fires per tick.
    pub const ORDER: [Self; 3] = [Self::Half, Self::Ten, Self::One];

    /// Remaining-matter fraction at or below which this milestone fires.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Half => MILESTONE_HALF_FRACTION,
            Self::Ten => MILESTONE_TEN_FRACTION,
            Self::One => MILESTONE_ONE_FRACTION,
        }
    }

    #[must_use]
    pub const fn is_set(self, flags: &MilestoneFlags) -> bool {
        match self {
            Self::Half => flags.half,
            Self::Ten => flags.ten,
            Self::One => flags.one,
        }
    }

    fn mark(self, flags: &mut MilestoneFlags) {
        match self {
            Self::Half => flags.half = true,
            Self::Ten => flags.ten = true,
            Self::One => flags.one = true,
        }
    }

    fn headline(self, stage_name: &str) -> String {
        match self {
            Self::Half => format!("{stage_name}: 50% of accessible matter consumed."),
            Self::Ten => format!("{stage_name}: 90% consumed. Supply lines tighten."),
            Self::One => format!("{stage_name}: Final reserves detected."),
        }
    }
}

/// The milestone that would fire for `state` right now, if any.
#[must_use]
pub fn pending_milestone(state: &GameState) -> Option<Milestone> {
    let remaining = remaining_fraction(state);
    let flags = state.current_flags();
    Milestone::ORDER
        .into_iter()
        .find(|milestone| !milestone.is_set(&flags) && remaining <= milestone.threshold())
}

/// Fire at most one pending milestone: log it, grant one trust, and set its flag.
#[must_use]
pub fn emit_milestones(state: GameState) -> GameState {
    let Some(milestone) = pending_milestone(&state) else {
        return state;
    };
    let stage = state.stage();
    debug!("milestone {milestone:?} reached in stage {}", stage.id);

    let mut next = state.with_news(milestone.headline(stage.name));
    let flags = next.milestone_flags.entry(stage.id).or_default();
    milestone.mark(flags);
    next.trust = next.trust.saturating_add(1);
    next.unused_trust = next.unused_trust.saturating_add(1);
    next
}
