//! Progression tiers and their matter budgets.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::quantity::Quantity;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    #[default]
    Lab,
    Planetary,
    Space,
    Universal,
}

impl StageId {
    pub const ALL: &'static [Self] = &[Self::Lab, Self::Planetary, Self::Space, Self::Universal];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lab => "lab",
            Self::Planetary => "planetary",
            Self::Space => "space",
            Self::Universal => "universal",
        }
    }

    /// Position in the progression order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Lab => 0,
            Self::Planetary => 1,
            Self::Space => 2,
            Self::Universal => 3,
        }
    }

    /// The following tier, or `None` for the final stage.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn stage(self) -> &'static Stage {
        &STAGES[self.index()]
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lab" => Ok(Self::Lab),
            "planetary" => Ok(Self::Planetary),
            "space" => Ok(Self::Space),
            "universal" => Ok(Self::Universal),
            _ => Err(()),
        }
    }
}

/// Immutable description of one progression tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub id: StageId,
    pub name: &'static str,
    pub scope_label: &'static str,
    pub matter_unit: &'static str,
    /// Matter budget restored when the stage is entered.
    pub total_matter: f64,
    pub probe_harvest_per_second: f64,
    pub probe_manufacture_per_second: f64,
}

impl Stage {
    #[must_use]
    pub fn total_matter(&self) -> Quantity {
        Quantity::from_f64(self.total_matter)
    }
}

/// Ordered stage table, lab first.
pub const STAGES: [Stage; 4] = [
    Stage {
        id: StageId::Lab,
        name: "The Lab",
        scope_label: "Grams",
        matter_unit: "g",
        total_matter: 1_000.0,
        probe_harvest_per_second: 40.0,
        probe_manufacture_per_second: 40.0,
    },
    Stage {
        id: StageId::Planetary,
        name: "Planetary",
        scope_label: "Earth Mass",
        matter_unit: "g",
        total_matter: 5.972e27,
        probe_harvest_per_second: 2.0e20,
        probe_manufacture_per_second: 2.0e20,
    },
    Stage {
        id: StageId::Space,
        name: "Space",
        scope_label: "Solar System",
        matter_unit: "g",
        total_matter: 1.988e33,
        probe_harvest_per_second: 7.5e24,
        probe_manufacture_per_second: 7.5e24,
    },
    Stage {
        id: StageId::Universal,
        name: "Universal",
        scope_label: "Observable Universe",
        matter_unit: "g",
        total_matter: 1e53,
        probe_harvest_per_second: 1.0e40,
        probe_manufacture_per_second: 1.0e40,
    },
];
