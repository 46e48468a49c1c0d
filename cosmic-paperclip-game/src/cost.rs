//! Purchase prices for production units.
use crate::constants::{
    AUTO_CLIPPER_BASE, AUTO_CLIPPER_GROWTH, MEGA_CLIPPER_BASE, MEGA_CLIPPER_GROWTH,
    WIRE_HARVESTER_BASE, WIRE_HARVESTER_GROWTH,
};
use crate::numbers::count_to_f64;
use crate::quantity::Quantity;
use crate::state::GameState;

/// Exponential price curve `round(base × growth^owned)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCurve {
    pub base: f64,
    pub growth: f64,
}

impl CostCurve {
    pub const AUTO_CLIPPER: Self = Self {
        base: AUTO_CLIPPER_BASE,
        growth: AUTO_CLIPPER_GROWTH,
    };
    pub const MEGA_CLIPPER: Self = Self {
        base: MEGA_CLIPPER_BASE,
        growth: MEGA_CLIPPER_GROWTH,
    };
    pub const WIRE_HARVESTER: Self = Self {
        base: WIRE_HARVESTER_BASE,
        growth: WIRE_HARVESTER_GROWTH,
    };

    /// Price of the next unit when `owned` are already held.
    #[must_use]
    pub fn price(self, owned: u32) -> Quantity {
        Quantity::from_f64(self.growth)
            .pow(count_to_f64(owned))
            .times(Quantity::from_f64(self.base))
            .round()
    }
}

/// Purchasable production units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductionUnit {
    AutoClipper,
    MegaClipper,
    WireHarvester,
}

impl ProductionUnit {
    pub const ALL: [Self; 3] = [Self::AutoClipper, Self::MegaClipper, Self::WireHarvester];

    #[must_use]
    pub const fn curve(self) -> CostCurve {
        match self {
            Self::AutoClipper => CostCurve::AUTO_CLIPPER,
            Self::MegaClipper => CostCurve::MEGA_CLIPPER,
            Self::WireHarvester => CostCurve::WIRE_HARVESTER,
        }
    }

    #[must_use]
    pub const fn owned(self, state: &GameState) -> u32 {
        match self {
            Self::AutoClipper => state.auto_clippers,
            Self::MegaClipper => state.mega_clippers,
            Self::WireHarvester => state.wire_harvesters,
        }
    }

    pub(crate) const fn owned_mut(self, state: &mut GameState) -> &mut u32 {
        match self {
            Self::AutoClipper => &mut state.auto_clippers,
            Self::MegaClipper => &mut state.mega_clippers,
            Self::WireHarvester => &mut state.wire_harvesters,
        }
    }

    /// Price of the next unit for `state`.
    #[must_use]
    pub fn next_price(self, state: &GameState) -> Quantity {
        self.curve().price(self.owned(state))
    }

    /// Whether `state` holds enough clips for the next unit.
    #[must_use]
    pub fn is_affordable(self, state: &GameState) -> bool {
        state.clips >= self.next_price(state)
    }
}

#[must_use]
pub fn auto_clipper_cost(owned: u32) -> Quantity {
    CostCurve::AUTO_CLIPPER.price(owned)
}

#[must_use]
pub fn mega_clipper_cost(owned: u32) -> Quantity {
    CostCurve::MEGA_CLIPPER.price(owned)
}

#[must_use]
pub fn wire_harvester_cost(owned: u32) -> Quantity {
    CostCurve::WIRE_HARVESTER.price(owned)
}
