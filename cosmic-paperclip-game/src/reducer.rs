//! Single entry point mapping `(state, action)` to the next state.
//!
//! Every branch is total: unaffordable or already-applied actions hand back an
//! unchanged copy of the input instead of failing.
use log::info;
use serde::{Deserialize, Serialize};

use crate::allocation::{AllocationDraft, normalize};
use crate::constants::{
    EFFICIENCY_UPGRADE_FACTOR, NEWS_AUTO_CLIPPER, NEWS_EFFICIENCY_UPGRADE, NEWS_HARVESTER,
    NEWS_MEGA_CLIPPER, NEWS_PROBE_DESIGN, NEWS_SPEED_UPGRADE, PROBE_DESIGN_COST,
    SPEED_UPGRADE_FACTOR, WIRE_PURCHASE_AMOUNT, WIRE_PURCHASE_COST,
};
use crate::cost::ProductionUnit;
use crate::quantity::Quantity;
use crate::state::GameState;
use crate::tick::tick;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    /// Hand-make one clip, pulling one unit of matter into wire if needed.
    ClickMake,
    BuyAutoClipper,
    BuyMegaClipper,
    BuyWireHarvester,
    /// Flat-price bulk wire.
    BuyWire,
    UpgradeSpeed,
    UpgradeEfficiency,
    /// One-time probe unlock.
    DesignProbe,
    SetAllocation { allocation: AllocationDraft },
    /// Discard everything and start over.
    Reset,
    /// Advance the simulation by `dt` seconds.
    Tick { dt: f64 },
}

/// Apply `action` to `state`, returning the successor state.
#[must_use]
pub fn reduce(state: &GameState, action: GameAction) -> GameState {
    match action {
        GameAction::ClickMake => click_make(state),
        GameAction::BuyAutoClipper => buy_unit(state, ProductionUnit::AutoClipper),
        GameAction::BuyMegaClipper => buy_unit(state, ProductionUnit::MegaClipper),
        GameAction::BuyWireHarvester => buy_unit(state, ProductionUnit::WireHarvester),
        GameAction::BuyWire => buy_wire(state),
        GameAction::UpgradeSpeed => spend_trust(state, NEWS_SPEED_UPGRADE, |s| {
            s.multipliers.speed *= SPEED_UPGRADE_FACTOR;
        }),
        GameAction::UpgradeEfficiency => spend_trust(state, NEWS_EFFICIENCY_UPGRADE, |s| {
            s.multipliers.efficiency *= EFFICIENCY_UPGRADE_FACTOR;
        }),
        GameAction::DesignProbe => design_probe(state),
        GameAction::SetAllocation { allocation } => GameState {
            allocation: normalize(allocation),
            ..state.clone()
        },
        GameAction::Reset => {
            info!("game reset requested");
            GameState::new()
        }
        GameAction::Tick { dt } => tick(state, dt),
    }
}

fn click_make(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.wire < Quantity::ONE && next.matter >= Quantity::ONE {
        next.matter = next.matter - Quantity::ONE;
        next.wire = next.wire + Quantity::ONE;
    }
    if next.wire >= Quantity::ONE {
        next.wire = next.wire - Quantity::ONE;
        next.clips = next.clips + Quantity::ONE;
    }
    next
}

fn buy_unit(state: &GameState, unit: ProductionUnit) -> GameState {
    let price = unit.next_price(state);
    if state.clips < price {
        return state.clone();
    }
    let mut next = state.clone();
    let owned = unit.owned_mut(&mut next);
    *owned = owned.saturating_add(1);
    next.clips = next.clips - price;
    let headline = match unit {
        ProductionUnit::AutoClipper => NEWS_AUTO_CLIPPER,
        ProductionUnit::MegaClipper => NEWS_MEGA_CLIPPER,
        ProductionUnit::WireHarvester => NEWS_HARVESTER,
    };
    next.with_news(headline)
}

fn buy_wire(state: &GameState) -> GameState {
    let price = Quantity::from_f64(WIRE_PURCHASE_COST);
    if state.clips < price {
        return state.clone();
    }
    GameState {
        clips: state.clips - price,
        wire: state.wire + Quantity::from_f64(WIRE_PURCHASE_AMOUNT),
        ..state.clone()
    }
}

fn spend_trust(state: &GameState, headline: &str, apply: impl FnOnce(&mut GameState)) -> GameState {
    if state.unused_trust < 1 {
        return state.clone();
    }
    let mut next = state.clone();
    next.unused_trust -= 1;
    apply(&mut next);
    next.with_news(headline)
}

fn design_probe(state: &GameState) -> GameState {
    let price = Quantity::from_f64(PROBE_DESIGN_COST);
    if state.probes_unlocked || state.clips < price {
        return state.clone();
    }
    GameState {
        clips: state.clips - price,
        probes_unlocked: true,
        probes: state.probes.max(Quantity::ONE),
        ..state.clone()
    }
    .with_news(NEWS_PROBE_DESIGN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{auto_clipper_cost, mega_clipper_cost, wire_harvester_cost};

    fn with_clips(clips: f64) -> GameState {
        GameState {
            clips: Quantity::from(clips),
            ..GameState::new()
        }
    }

    #[test]
    fn click_uses_existing_wire_first() {
        let state = reduce(&GameState::new(), GameAction::ClickMake);
        assert_eq!(state.clips, Quantity::ONE);
        assert!(state.wire.is_zero());
        assert_eq!(state.matter, Quantity::from(1_000.0));
    }

    #[test]
    fn click_pulls_matter_when_out_of_wire() {
        let state = GameState {
            wire: Quantity::ZERO,
            ..GameState::new()
        };
        let next = reduce(&state, GameAction::ClickMake);
        assert_eq!(next.matter, Quantity::from(999.0));
        assert!(next.wire.is_zero());
        assert_eq!(next.clips, Quantity::ONE);
    }

    #[test]
    fn click_without_inputs_is_noop() {
        let state = GameState {
            wire: Quantity::ZERO,
            matter: Quantity::from(0.5),
            ..GameState::new()
        };
        assert_eq!(reduce(&state, GameAction::ClickMake), state);
    }

    #[test]
    fn buying_units_spends_the_curve_price() {
        let state = with_clips(10_000.0);
        let next = reduce(&state, GameAction::BuyAutoClipper);
        assert_eq!(next.auto_clippers, 1);
        assert_eq!(next.clips, state.clips - auto_clipper_cost(0));
        assert_eq!(next.latest_news(), Some(NEWS_AUTO_CLIPPER));

        let next = reduce(&next, GameAction::BuyMegaClipper);
        assert_eq!(next.mega_clippers, 1);
        let next = reduce(&next, GameAction::BuyWireHarvester);
        assert_eq!(next.wire_harvesters, 1);
        assert_eq!(
            next.clips,
            state.clips - auto_clipper_cost(0) - mega_clipper_cost(0) - wire_harvester_cost(0)
        );
    }

    #[test]
    fn unaffordable_purchases_leave_state_untouched() {
        let state = with_clips(14.0);
        for action in [
            GameAction::BuyAutoClipper,
            GameAction::BuyMegaClipper,
            GameAction::BuyWireHarvester,
            GameAction::BuyWire,
            GameAction::DesignProbe,
            GameAction::UpgradeSpeed,
            GameAction::UpgradeEfficiency,
        ] {
            assert_eq!(reduce(&state, action), state, "{action:?}");
        }
    }

    #[test]
    fn buy_wire_is_flat_priced() {
        let next = reduce(&with_clips(250.0), GameAction::BuyWire);
        assert_eq!(next.clips, Quantity::from(150.0));
        assert_eq!(next.wire, Quantity::from(1_001.0));
    }

    #[test]
    fn upgrades_spend_trust() {
        let state = GameState {
            unused_trust: 2,
            trust: 2,
            ..GameState::new()
        };
        let next = reduce(&state, GameAction::UpgradeSpeed);
        assert_eq!(next.unused_trust, 1);
        assert_eq!(next.trust, 2);
        assert!((next.multipliers.speed - 1.25).abs() < f64::EPSILON);

        let next = reduce(&next, GameAction::UpgradeEfficiency);
        assert_eq!(next.unused_trust, 0);
        assert!((next.multipliers.efficiency - 0.9).abs() < f64::EPSILON);
        assert_eq!(reduce(&next, GameAction::UpgradeSpeed), next);
    }

    #[test]
    fn probe_design_unlocks_once() {
        let state = with_clips(250_000.0);
        let next = reduce(&state, GameAction::DesignProbe);
        assert!(next.probes_unlocked);
        assert_eq!(next.probes, Quantity::ONE);
        assert_eq!(next.clips, Quantity::from(150_000.0));
        assert_eq!(reduce(&next, GameAction::DesignProbe), next);
    }

    #[test]
    fn set_allocation_normalizes() {
        let next = reduce(
            &GameState::new(),
            GameAction::SetAllocation {
                allocation: AllocationDraft::new(1.0, 1.0, 2.0),
            },
        );
        assert_eq!(next.allocation.replicate(), 25);
        assert_eq!(next.allocation.harvest(), 25);
        assert_eq!(next.allocation.manufacture(), 50);
    }

    #[test]
    fn reset_returns_a_fresh_game() {
        let state = GameState {
            auto_clippers: 9,
            trust: 3,
            ..with_clips(1e9)
        };
        assert_eq!(reduce(&state, GameAction::Reset), GameState::new());
    }

    #[test]
    fn actions_round_trip_through_json_tags() {
        let json = serde_json::to_string(&GameAction::Tick { dt: 0.25 }).unwrap();
        assert_eq!(json, r#"{"type":"TICK","dt":0.25}"#);
        let parsed: GameAction = serde_json::from_str(r#"{"type":"BUY_AUTO_CLIPPER"}"#).unwrap();
        assert_eq!(parsed, GameAction::BuyAutoClipper);
    }
}
