//! Property-based tests for the simulation core.
//!
//! Random action sequences are replayed through the reducer and the state is
//! checked after every step.

use cosmic_paperclip_game::{
    AllocationDraft, Axis, CostCurve, GameAction, GameState, ProbeAllocation, Quantity, normalize,
    reduce, set_axis,
};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_draft() -> impl Strategy<Value = AllocationDraft> {
    (-50.0..250.0f64, -50.0..250.0f64, -50.0..250.0f64)
        .prop_map(|(replicate, harvest, manufacture)| {
            AllocationDraft::new(replicate, harvest, manufacture)
        })
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![
        Just(Axis::Replicate),
        Just(Axis::Harvest),
        Just(Axis::Manufacture),
    ]
}

/// Every action except `Reset`, which is the only way to move backwards.
fn arb_action() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        Just(GameAction::ClickMake),
        Just(GameAction::BuyAutoClipper),
        Just(GameAction::BuyMegaClipper),
        Just(GameAction::BuyWireHarvester),
        Just(GameAction::BuyWire),
        Just(GameAction::UpgradeSpeed),
        Just(GameAction::UpgradeEfficiency),
        Just(GameAction::DesignProbe),
        arb_draft().prop_map(|allocation| GameAction::SetAllocation { allocation }),
        (0.0..5.0f64).prop_map(|dt| GameAction::Tick { dt }),
    ]
}

fn arb_start() -> impl Strategy<Value = GameState> {
    (0.0..2.0e5f64, 0u32..4, 0.0..1_000.0f64).prop_map(|(clips, trust, matter)| GameState {
        clips: Quantity::from(clips),
        trust,
        unused_trust: trust,
        matter: Quantity::from(matter),
        ..GameState::new()
    })
}

fn assert_sane(state: &GameState) {
    for (name, value) in [
        ("matter", state.matter),
        ("wire", state.wire),
        ("clips", state.clips),
        ("probes", state.probes),
    ] {
        assert!(!value.is_negative(), "{name} went negative: {value}");
    }
    assert_eq!(state.allocation.sum(), 100);
    assert!(state.unused_trust <= state.trust);
    assert!(state.news.len() <= cosmic_paperclip_game::constants::NEWS_CAPACITY);
}

fn fired_milestones(state: &GameState) -> u32 {
    state
        .milestone_flags
        .values()
        .map(|flags| u32::from(flags.half) + u32::from(flags.ten) + u32::from(flags.one))
        .sum()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn normalize_always_sums_to_one_hundred(draft in arb_draft()) {
        let allocation = normalize(draft);
        prop_assert_eq!(allocation.sum(), 100);
        for axis in Axis::ALL {
            prop_assert!(allocation.get(axis) <= 100);
        }
    }

    #[test]
    fn set_axis_pins_the_chosen_axis(
        draft in arb_draft(),
        axis in arb_axis(),
        value in 0u32..=100,
    ) {
        let current: ProbeAllocation = normalize(draft);
        let next = set_axis(current, axis, f64::from(value));
        prop_assert_eq!(next.sum(), 100);
        prop_assert_eq!(next.get(axis), value);
    }

    #[test]
    fn costs_strictly_increase(owned in 0u32..5_000) {
        for curve in [CostCurve::AUTO_CLIPPER, CostCurve::MEGA_CLIPPER, CostCurve::WIRE_HARVESTER] {
            prop_assert!(curve.price(owned + 1) > curve.price(owned));
        }
    }

    #[test]
    fn action_sequences_keep_the_state_sane(
        start in arb_start(),
        actions in proptest::collection::vec(arb_action(), 1..80),
    ) {
        let mut state = start;
        let base_trust = state.trust;
        assert_sane(&state);
        for action in actions {
            let previous_stage = state.stage_id;
            let previous_flags = state.milestone_flags.clone();
            state = reduce(&state, action);
            assert_sane(&state);
            prop_assert!(state.stage_id >= previous_stage);
            for (stage, before) in &previous_flags {
                let after = state.milestone_flags.get(stage).copied().unwrap_or_default();
                prop_assert!(after.half >= before.half, "{} half flag cleared", stage);
                prop_assert!(after.ten >= before.ten, "{} ten flag cleared", stage);
                prop_assert!(after.one >= before.one, "{} one flag cleared", stage);
            }
            // Each flag grants exactly one trust, so trust counts the firings.
            prop_assert_eq!(state.trust, base_trust + fired_milestones(&state));
        }
    }

    #[test]
    fn ticks_never_create_matter(
        start in arb_start(),
        dts in proptest::collection::vec(0.0..2.0f64, 1..40),
    ) {
        let mut state = start;
        for dt in dts {
            let before = state.clone();
            state = reduce(&state, GameAction::Tick { dt });
            if state.stage_id == before.stage_id {
                prop_assert!(state.matter <= before.matter);
                prop_assert!(state.clips >= before.clips);
            }
        }
    }
}
