//! Per-second production rates derived from a state.
//!
//! The tick simulator and display layers read the same numbers from here.
use crate::allocation::Axis;
use crate::constants::{
    CLIPS_PER_SECOND_PER_AUTO_CLIPPER, CLIPS_PER_SECOND_PER_MEGA_CLIPPER,
    PROBE_REPLICATION_PER_SECOND, WIRE_PER_SECOND_BASE, WIRE_PER_SECOND_PER_AUTO_CLIPPER,
    WIRE_PER_SECOND_PER_HARVESTER,
};
use crate::numbers::{clamp_i64_to_u32, count_to_f64, round_f64_to_i64};
use crate::quantity::Quantity;
use crate::state::GameState;

/// Matter converted to wire per second by machines.
#[must_use]
pub fn wire_rate(state: &GameState) -> Quantity {
    let per_second = count_to_f64(state.auto_clippers) * WIRE_PER_SECOND_PER_AUTO_CLIPPER
        + WIRE_PER_SECOND_BASE
        + count_to_f64(state.wire_harvesters) * WIRE_PER_SECOND_PER_HARVESTER;
    Quantity::from_f64(per_second * state.multipliers.speed)
}

/// Clips machines would make per second with unlimited wire.
#[must_use]
pub fn machine_clip_rate(state: &GameState) -> Quantity {
    let per_second = count_to_f64(state.auto_clippers) * CLIPS_PER_SECOND_PER_AUTO_CLIPPER
        + count_to_f64(state.mega_clippers) * CLIPS_PER_SECOND_PER_MEGA_CLIPPER;
    Quantity::from_f64(per_second * state.multipliers.speed)
}

/// Probe-driven throughput for the current stage and allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRates {
    /// New probes per second.
    pub replication: Quantity,
    /// Matter harvested into wire per second.
    pub harvest: Quantity,
    /// Wire manufactured into clips per second.
    pub manufacture: Quantity,
}

impl ProbeRates {
    pub const IDLE: Self = Self {
        replication: Quantity::ZERO,
        harvest: Quantity::ZERO,
        manufacture: Quantity::ZERO,
    };
}

/// Probe throughput for a given probe population.
#[must_use]
pub fn probe_rates_for(state: &GameState, probes: Quantity) -> ProbeRates {
    let stage = state.stage();
    let allocation = state.allocation;
    ProbeRates {
        replication: probes
            * (PROBE_REPLICATION_PER_SECOND * allocation.fraction(Axis::Replicate)),
        harvest: probes * (stage.probe_harvest_per_second * allocation.fraction(Axis::Harvest)),
        manufacture: probes
            * (stage.probe_manufacture_per_second * allocation.fraction(Axis::Manufacture)),
    }
}

/// Probe throughput for the state's own probe count; idle while locked.
#[must_use]
pub fn probe_rates(state: &GameState) -> ProbeRates {
    if !state.probes_unlocked {
        return ProbeRates::IDLE;
    }
    probe_rates_for(state, state.probes)
}

/// Remaining matter as a fraction of the stage budget, clamped to `[0, 1]`.
#[must_use]
pub fn remaining_fraction(state: &GameState) -> f64 {
    let total = state.stage().total_matter();
    if total <= Quantity::ZERO {
        return 0.0;
    }
    let fraction = (state.matter / total).to_f64();
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Remaining matter as a whole percentage for display.
#[must_use]
pub fn remaining_percent(state: &GameState) -> u32 {
    clamp_i64_to_u32(round_f64_to_i64(remaining_fraction(state) * 100.0))
}

/// Machines are starved: less than half a second of wire in stock and
/// demand outpaces supply.
#[must_use]
pub fn is_short_of_wire(state: &GameState) -> bool {
    let demand = machine_clip_rate(state);
    state.wire < demand * 0.5 && demand > wire_rate(state)
}
