//! Time-based simulation step.
//!
//! One tick runs the production pipeline in a fixed order, each step reading
//! the stocks left by the previous one:
//!
//! 1. machines turn matter into wire,
//! 2. machines turn wire into clips (paying `efficiency` wire per clip),
//! 3. probes replicate, then harvest and manufacture with the grown fleet,
//! 4. at most one milestone fires,
//! 5. an exhausted stage hands over to the next.
use log::debug;

use crate::constants::NEWS_MATTER_EXHAUSTED;
use crate::milestones::emit_milestones;
use crate::quantity::Quantity;
use crate::rates::{machine_clip_rate, probe_rates_for, wire_rate};
use crate::state::GameState;

/// Advance `state` by `dt` seconds. Non-positive or non-finite `dt` is a no-op.
#[must_use]
pub fn tick(state: &GameState, dt: f64) -> GameState {
    if !dt.is_finite() || dt <= 0.0 {
        return state.clone();
    }
    let next = run_machines(state.clone(), dt);
    let next = run_probes(next, dt);
    let next = emit_milestones(next);
    advance_stage(next)
}

fn run_machines(mut state: GameState, dt: f64) -> GameState {
    let seconds = Quantity::from_f64(dt);

    let gathered = state.matter.min(wire_rate(&state) * seconds);
    state.matter = state.matter.saturating_sub(gathered);
    state.wire = state.wire + gathered;

    let efficiency = Quantity::from_f64(state.multipliers.efficiency);
    let wanted = machine_clip_rate(&state) * seconds;
    let made = (state.wire / efficiency).min(wanted);
    state.wire = state.wire.saturating_sub(made * efficiency);
    state.clips = state.clips + made;
    state
}

fn run_probes(mut state: GameState, dt: f64) -> GameState {
    if !state.probes_unlocked || state.probes.is_zero() || state.matter.is_zero() {
        return state;
    }
    let seconds = Quantity::from_f64(dt);

    let grown = probe_rates_for(&state, state.probes).replication * seconds;
    state.probes = state.probes + grown;

    // Harvest and manufacture use the post-growth fleet.
    let rates = probe_rates_for(&state, state.probes);
    let harvested = state.matter.min(rates.harvest * seconds);
    state.matter = state.matter.saturating_sub(harvested);
    state.wire = state.wire + harvested;

    let manufactured = state.wire.min(rates.manufacture * seconds);
    state.wire = state.wire.saturating_sub(manufactured);
    state.clips = state.clips + manufactured;
    state
}

/// Move to the next stage once matter is fully exhausted.
///
/// The final stage has nowhere to go: matter stays pinned at zero and a
/// single terminal news line is recorded.
#[must_use]
pub fn advance_stage(state: GameState) -> GameState {
    if state.matter > Quantity::ZERO {
        return state;
    }
    let current = state.stage_id;
    match current.next() {
        Some(next_id) => {
            let stage = next_id.stage();
            debug!("stage {current} exhausted, advancing to {next_id}");
            let mut next = state.with_news(format!(
                "Scale shift: {}. Available matter recalibrated.",
                stage.name
            ));
            next.stage_id = next_id;
            next.matter = stage.total_matter();
            next
        }
        None => {
            if state.latest_news() == Some(NEWS_MATTER_EXHAUSTED) {
                return state;
            }
            debug!("final stage {current} exhausted");
            state.with_news(NEWS_MATTER_EXHAUSTED)
        }
    }
}
