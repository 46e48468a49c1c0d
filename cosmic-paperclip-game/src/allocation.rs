//! Probe work split across replicate / harvest / manufacture.
//!
//! Every stored [`ProbeAllocation`] sums to exactly 100. Raw edits arrive as
//! an [`AllocationDraft`] (slider values may be fractional, negative, or out
//! of range) and pass through [`normalize`] before they are kept.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numbers::{clamp_i64_to_u32, floor_f64_to_i64, i64_to_f64, round_f64_to_i64};

const TOTAL: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Replicate,
    Harvest,
    Manufacture,
}

impl Axis {
    /// Fixed order used for residual distribution.
    pub const ALL: [Self; 3] = [Self::Replicate, Self::Harvest, Self::Manufacture];

    /// The two remaining axes, in canonical order.
    #[must_use]
    pub const fn others(self) -> [Self; 2] {
        match self {
            Self::Replicate => [Self::Harvest, Self::Manufacture],
            Self::Harvest => [Self::Replicate, Self::Manufacture],
            Self::Manufacture => [Self::Replicate, Self::Harvest],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replicate => "replicate",
            Self::Harvest => "harvest",
            Self::Manufacture => "manufacture",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized percentages; the three axes always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProbeAllocation {
    replicate: u32,
    harvest: u32,
    manufacture: u32,
}

impl Default for ProbeAllocation {
    fn default() -> Self {
        Self {
            replicate: 34,
            harvest: 33,
            manufacture: 33,
        }
    }
}

impl ProbeAllocation {
    #[must_use]
    pub const fn replicate(&self) -> u32 {
        self.replicate
    }

    #[must_use]
    pub const fn harvest(&self) -> u32 {
        self.harvest
    }

    #[must_use]
    pub const fn manufacture(&self) -> u32 {
        self.manufacture
    }

    #[must_use]
    pub const fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Replicate => self.replicate,
            Axis::Harvest => self.harvest,
            Axis::Manufacture => self.manufacture,
        }
    }

    /// Share of probe effort on `axis`, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, axis: Axis) -> f64 {
        f64::from(self.get(axis)) / 100.0
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.replicate + self.harvest + self.manufacture
    }
}

/// Deserializing always renormalizes, so a stored allocation can never
/// violate the sum-to-100 rule.
impl<'de> Deserialize<'de> for ProbeAllocation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AllocationDraft::deserialize(deserializer).map(normalize)
    }
}

/// Raw, unvalidated allocation input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationDraft {
    pub replicate: f64,
    pub harvest: f64,
    pub manufacture: f64,
}

impl AllocationDraft {
    #[must_use]
    pub const fn new(replicate: f64, harvest: f64, manufacture: f64) -> Self {
        Self {
            replicate,
            harvest,
            manufacture,
        }
    }
}

impl From<ProbeAllocation> for AllocationDraft {
    fn from(value: ProbeAllocation) -> Self {
        Self {
            replicate: f64::from(value.replicate),
            harvest: f64::from(value.harvest),
            manufacture: f64::from(value.manufacture),
        }
    }
}

fn clamp_percent(value: f64) -> i64 {
    round_f64_to_i64(value).clamp(0, TOTAL)
}

fn from_axes(values: [i64; 3]) -> ProbeAllocation {
    ProbeAllocation {
        replicate: clamp_i64_to_u32(values[0]),
        harvest: clamp_i64_to_u32(values[1]),
        manufacture: clamp_i64_to_u32(values[2]),
    }
}

/// Clamp each axis to `[0, 100]` and rescale so the total is exactly 100.
///
/// A zero total falls back to the default 34/33/33 split. Otherwise each axis
/// is scaled by `100 / sum` and floored, and the residual is handed out one
/// point at a time in replicate, harvest, manufacture order.
#[must_use]
pub fn normalize(raw: AllocationDraft) -> ProbeAllocation {
    let clamped = [
        clamp_percent(raw.replicate),
        clamp_percent(raw.harvest),
        clamp_percent(raw.manufacture),
    ];
    let sum: i64 = clamped.iter().sum();
    if sum == TOTAL {
        return from_axes(clamped);
    }
    if sum == 0 {
        return ProbeAllocation::default();
    }

    let scale = i64_to_f64(TOTAL) / i64_to_f64(sum);
    let mut scaled = clamped.map(|value| floor_f64_to_i64(i64_to_f64(value) * scale));
    let mut residual = TOTAL - scaled.iter().sum::<i64>();
    let mut idx = 0;
    while residual != 0 {
        let step = residual.signum();
        scaled[idx % scaled.len()] += step;
        residual -= step;
        idx += 1;
    }
    from_axes(scaled)
}

/// Set one axis to `value` and share the remainder between the other two in
/// proportion to their previous weights, then renormalize.
///
/// The weight total is floored at 1, so when both other axes were zero the
/// whole remainder lands on the second one.
#[must_use]
pub fn set_axis(current: ProbeAllocation, axis: Axis, value: f64) -> ProbeAllocation {
    let target = clamp_percent(value);
    let remaining = (TOTAL - target).clamp(0, TOTAL);
    let [first_axis, second_axis] = axis.others();

    let first_weight = f64::from(current.get(first_axis));
    let weight_total = (first_weight + f64::from(current.get(second_axis))).max(1.0);
    let share = first_weight / weight_total;
    let first = clamp_percent(share * i64_to_f64(remaining));
    let second = (remaining - first).clamp(0, TOTAL);

    let mut draft = AllocationDraft::default();
    for (slot, amount) in [(axis, target), (first_axis, first), (second_axis, second)] {
        let amount = i64_to_f64(amount);
        match slot {
            Axis::Replicate => draft.replicate = amount,
            Axis::Harvest => draft.harvest = amount,
            Axis::Manufacture => draft.manufacture = amount,
        }
    }
    normalize(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(replicate: u32, harvest: u32, manufacture: u32) -> ProbeAllocation {
        ProbeAllocation {
            replicate,
            harvest,
            manufacture,
        }
    }

    #[test]
    fn exact_sum_passes_through() {
        let out = normalize(AllocationDraft::new(50.0, 25.0, 25.0));
        assert_eq!(out, alloc(50, 25, 25));
    }

    #[test]
    fn zero_sum_uses_default_split() {
        assert_eq!(normalize(AllocationDraft::default()), alloc(34, 33, 33));
        assert_eq!(
            normalize(AllocationDraft::new(-5.0, -1.0, 0.2)),
            alloc(34, 33, 33)
        );
    }

    #[test]
    fn residual_goes_to_replicate_first() {
        // 50/50/50 scales to 33.33 each, floored to 33, residual 1.
        assert_eq!(normalize(AllocationDraft::new(50.0, 50.0, 50.0)), alloc(34, 33, 33));
        // 1/1/1 scales to 33.33, same split.
        assert_eq!(normalize(AllocationDraft::new(1.0, 1.0, 1.0)), alloc(34, 33, 33));
        // 10/10/0 scales to 50/50/0 exactly.
        assert_eq!(normalize(AllocationDraft::new(10.0, 10.0, 0.0)), alloc(50, 50, 0));
    }

    #[test]
    fn out_of_range_axes_are_clamped_first() {
        let out = normalize(AllocationDraft::new(250.0, -40.0, 0.0));
        assert_eq!(out, alloc(100, 0, 0));
        let out = normalize(AllocationDraft::new(99.6, 0.4, 0.0));
        assert_eq!(out, alloc(100, 0, 0));
    }

    #[test]
    fn set_axis_redistributes_proportionally() {
        let out = set_axis(ProbeAllocation::default(), Axis::Harvest, 80.0);
        assert_eq!(out, alloc(10, 80, 10));
        assert_eq!(out.sum(), 100);

        let out = set_axis(alloc(60, 20, 20), Axis::Manufacture, 50.0);
        // remaining 50 split 60:20 → 37.5 rounds to 38, second gets 12
        assert_eq!(out, alloc(38, 12, 50));
    }

    #[test]
    fn set_axis_gives_remainder_to_second_axis_when_others_were_empty() {
        let out = set_axis(alloc(0, 100, 0), Axis::Harvest, 40.0);
        assert_eq!(out, alloc(0, 40, 60));

        let out = set_axis(alloc(100, 0, 0), Axis::Replicate, 25.0);
        assert_eq!(out, alloc(25, 0, 75));
    }

    #[test]
    fn set_axis_clamps_value() {
        let out = set_axis(ProbeAllocation::default(), Axis::Replicate, 140.0);
        assert_eq!(out, alloc(100, 0, 0));
        let out = set_axis(ProbeAllocation::default(), Axis::Replicate, -3.0);
        assert_eq!(out.replicate(), 0);
        assert_eq!(out.sum(), 100);
    }

    #[test]
    fn deserialize_renormalizes() {
        let parsed: ProbeAllocation =
            serde_json::from_str(r#"{"replicate":10,"harvest":10,"manufacture":10}"#).unwrap();
        assert_eq!(parsed, alloc(34, 33, 33));
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, r#"{"replicate":34,"harvest":33,"manufacture":33}"#);
    }
}
