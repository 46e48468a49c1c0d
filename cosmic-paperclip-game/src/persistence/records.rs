//! On-disk save shapes.
//!
//! Both versions use camelCase field names so saves stay interchangeable with
//! the browser host. Version 1 kept resources as JSON numbers; version 2 keeps
//! them as decimal strings so values past `f64` survive a round trip.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::allocation::AllocationDraft;
use crate::quantity::Quantity;
use crate::stage::StageId;
use crate::state::{MilestoneFlags, Multipliers};

/// Multipliers as version 1 stored them; either factor may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialMultipliers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveV1 {
    pub version: u32,
    pub stage_id: StageId,
    pub matter: f64,
    pub wire: f64,
    pub clips: f64,
    pub auto_clippers: f64,
    pub mega_clippers: f64,
    #[serde(default)]
    pub wire_harvesters: f64,
    pub probes_unlocked: bool,
    pub probes: f64,
    pub allocation: AllocationDraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_trust: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipliers: Option<PartialMultipliers>,
    pub news: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_flags: Option<BTreeMap<StageId, MilestoneFlags>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveV2 {
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
    pub allocation: AllocationDraft,
    pub trust: u32,
    pub unused_trust: u32,
    pub multipliers: Multipliers,
    pub news: Vec<String>,
    #[serde(default)]
    pub milestone_flags: BTreeMap<StageId, MilestoneFlags>,
}
