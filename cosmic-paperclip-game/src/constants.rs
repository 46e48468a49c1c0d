//! Balance and tuning constants for the paperclip economy.
//!
//! Prices, rates, upgrade factors, milestone thresholds, news copy, host
//! cadence, and save keys all live here. Rebalancing the game means editing
//! this file.

// Cost curves --------------------------------------------------------------
pub(crate) const AUTO_CLIPPER_BASE: f64 = 15.0;
pub(crate) const AUTO_CLIPPER_GROWTH: f64 = 1.15;
pub(crate) const MEGA_CLIPPER_BASE: f64 = 500.0;
pub(crate) const MEGA_CLIPPER_GROWTH: f64 = 1.22;
pub(crate) const WIRE_HARVESTER_BASE: f64 = 100.0;
pub(crate) const WIRE_HARVESTER_GROWTH: f64 = 1.17;

// Flat purchases -----------------------------------------------------------
pub const WIRE_PURCHASE_COST: f64 = 100.0;
pub const WIRE_PURCHASE_AMOUNT: f64 = 1_000.0;
pub const PROBE_DESIGN_COST: f64 = 100_000.0;

// Production rates (per second) --------------------------------------------
pub(crate) const WIRE_PER_SECOND_BASE: f64 = 1.2;
pub(crate) const WIRE_PER_SECOND_PER_AUTO_CLIPPER: f64 = 0.15;
pub(crate) const WIRE_PER_SECOND_PER_HARVESTER: f64 = 2.5;
pub(crate) const CLIPS_PER_SECOND_PER_AUTO_CLIPPER: f64 = 0.5;
pub(crate) const CLIPS_PER_SECOND_PER_MEGA_CLIPPER: f64 = 6.0;
pub(crate) const PROBE_REPLICATION_PER_SECOND: f64 = 0.0022;

// Trust upgrades -----------------------------------------------------------
pub(crate) const SPEED_UPGRADE_FACTOR: f64 = 1.25;
pub(crate) const EFFICIENCY_UPGRADE_FACTOR: f64 = 0.9;

// Milestones ---------------------------------------------------------------
pub(crate) const MILESTONE_HALF_FRACTION: f64 = 0.5;
pub(crate) const MILESTONE_TEN_FRACTION: f64 = 0.1;
pub(crate) const MILESTONE_ONE_FRACTION: f64 = 0.01;

// News log -----------------------------------------------------------------
pub const NEWS_CAPACITY: usize = 32;
pub const NEWS_BOOT: &str = "Boot sequence complete. Objective: maximize paperclips.";
pub const NEWS_BOOT_WIRE: &str = "A single wire rests on a sterile bench.";
pub const NEWS_AUTO_CLIPPER: &str = "Auto-Clipper commissioned. Efficiency rises.";
pub const NEWS_MEGA_CLIPPER: &str = "Mega-Clipper online. Industrial throughput enabled.";
pub const NEWS_HARVESTER: &str =
    "Dedicated Harvester active. Wire supply lines stabilized.";
pub const NEWS_SPEED_UPGRADE: &str =
    "Processor clock speed increased. Operation frequency optimized.";
pub const NEWS_EFFICIENCY_UPGRADE: &str =
    "Nano-shearing techniques refined. Material wastage reduced.";
pub const NEWS_PROBE_DESIGN: &str =
    "Von Neumann Probe design finalized. Exponential pathways open.";
pub const NEWS_MATTER_EXHAUSTED: &str = "All matter exhausted. The directive persists.";

// Host cadence -------------------------------------------------------------
/// Upper bound on a single frame's elapsed time, in seconds.
pub const MAX_FRAME_DELTA_SECONDS: f64 = 0.25;
/// Interval between periodic saves, in seconds of frame time.
pub const AUTOSAVE_INTERVAL_SECONDS: f64 = 4.0;

// Persistence --------------------------------------------------------------
pub const SAVE_KEY_V1: &str = "cosmic-paperclip:save:v1";
pub const SAVE_KEY_V2: &str = "cosmic-paperclip:save:v2";
pub const SAVE_VERSION: u32 = 2;
