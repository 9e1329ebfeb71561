//! Battle system constants - all tunable values in one place

// Turn gauge
pub const GAUGE_READY: u32 = 100;
pub const GAUGE_RESET_END_TURN: u32 = 0;
pub const GAUGE_RESET_DELAY: u32 = 50;

// Hit chance bounds (percent). No attack is a sure thing or a lost cause.
pub const HIT_CHANCE_MIN: f32 = 3.0;
pub const HIT_CHANCE_MAX: f32 = 97.0;

// Mental stat differential (courage / attunement) scaling for hit and damage
pub const MENTAL_DIFF_SCALE: f32 = 0.25;

// Stat modifiers from movement abilities last this many turns when the
// ability data does not specify a duration
pub const DEFAULT_MODIFIER_DURATION: u32 = 3;

// Expected encounter scale; queries stay in the microsecond range up to this
pub const MAX_ENCOUNTER_WIDTH: u32 = 30;
pub const MAX_ENCOUNTER_HEIGHT: u32 = 20;
