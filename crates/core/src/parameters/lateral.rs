//! Lateral guidance parameter definitions
//!
//! Maps the persistent `DirectorOptions` fields to parameter store entries.
//! Bank angle, bank rate and rollout are not parameters: they follow the
//! autopilot's max-bank knob every cycle.
//!
//! # Parameters
//!
//! - `LNAV_MIN_TRK` - Leg tracking steers only beyond this distance to the fix (NM)
//! - `LNAV_TA_ANGLE` - Largest course change that is anticipated (deg)
//! - `LNAV_TA_TAS` - TAS separating the two anticipation limits (kt)
//! - `LNAV_TA_DIST_LO` - Anticipation limit below `LNAV_TA_TAS` (NM)
//! - `LNAV_TA_DIST_HI` - Anticipation limit at or above `LNAV_TA_TAS` (NM)
//! - `LNAV_INTCPT_MAX` - Intercept angle cap (deg)
//! - `LNAV_SEQ_MIN_GS` - No sequencing at or below this ground speed (kt)
//! - `LNAV_ACT_AGL` - Armed LNAV activates only above this height (ft)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::guidance::options::{
    AnticipationLimit, DirectorOptions, DEFAULT_ACTIVATION_MIN_AGL,
    DEFAULT_ANTICIPATION_DISTANCE_HIGH, DEFAULT_ANTICIPATION_DISTANCE_LOW,
    DEFAULT_ANTICIPATION_TAS_THRESHOLD, DEFAULT_MAX_INTERCEPT_ANGLE,
    DEFAULT_MAX_TURN_ANTICIPATION_ANGLE, DEFAULT_MIN_SEQUENCING_GROUND_SPEED,
    DEFAULT_MIN_TRACKING_DISTANCE,
};

// --- Ranges ---

const MIN_TRACKING_DISTANCE: f32 = 0.0;
const MAX_TRACKING_DISTANCE: f32 = 10.0;

const MIN_TA_ANGLE: f32 = 0.0;
const MAX_TA_ANGLE: f32 = 180.0;

const MIN_TA_TAS: f32 = 50.0;
const MAX_TA_TAS: f32 = 600.0;

const MIN_TA_DISTANCE: f32 = 0.5;
const MAX_TA_DISTANCE: f32 = 20.0;

const MIN_INTERCEPT: f32 = 5.0;
const MAX_INTERCEPT: f32 = 45.0;

const MIN_SEQ_GS: f32 = 0.0;
const MAX_SEQ_GS: f32 = 100.0;

const MIN_ACT_AGL: f32 = 0.0;
const MAX_ACT_AGL: f32 = 1000.0;

/// Lateral guidance parameters loaded from the parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct LateralParams {
    /// Minimum distance to the active fix for leg tracking to steer (NM)
    pub min_tracking_distance: f32,
    /// Largest anticipated course change (deg)
    pub turn_anticipation_angle: f32,
    /// TAS separating the anticipation limits (kt)
    pub anticipation_tas: f32,
    /// Anticipation limit below `anticipation_tas` (NM)
    pub anticipation_distance_low: f32,
    /// Anticipation limit at or above `anticipation_tas` (NM)
    pub anticipation_distance_high: f32,
    /// Intercept angle cap (deg)
    pub max_intercept_angle: f32,
    /// Minimum ground speed for sequencing (kt)
    pub min_sequencing_ground_speed: f32,
    /// Minimum height for armed activation (ft AGL)
    pub activation_min_agl: f32,
}

impl Default for LateralParams {
    fn default() -> Self {
        Self {
            min_tracking_distance: DEFAULT_MIN_TRACKING_DISTANCE as f32,
            turn_anticipation_angle: DEFAULT_MAX_TURN_ANTICIPATION_ANGLE as f32,
            anticipation_tas: DEFAULT_ANTICIPATION_TAS_THRESHOLD as f32,
            anticipation_distance_low: DEFAULT_ANTICIPATION_DISTANCE_LOW as f32,
            anticipation_distance_high: DEFAULT_ANTICIPATION_DISTANCE_HIGH as f32,
            max_intercept_angle: DEFAULT_MAX_INTERCEPT_ANGLE as f32,
            min_sequencing_ground_speed: DEFAULT_MIN_SEQUENCING_GROUND_SPEED as f32,
            activation_min_agl: DEFAULT_ACTIVATION_MIN_AGL as f32,
        }
    }
}

impl LateralParams {
    /// Register lateral guidance parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();
        let entries = [
            ("LNAV_MIN_TRK", defaults.min_tracking_distance),
            ("LNAV_TA_ANGLE", defaults.turn_anticipation_angle),
            ("LNAV_TA_TAS", defaults.anticipation_tas),
            ("LNAV_TA_DIST_LO", defaults.anticipation_distance_low),
            ("LNAV_TA_DIST_HI", defaults.anticipation_distance_high),
            ("LNAV_INTCPT_MAX", defaults.max_intercept_angle),
            ("LNAV_SEQ_MIN_GS", defaults.min_sequencing_ground_speed),
            ("LNAV_ACT_AGL", defaults.activation_min_agl),
        ];
        for (name, value) in entries {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load lateral guidance parameters from the store, clamped to range
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();
        Self {
            min_tracking_distance: load_float(
                store,
                "LNAV_MIN_TRK",
                defaults.min_tracking_distance,
                MIN_TRACKING_DISTANCE,
                MAX_TRACKING_DISTANCE,
            ),
            turn_anticipation_angle: load_float(
                store,
                "LNAV_TA_ANGLE",
                defaults.turn_anticipation_angle,
                MIN_TA_ANGLE,
                MAX_TA_ANGLE,
            ),
            anticipation_tas: load_float(
                store,
                "LNAV_TA_TAS",
                defaults.anticipation_tas,
                MIN_TA_TAS,
                MAX_TA_TAS,
            ),
            anticipation_distance_low: load_float(
                store,
                "LNAV_TA_DIST_LO",
                defaults.anticipation_distance_low,
                MIN_TA_DISTANCE,
                MAX_TA_DISTANCE,
            ),
            anticipation_distance_high: load_float(
                store,
                "LNAV_TA_DIST_HI",
                defaults.anticipation_distance_high,
                MIN_TA_DISTANCE,
                MAX_TA_DISTANCE,
            ),
            max_intercept_angle: load_float(
                store,
                "LNAV_INTCPT_MAX",
                defaults.max_intercept_angle,
                MIN_INTERCEPT,
                MAX_INTERCEPT,
            ),
            min_sequencing_ground_speed: load_float(
                store,
                "LNAV_SEQ_MIN_GS",
                defaults.min_sequencing_ground_speed,
                MIN_SEQ_GS,
                MAX_SEQ_GS,
            ),
            activation_min_agl: load_float(
                store,
                "LNAV_ACT_AGL",
                defaults.activation_min_agl,
                MIN_ACT_AGL,
                MAX_ACT_AGL,
            ),
        }
    }

    /// Convert to `DirectorOptions`
    ///
    /// Bank fields keep their defaults until the first knob resolution.
    pub fn to_options(&self) -> DirectorOptions {
        DirectorOptions {
            minimum_tracking_distance: f64::from(self.min_tracking_distance),
            max_turn_anticipation_angle: f64::from(self.turn_anticipation_angle),
            max_turn_anticipation_distance: AnticipationLimit {
                tas_threshold: f64::from(self.anticipation_tas),
                low: f64::from(self.anticipation_distance_low),
                high: f64::from(self.anticipation_distance_high),
            },
            max_intercept_angle: f64::from(self.max_intercept_angle),
            min_sequencing_ground_speed: f64::from(self.min_sequencing_ground_speed),
            activation_min_agl_ft: f64::from(self.activation_min_agl),
            ..DirectorOptions::default()
        }
    }

    /// Validate lateral guidance parameters
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f32, min: f32, max: f32| v >= min && v <= max;

        if !in_range(
            self.min_tracking_distance,
            MIN_TRACKING_DISTANCE,
            MAX_TRACKING_DISTANCE,
        ) {
            return false;
        }
        if !in_range(self.turn_anticipation_angle, MIN_TA_ANGLE, MAX_TA_ANGLE) {
            return false;
        }
        if !in_range(self.anticipation_tas, MIN_TA_TAS, MAX_TA_TAS) {
            return false;
        }
        if !in_range(
            self.anticipation_distance_low,
            MIN_TA_DISTANCE,
            MAX_TA_DISTANCE,
        ) || !in_range(
            self.anticipation_distance_high,
            MIN_TA_DISTANCE,
            MAX_TA_DISTANCE,
        ) {
            return false;
        }
        if !in_range(self.max_intercept_angle, MIN_INTERCEPT, MAX_INTERCEPT) {
            return false;
        }
        if !in_range(self.min_sequencing_ground_speed, MIN_SEQ_GS, MAX_SEQ_GS) {
            return false;
        }
        if !in_range(self.activation_min_agl, MIN_ACT_AGL, MAX_ACT_AGL) {
            return false;
        }

        // Faster aircraft never get a shorter anticipation limit
        self.anticipation_distance_high >= self.anticipation_distance_low
    }
}

/// Load a float parameter from store with clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name).and_then(ParamValue::as_f32) {
        Some(v) if !v.is_nan() => v.clamp(min, max),
        _ => default,
    }
}
