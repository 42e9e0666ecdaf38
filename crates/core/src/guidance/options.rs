//! Director options and bank-limit resolution
//!
//! `DirectorOptions` holds the tunables of the guidance director. Most are
//! loaded once from parameters; the bank-related fields are re-derived every
//! cycle from the autopilot's max-bank knob.

use libm::{fabs, tan};

/// Default minimum distance to the active fix for leg tracking to steer (NM)
pub const DEFAULT_MIN_TRACKING_DISTANCE: f64 = 1.0;
/// Default bank limit (deg)
pub const DEFAULT_MAX_BANK_ANGLE: f64 = 30.0;
/// Default bank rate (deg/s)
pub const DEFAULT_BANK_RATE: f64 = 3.0;
/// Default largest course change that is anticipated (deg)
pub const DEFAULT_MAX_TURN_ANTICIPATION_ANGLE: f64 = 110.0;
/// Default TAS separating the two anticipation limits (kt)
pub const DEFAULT_ANTICIPATION_TAS_THRESHOLD: f64 = 350.0;
/// Default anticipation limit below the TAS threshold (NM)
pub const DEFAULT_ANTICIPATION_DISTANCE_LOW: f64 = 7.0;
/// Default anticipation limit at or above the TAS threshold (NM)
pub const DEFAULT_ANTICIPATION_DISTANCE_HIGH: f64 = 10.0;
/// Default heading error below which a turn is considered complete (deg)
pub const DEFAULT_DEGREES_ROLLOUT: f64 = 20.0;
/// Default intercept angle cap (deg)
pub const DEFAULT_MAX_INTERCEPT_ANGLE: f64 = 20.0;
/// Default ground speed below which no waypoint is sequenced (kt)
pub const DEFAULT_MIN_SEQUENCING_GROUND_SPEED: f64 = 25.0;
/// Default height above ground below which an armed LNAV stays armed (ft)
pub const DEFAULT_ACTIVATION_MIN_AGL: f64 = 50.0;

/// Max-bank knob settings and the bank angle each one commands
const BANK_DETENTS: [(f64, f64); 5] = [
    (10.0, 13.0),
    (15.0, 18.0),
    (20.0, 23.0),
    (25.0, 28.0),
    (30.0, 33.0),
];

/// Coordinated turn constant: rate (deg/s) = 1091 * tan(bank) / TAS (kt)
const RATE_OF_TURN_CONSTANT: f64 = 1091.0;

/// Turn-anticipation distance cap as a function of true airspeed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnticipationLimit {
    /// TAS at or above which `high` applies (kt)
    pub tas_threshold: f64,
    /// Limit below the threshold (NM)
    pub low: f64,
    /// Limit at or above the threshold (NM)
    pub high: f64,
}

impl AnticipationLimit {
    /// Limit for the given true airspeed (NM)
    pub fn at(&self, true_airspeed: f64) -> f64 {
        if true_airspeed < self.tas_threshold {
            self.low
        } else {
            self.high
        }
    }
}

impl Default for AnticipationLimit {
    fn default() -> Self {
        Self {
            tas_threshold: DEFAULT_ANTICIPATION_TAS_THRESHOLD,
            low: DEFAULT_ANTICIPATION_DISTANCE_LOW,
            high: DEFAULT_ANTICIPATION_DISTANCE_HIGH,
        }
    }
}

/// Guidance director tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectorOptions {
    /// Leg tracking only steers beyond this distance from the active fix (NM)
    pub minimum_tracking_distance: f64,
    /// Bank limit used for turn radius (deg)
    pub max_bank_angle: f64,
    /// Rate at which bank is established (deg/s)
    pub bank_rate: f64,
    /// Course changes are anticipated up to this angle (deg)
    pub max_turn_anticipation_angle: f64,
    /// Anticipation distance cap
    pub max_turn_anticipation_distance: AnticipationLimit,
    /// Heading error below which a turn is complete (deg)
    pub degrees_rollout: f64,
    /// Intercept angle cap (deg)
    pub max_intercept_angle: f64,
    /// Sequencing is suppressed at or below this ground speed (kt)
    pub min_sequencing_ground_speed: f64,
    /// Armed LNAV activation requires more than this height (ft AGL)
    pub activation_min_agl_ft: f64,
}

impl Default for DirectorOptions {
    fn default() -> Self {
        Self {
            minimum_tracking_distance: DEFAULT_MIN_TRACKING_DISTANCE,
            max_bank_angle: DEFAULT_MAX_BANK_ANGLE,
            bank_rate: DEFAULT_BANK_RATE,
            max_turn_anticipation_angle: DEFAULT_MAX_TURN_ANTICIPATION_ANGLE,
            max_turn_anticipation_distance: AnticipationLimit::default(),
            degrees_rollout: DEFAULT_DEGREES_ROLLOUT,
            max_intercept_angle: DEFAULT_MAX_INTERCEPT_ANGLE,
            min_sequencing_ground_speed: DEFAULT_MIN_SEQUENCING_GROUND_SPEED,
            activation_min_agl_ft: DEFAULT_ACTIVATION_MIN_AGL,
        }
    }
}

impl DirectorOptions {
    /// Re-derive the bank fields from the max-bank knob
    ///
    /// The commanded bank is the detent value for the knob setting, rollout
    /// starts at half of it, and the bank rate is the coordinated rate of
    /// turn at that bank and `true_airspeed`.
    pub fn resolve_bank_knob(&mut self, setting: f64, true_airspeed: f64) {
        let bank = bank_detent(setting);
        self.max_bank_angle = bank;
        self.degrees_rollout = bank / 2.0;
        self.bank_rate = sanitize_rate(rate_of_turn(bank, true_airspeed), DEFAULT_BANK_RATE);
    }
}

/// Bank angle commanded by a max-bank knob setting
///
/// Settings snap to the nearest detent (ties resolve to the lower one), are
/// clamped to the 10..30 range, and a non-finite setting selects 30.
pub fn bank_detent(setting: f64) -> f64 {
    let mut best = BANK_DETENTS[BANK_DETENTS.len() - 1];
    if !setting.is_finite() {
        return best.1;
    }
    let mut best_error = f64::INFINITY;
    for detent in BANK_DETENTS {
        let error = fabs(detent.0 - setting);
        if error < best_error {
            best_error = error;
            best = detent;
        }
    }
    best.1
}

/// Coordinated rate of turn at `bank_angle` and `true_airspeed` (deg/s)
pub fn rate_of_turn(bank_angle: f64, true_airspeed: f64) -> f64 {
    RATE_OF_TURN_CONSTANT * tan(bank_angle.to_radians()) / true_airspeed
}

fn sanitize_rate(value: f64, default: f64) -> f64 {
    if value.is_nan() || value.is_infinite() || value <= 0.0 {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let o = DirectorOptions::default();
        assert!((o.minimum_tracking_distance - 1.0).abs() < 0.001);
        assert!((o.max_bank_angle - 30.0).abs() < 0.001);
        assert!((o.bank_rate - 3.0).abs() < 0.001);
        assert!((o.max_turn_anticipation_angle - 110.0).abs() < 0.001);
        assert!((o.degrees_rollout - 20.0).abs() < 0.001);
        assert!((o.max_intercept_angle - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_anticipation_limit_by_speed() {
        let limit = AnticipationLimit::default();
        assert!((limit.at(120.0) - 7.0).abs() < 0.001);
        assert!((limit.at(349.9) - 7.0).abs() < 0.001);
        assert!((limit.at(350.0) - 10.0).abs() < 0.001);
        assert!((limit.at(450.0) - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_bank_detents_table() {
        assert!((bank_detent(10.0) - 13.0).abs() < 0.001);
        assert!((bank_detent(15.0) - 18.0).abs() < 0.001);
        assert!((bank_detent(20.0) - 23.0).abs() < 0.001);
        assert!((bank_detent(25.0) - 28.0).abs() < 0.001);
        assert!((bank_detent(30.0) - 33.0).abs() < 0.001);
    }

    #[test]
    fn test_bank_detent_off_table_values() {
        assert!((bank_detent(24.0) - 28.0).abs() < 0.001);
        assert!((bank_detent(17.5) - 18.0).abs() < 0.001);
        assert!((bank_detent(0.0) - 13.0).abs() < 0.001);
        assert!((bank_detent(45.0) - 33.0).abs() < 0.001);
        assert!((bank_detent(f64::NAN) - 33.0).abs() < 0.001);
    }

    #[test]
    fn test_rate_of_turn_standard_rate() {
        // ~3 deg/s at 25 deg bank and 150 kt
        let rate = rate_of_turn(25.0, 150.0);
        assert!((rate - 3.39).abs() < 0.01, "rate = {rate}");
    }

    #[test]
    fn test_resolve_bank_knob() {
        let mut o = DirectorOptions::default();
        o.resolve_bank_knob(25.0, 200.0);
        assert!((o.max_bank_angle - 28.0).abs() < 0.001);
        assert!((o.degrees_rollout - 14.0).abs() < 0.001);
        assert!((o.bank_rate - rate_of_turn(28.0, 200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_bank_knob_zero_airspeed_falls_back() {
        let mut o = DirectorOptions::default();
        o.resolve_bank_knob(30.0, 0.0);
        assert!((o.bank_rate - DEFAULT_BANK_RATE).abs() < 0.001);
        o.resolve_bank_knob(30.0, -5.0);
        assert!((o.bank_rate - DEFAULT_BANK_RATE).abs() < 0.001);
    }
}
