//! Turn anticipation and completion
//!
//! How early to sequence ahead of a course change, and when a turn onto the
//! new leg is complete.

use libm::{fabs, tan};

use super::options::DirectorOptions;
use crate::navigation::geo::{diff_angle, normalize_heading, turn_radius, wind_components};
use crate::navigation::AircraftState;

/// Heading change commanded while a large turn is still in progress (deg)
const TURN_LEAD_ANGLE: f64 = 90.0;

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Distance before the active fix at which the turn onto the next leg
/// should begin (NM)
///
/// The turn-radius lead for `turn_angle` (capped at the max anticipation
/// angle) plus the distance covered while rolling into the bank, computed
/// over the headwind-corrected speed and capped by the speed-dependent
/// anticipation limit.
pub fn anticipation_distance(
    aircraft: &AircraftState,
    turn_angle: f64,
    options: &DirectorOptions,
) -> f64 {
    let headwind = wind_components(
        aircraft.true_heading,
        aircraft.wind_direction,
        aircraft.wind_speed,
    )
    .headwind;
    let speed = aircraft.true_airspeed - headwind;

    let target_bank = sign(turn_angle) * options.max_bank_angle;
    let enter_bank_distance =
        (fabs(target_bank - aircraft.bank_angle) / options.bank_rate) * (speed / 3600.0);

    let angle = options.max_turn_anticipation_angle.min(fabs(turn_angle));
    let lead = turn_radius(speed, options.max_bank_angle) * fabs(tan((angle / 2.0).to_radians()));

    let limit = options
        .max_turn_anticipation_distance
        .at(aircraft.true_airspeed);
    // undefined terms count as zero
    let term = |d: f64| if d.is_nan() { 0.0 } else { d };
    (term(lead) + term(enter_bank_distance)).min(limit)
}

/// Outcome of one turn-completion check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnCompletion {
    /// Turn is finished; resume normal leg tracking
    Complete,
    /// Keep turning toward this true heading
    Continue {
        /// Target true heading
        heading: f64,
    },
}

/// Check whether the turn onto a leg with track `desired_track` is done
///
/// Complete once the heading is within `degrees_rollout` of the track, or
/// immediately when LNAV is not the active lateral mode. Otherwise the
/// heading to hold is 90 degrees ahead of the present heading in the
/// direction of the turn.
pub fn turn_completion(
    true_heading: f64,
    desired_track: f64,
    degrees_rollout: f64,
    lnav_active: bool,
) -> TurnCompletion {
    let remaining = diff_angle(true_heading, desired_track);
    if fabs(remaining) < degrees_rollout || !lnav_active {
        return TurnCompletion::Complete;
    }
    TurnCompletion::Continue {
        heading: normalize_heading(true_heading + sign(remaining) * TURN_LEAD_ANGLE),
    }
}
