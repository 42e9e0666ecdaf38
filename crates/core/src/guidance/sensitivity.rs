//! Nav sensitivity model
//!
//! Classifies the current phase of flight into a sensitivity category that
//! sets the full-scale course deviation, and for LPV approaches derives a
//! scalar that tightens it further as the runway approaches.

use crate::mode::{ApproachKind, LateralMode};
use crate::navigation::geo::distance_nm;
use crate::navigation::GeoPoint;
use crate::route::{FlightPlan, SegmentType, Waypoint};

/// Final approach fix distance at or below which approach sensitivity applies (NM)
pub const APPROACH_SENSITIVITY_DISTANCE: f64 = 3.0;

/// Destination distance at or below which terminal sensitivity applies (NM)
pub const TERMINAL_SENSITIVITY_DISTANCE: f64 = 31.0;

/// Runway distance over which the LPV scalar ramps to 1 (NM)
const LPV_RAMP_DISTANCE: f64 = 7.0;

/// Scalar floor at the runway threshold
const LPV_MIN_SCALAR: f64 = 0.1;

/// Course deviation sensitivity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavSensitivity {
    /// Enroute, 2.0 NM full scale
    #[default]
    Normal,
    /// Terminal area, 1.0 NM full scale
    Terminal,
    /// Terminal area with an RNAV approach loaded
    TerminalLpv,
    /// Final approach, 0.3 NM full scale
    Approach,
    /// RNAV final approach, 0.3 NM scaled down toward the runway
    ApproachLpv,
}

impl NavSensitivity {
    /// Full-scale deflection of the category before LPV scaling (NM)
    pub fn full_scale(&self) -> f64 {
        match self {
            NavSensitivity::Normal => 2.0,
            NavSensitivity::Terminal | NavSensitivity::TerminalLpv => 1.0,
            NavSensitivity::Approach | NavSensitivity::ApproachLpv => 0.3,
        }
    }

    /// Full-scale deflection with the LPV scalar applied (NM)
    ///
    /// The scalar only affects `ApproachLpv`.
    pub fn full_scale_deflection(&self, scalar: f64) -> f64 {
        match self {
            NavSensitivity::ApproachLpv => self.full_scale() * scalar,
            _ => self.full_scale(),
        }
    }

    /// Largest cross-track error at which an armed LNAV may go active (NM)
    pub fn activation_threshold(&self) -> f64 {
        match self {
            NavSensitivity::Normal => 1.9,
            NavSensitivity::Terminal | NavSensitivity::TerminalLpv => 0.9,
            NavSensitivity::Approach | NavSensitivity::ApproachLpv => 0.28,
        }
    }

    /// Annunciator label
    pub fn name(&self) -> &'static str {
        match self {
            NavSensitivity::Normal => "ENR",
            NavSensitivity::Terminal => "TERM",
            NavSensitivity::TerminalLpv => "TERM",
            NavSensitivity::Approach => "APPR",
            NavSensitivity::ApproachLpv => "LPV",
        }
    }
}

/// Everything the sensitivity policy looks at
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensitivityInputs {
    /// Distance to the destination, `None` if unavailable (NM)
    pub destination_distance: Option<f64>,
    /// Distance to the final approach fix, `None` if unavailable (NM)
    pub final_fix_distance: Option<f64>,
    /// Active waypoint is a runway threshold
    pub active_is_runway: bool,
    /// Segment of the active waypoint
    pub segment: SegmentType,
    /// Active lateral mode
    pub lateral_active: LateralMode,
    /// Loaded approach kind
    pub approach_kind: ApproachKind,
}

/// Classify the current sensitivity; first matching rule wins
///
/// Unavailable distances never satisfy a threshold.
pub fn nav_sensitivity(inputs: &SensitivityInputs) -> NavSensitivity {
    let near_final_fix = inputs
        .final_fix_distance
        .is_some_and(|d| d <= APPROACH_SENSITIVITY_DISTANCE);
    let rnav = inputs.approach_kind == ApproachKind::Rnav;

    if (near_final_fix || inputs.active_is_runway) && inputs.segment == SegmentType::Approach {
        if inputs.lateral_active == LateralMode::Approach && rnav {
            return NavSensitivity::ApproachLpv;
        }
        return NavSensitivity::Approach;
    }

    if inputs
        .destination_distance
        .is_some_and(|d| d <= TERMINAL_SENSITIVITY_DISTANCE)
    {
        if rnav {
            return NavSensitivity::TerminalLpv;
        }
        return NavSensitivity::Terminal;
    }

    NavSensitivity::Normal
}

/// LPV sensitivity scalar in [0.1, 1]
///
/// Only `ApproachLpv` is scaled; it ramps linearly from 0.1 at the runway to
/// 1.0 at 7 NM. Without a runway distance the scalar is 1.
pub fn lpv_scalar(sensitivity: NavSensitivity, runway_distance: Option<f64>) -> f64 {
    if sensitivity != NavSensitivity::ApproachLpv {
        return 1.0;
    }
    match runway_distance {
        Some(d) if d.is_finite() => {
            let d = d.max(0.0);
            (LPV_MIN_SCALAR + (d / LPV_RAMP_DISTANCE) * (1.0 - LPV_MIN_SCALAR)).min(1.0)
        }
        _ => 1.0,
    }
}

/// Final approach fix of an approach
///
/// The next-to-last approach waypoint, or the one before it when the
/// next-to-last sits within 3 NM of the runway (step-down fix) and the
/// approach has at least three waypoints.
pub fn final_approach_fix(approach: &[Waypoint]) -> Option<&Waypoint> {
    let len = approach.len();
    if len < 2 {
        return None;
    }
    let runway = &approach[len - 1];
    let fix = &approach[len - 2];
    if runway.cumulative_distance - fix.cumulative_distance < APPROACH_SENSITIVITY_DISTANCE
        && len >= 3
    {
        return Some(&approach[len - 3]);
    }
    Some(fix)
}

/// Gather policy inputs for the waypoint at `active_index`
pub fn sensitivity_inputs(
    route: &dyn FlightPlan,
    active_index: usize,
    position: &GeoPoint,
    lateral_active: LateralMode,
    approach_kind: ApproachKind,
) -> SensitivityInputs {
    let destination_distance = route
        .destination()
        .map(|dest| distance_nm(position, &dest.position));
    let final_fix_distance =
        final_approach_fix(route.approach_waypoints()).map(|fix| distance_nm(position, &fix.position));
    let active_is_runway = route
        .waypoint(active_index)
        .is_some_and(|wp| wp.is_runway());

    SensitivityInputs {
        destination_distance,
        final_fix_distance,
        active_is_runway,
        segment: route.segment_type(active_index),
        lateral_active,
        approach_kind,
    }
}
