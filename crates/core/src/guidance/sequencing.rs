//! Waypoint sequencing policy
//!
//! When to advance the active waypoint, what advancing means for the
//! guidance state, and when to alert the crew that a sequence is imminent.
//! The director applies the decisions; nothing here touches the route.

use libm::fabs;

use crate::navigation::AircraftState;
use crate::route::Waypoint;

/// Seconds of ground travel added to the trigger distance for the alert
const ALERT_LEAD_SECONDS: f64 = 5.0;

/// Fraction of the computed anticipation distance used as the trigger
pub const ANTICIPATION_FACTOR: f64 = 0.9;

/// Guidance state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidanceState {
    /// Following the active leg
    #[default]
    Tracking,
    /// Turning onto a newly activated leg
    TurnCompleting,
    /// Holding heading at a route discontinuity
    InDiscontinuity,
}

/// Automatic sequencing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencingMode {
    /// Waypoints advance automatically
    #[default]
    Auto,
    /// Automatic advancement is blocked
    Inhibit,
}

/// What sequencing past the active waypoint does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAction {
    /// Route breaks here: hold heading, inhibit, keep the active index
    EnterDiscontinuity,
    /// Advance to a runway: advance, inhibit further sequencing
    AdvanceToRunway,
    /// Advance to the next waypoint
    Advance,
}

/// Sequencing trigger that fired this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceTrigger {
    /// Aircraft passed abeam of the active fix
    Abeam,
    /// Aircraft is inside the turn-anticipation distance
    Anticipation,
}

/// Sequencing preconditions: automatic mode, moving, airborne
pub fn can_sequence(mode: SequencingMode, aircraft: &AircraftState, min_ground_speed: f64) -> bool {
    mode == SequencingMode::Auto && aircraft.ground_speed > min_ground_speed && !aircraft.on_ground
}

/// Whether turn anticipation applies to the active waypoint
///
/// Flyover fixes are crossed before turning and the last waypoint has no
/// turn to anticipate.
pub fn anticipates_turn(active: &Waypoint, next: Option<&Waypoint>) -> bool {
    !active.is_flyover() && next.is_some()
}

/// Evaluate the sequencing triggers
///
/// `anticipation_trigger` is `None` when turn anticipation does not apply.
pub fn sequence_trigger(
    abeam: bool,
    distance_to_active: f64,
    anticipation_trigger: Option<f64>,
) -> Option<SequenceTrigger> {
    if abeam {
        return Some(SequenceTrigger::Abeam);
    }
    match anticipation_trigger {
        Some(trigger) if distance_to_active < trigger => Some(SequenceTrigger::Anticipation),
        _ => None,
    }
}

/// Decide what sequencing past `active` does
///
/// `None` when there is nothing to sequence to.
pub fn sequence_action(active: &Waypoint, next: Option<&Waypoint>) -> Option<SequenceAction> {
    if active.ends_in_discontinuity() {
        return Some(SequenceAction::EnterDiscontinuity);
    }
    match next {
        Some(next) if next.is_runway() => Some(SequenceAction::AdvanceToRunway),
        Some(_) => Some(SequenceAction::Advance),
        None => None,
    }
}

/// Waypoint alert: sequencing is about to happen
///
/// On when the distance to the active fix is inside the trigger distance
/// plus five seconds of ground travel, unless sequencing cannot happen.
pub fn waypoint_alert(
    distance_to_active: f64,
    trigger_distance: f64,
    ground_speed: f64,
    state: GuidanceState,
    mode: SequencingMode,
) -> bool {
    let lead = fabs(ground_speed) / 3600.0 * ALERT_LEAD_SECONDS;
    distance_to_active < trigger_distance + lead
        && state != GuidanceState::InDiscontinuity
        && mode != SequencingMode::Inhibit
}
