//! Mode selector trait definition
//!
//! Platform-agnostic interface to the autopilot's mode logic.

use super::state::{ApproachKind, LateralMode, ModeEvent, NavSource};

/// Autopilot mode selector as seen by the guidance director
///
/// Read once or more per cycle; the director never changes modes directly,
/// it only queues [`ModeEvent`]s.
pub trait ModeSelector {
    /// Currently active lateral mode
    fn lateral_active(&self) -> LateralMode;

    /// Currently armed lateral mode
    fn lateral_armed(&self) -> LateralMode;

    /// Kind of the loaded approach
    fn approach_kind(&self) -> ApproachKind;

    /// Source the navigation display is coupled to
    fn nav_source(&self) -> NavSource;

    /// Autopilot max-bank knob setting in degrees
    fn max_bank_setting(&self) -> f64;

    /// Queue an event for the mode logic to process
    fn queue_event(&mut self, event: ModeEvent);
}
