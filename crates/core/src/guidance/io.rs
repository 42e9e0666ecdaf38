//! Director inputs and outputs
//!
//! The director is handed all of its collaborators at every update through
//! [`GuidanceIo`]; it keeps no references between cycles.

use super::delegate::{HoldsDelegate, LateralDelegate};
use super::sensitivity::NavSensitivity;
use super::sequencing::SequencingMode;
use crate::mode::ModeSelector;
use crate::route::FlightPlan;

/// Values published for displays and other consumers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Telemetry {
    /// Signed cross-track error, right positive (NM)
    CrossTrack(f64),
    /// Desired track, magnetic (deg)
    DesiredTrack(f64),
    /// Sensitivity category
    NavSensitivity(NavSensitivity),
    /// LPV sensitivity scalar
    SensitivityScalar(f64),
    /// Waypoint sequencing is imminent
    WaypointAlert(bool),
    /// Aircraft is at a route discontinuity
    Discontinuity(bool),
    /// Automatic sequencing mode
    Sequencing(SequencingMode),
}

/// Autopilot course command and telemetry sink
pub trait GuidanceOutput {
    /// Command the autopilot heading bug (magnetic, deg)
    fn set_course(&mut self, magnetic_course: f64);

    /// Publish a telemetry value
    fn publish(&mut self, value: Telemetry);
}

/// Collaborators borrowed for one director update
pub struct GuidanceIo<'a> {
    /// Flight-plan store
    pub route: &'a mut dyn FlightPlan,
    /// Autopilot mode selector
    pub modes: &'a mut dyn ModeSelector,
    /// Holding-pattern director
    pub holds: &'a mut dyn HoldsDelegate,
    /// Localizer director
    pub localizer: &'a mut dyn LateralDelegate,
    /// Actuator and telemetry sink
    pub output: &'a mut dyn GuidanceOutput,
}
