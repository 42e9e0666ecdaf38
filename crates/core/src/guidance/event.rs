//! Guidance event types
//!
//! Returned from every director update so the host can log, annunciate or
//! forward what happened during the cycle.

use super::sensitivity::NavSensitivity;
use crate::route::RouteError;

/// Maximum guidance events emitted per update cycle.
pub const MAX_GUIDANCE_EVENTS: usize = 8;

/// Events emitted by the guidance director.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuidanceEvent {
    /// Flight-plan version changed (new version)
    FlightPlanChanged(u32),
    /// Sensitivity category changed
    SensitivityChanged(NavSensitivity),
    /// Active waypoint advanced
    Sequenced {
        /// Previous active index
        from: usize,
        /// New active index
        to: usize,
    },
    /// Reached a discontinuity after the waypoint at this index
    EnteredDiscontinuity(usize),
    /// Automatic sequencing was inhibited
    SequencingInhibited,
    /// Automatic sequencing was resumed
    SequencingResumed,
    /// Turn onto the active leg finished
    TurnCompleted,
    /// Holds director owns guidance this cycle
    HoldClaimed,
    /// Localizer director owns guidance this cycle
    LocalizerClaimed,
    /// Armed LNAV activation was requested
    LnavActivationRequested,
    /// The route store rejected a command
    RouteCommandRejected(RouteError),
}
