//! Route error types
//!
//! Errors a flight-plan store reports when rejecting a route command.

/// Errors from flight-plan commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Waypoint index outside the route
    IndexOutOfRange(usize),
    /// Route storage is full
    RouteFull,
    /// No flight plan is active
    NoActivePlan,
}

impl core::fmt::Display for RouteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RouteError::IndexOutOfRange(index) => {
                write!(f, "waypoint index {} out of range", index)
            }
            RouteError::RouteFull => write!(f, "route storage full"),
            RouteError::NoActivePlan => write!(f, "no active flight plan"),
        }
    }
}
