//! Route Types
//!
//! Waypoint data and the `FlightPlan` trait through which the guidance
//! director reads and commands the route.
//!
//! # Flight plan contract
//!
//! - The store owns the waypoints; the director only holds copies of the
//!   previous, active and next fix for the duration of one cycle
//! - Every mutation bumps `version()`, which is how the director detects
//!   route edits
//! - Commands are acknowledged synchronously through `Result`
//!
//! [`RouteStorage`] is a fixed-capacity, allocation-free implementation.

mod error;
mod storage;

use bitflags::bitflags;
use heapless::String;

use crate::navigation::GeoPoint;

pub use error::RouteError;
pub use storage::{RouteStorage, MAX_WAYPOINTS};

/// Maximum waypoint identifier length
pub const IDENT_LEN: usize = 8;

bitflags! {
    /// Waypoint attributes relevant to lateral guidance
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WaypointFlags: u8 {
        /// Runway threshold fix
        const RUNWAY = 0b0000_0001;
        /// Must be overflown before turning
        const FLYOVER = 0b0000_0010;
        /// A holding pattern is attached to this fix
        const HOLD = 0b0000_0100;
        /// The route is broken after this fix
        const DISCONTINUITY = 0b0000_1000;
    }
}

/// Procedure segment a waypoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentType {
    /// Departure procedure
    Departure,
    /// Enroute portion
    #[default]
    Enroute,
    /// Arrival procedure
    Arrival,
    /// Approach procedure
    Approach,
    /// Missed approach procedure
    Missed,
}

/// Route waypoint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waypoint {
    /// Identifier (truncated to `IDENT_LEN` characters)
    pub ident: String<IDENT_LEN>,
    /// Fix position
    pub position: GeoPoint,
    /// Guidance attributes
    pub flags: WaypointFlags,
    /// Along-route distance from the first waypoint (NM)
    pub cumulative_distance: f64,
}

impl Waypoint {
    /// Create a waypoint with no flags
    ///
    /// Identifiers longer than `IDENT_LEN` are truncated.
    pub fn new(ident: &str, position: GeoPoint) -> Self {
        let mut id = String::new();
        for c in ident.chars() {
            if id.push(c).is_err() {
                break;
            }
        }
        Self {
            ident: id,
            position,
            flags: WaypointFlags::empty(),
            cumulative_distance: 0.0,
        }
    }

    /// Builder-style flag setter
    pub fn with_flags(mut self, flags: WaypointFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Runway threshold fix
    pub fn is_runway(&self) -> bool {
        self.flags.contains(WaypointFlags::RUNWAY)
    }

    /// Flyover fix
    pub fn is_flyover(&self) -> bool {
        self.flags.contains(WaypointFlags::FLYOVER)
    }

    /// Fix with a holding pattern
    pub fn has_hold(&self) -> bool {
        self.flags.contains(WaypointFlags::HOLD)
    }

    /// Route is broken after this fix
    pub fn ends_in_discontinuity(&self) -> bool {
        self.flags.contains(WaypointFlags::DISCONTINUITY)
    }
}

/// Flight-plan store as seen by the guidance director
pub trait FlightPlan {
    /// Monotonic counter bumped on every route mutation
    fn version(&self) -> u32;

    /// True when a flight plan is loaded and active
    fn has_active_plan(&self) -> bool;

    /// Index of the waypoint currently flown to
    fn active_waypoint_index(&self) -> usize;

    /// Copy of the waypoint at `index`, if any
    fn waypoint(&self, index: usize) -> Option<Waypoint>;

    /// Make `index` the active waypoint
    fn set_active_waypoint_index(&mut self, index: usize) -> Result<(), RouteError>;

    /// Remove the discontinuity after the waypoint at `index`
    fn clear_discontinuity(&mut self, index: usize) -> Result<(), RouteError>;

    /// Destination fix, if one is defined
    fn destination(&self) -> Option<Waypoint>;

    /// Waypoints of the loaded approach, in route order (empty if none)
    fn approach_waypoints(&self) -> &[Waypoint];

    /// Segment the waypoint at `index` belongs to
    fn segment_type(&self, index: usize) -> SegmentType;

    /// Last approach waypoint when it is a runway threshold
    fn runway(&self) -> Option<&Waypoint> {
        self.approach_waypoints().last().filter(|wp| wp.is_runway())
    }
}
