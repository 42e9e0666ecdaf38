//! Route storage
//!
//! Fixed-capacity in-memory flight plan implementing [`FlightPlan`].

use heapless::Vec;

use super::{FlightPlan, RouteError, SegmentType, Waypoint, WaypointFlags};
use crate::navigation::geo::distance_nm;

/// Maximum number of waypoints in a route
pub const MAX_WAYPOINTS: usize = 64;

/// Route storage
///
/// Stores waypoints in a fixed-size array together with the segment each
/// one belongs to. Cumulative distances are maintained on insertion and the
/// version counter is bumped on every mutation.
#[derive(Debug, Clone)]
pub struct RouteStorage {
    waypoints: Vec<Waypoint, MAX_WAYPOINTS>,
    segments: Vec<SegmentType, MAX_WAYPOINTS>,
    active_index: usize,
    destination: Option<Waypoint>,
    /// Inclusive index span of the approach segment
    approach: Option<(usize, usize)>,
    version: u32,
}

impl Default for RouteStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteStorage {
    /// Create a new empty route (const fn for static initialization)
    pub const fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            segments: Vec::new(),
            active_index: 0,
            destination: None,
            approach: None,
            version: 0,
        }
    }

    /// Get number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Check if route is empty
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Clear all waypoints and the destination
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.segments.clear();
        self.active_index = 0;
        self.destination = None;
        self.approach = None;
        self.bump();
    }

    /// Append a waypoint to the route
    ///
    /// The cumulative distance is computed from the previous waypoint.
    /// Approach waypoints must be contiguous; a later approach waypoint
    /// extends the approach span to include everything in between.
    pub fn push(&mut self, mut waypoint: Waypoint, segment: SegmentType) -> Result<(), RouteError> {
        waypoint.cumulative_distance = match self.waypoints.last() {
            Some(prev) => {
                prev.cumulative_distance + distance_nm(&prev.position, &waypoint.position)
            }
            None => 0.0,
        };

        let index = self.waypoints.len();
        self.waypoints
            .push(waypoint)
            .map_err(|_| RouteError::RouteFull)?;
        if self.segments.push(segment).is_err() {
            self.waypoints.pop();
            return Err(RouteError::RouteFull);
        }

        if segment == SegmentType::Approach {
            self.approach = match self.approach {
                Some((start, _)) => Some((start, index)),
                None => Some((index, index)),
            };
        }
        self.bump();
        Ok(())
    }

    /// Set the destination fix
    pub fn set_destination(&mut self, destination: Option<Waypoint>) {
        self.destination = destination;
        self.bump();
    }

    /// Replace the flags of the waypoint at `index`
    pub fn set_flags(&mut self, index: usize, flags: WaypointFlags) -> Result<(), RouteError> {
        let wp = self
            .waypoints
            .get_mut(index)
            .ok_or(RouteError::IndexOutOfRange(index))?;
        wp.flags = flags;
        self.bump();
        Ok(())
    }

    /// Get a waypoint by index
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// Get all waypoints as slice
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl FlightPlan for RouteStorage {
    fn version(&self) -> u32 {
        self.version
    }

    fn has_active_plan(&self) -> bool {
        !self.waypoints.is_empty()
    }

    fn active_waypoint_index(&self) -> usize {
        self.active_index
    }

    fn waypoint(&self, index: usize) -> Option<Waypoint> {
        self.waypoints.get(index).cloned()
    }

    fn set_active_waypoint_index(&mut self, index: usize) -> Result<(), RouteError> {
        if self.waypoints.is_empty() {
            return Err(RouteError::NoActivePlan);
        }
        if index >= self.waypoints.len() {
            return Err(RouteError::IndexOutOfRange(index));
        }
        self.active_index = index;
        self.bump();
        Ok(())
    }

    fn clear_discontinuity(&mut self, index: usize) -> Result<(), RouteError> {
        let wp = self
            .waypoints
            .get_mut(index)
            .ok_or(RouteError::IndexOutOfRange(index))?;
        wp.flags.remove(WaypointFlags::DISCONTINUITY);
        self.bump();
        Ok(())
    }

    fn destination(&self) -> Option<Waypoint> {
        self.destination.clone()
    }

    fn approach_waypoints(&self) -> &[Waypoint] {
        match self.approach {
            Some((start, end)) => &self.waypoints[start..=end],
            None => &[],
        }
    }

    fn segment_type(&self, index: usize) -> SegmentType {
        self.segments.get(index).copied().unwrap_or_default()
    }
}
