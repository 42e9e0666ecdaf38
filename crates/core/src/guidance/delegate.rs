//! Guidance delegates
//!
//! Holding patterns and localizer tracking are flown by sub-directors that
//! can take over lateral guidance. The director asks them to update and
//! stands down for the cycle whenever one claims guidance.

use crate::navigation::AircraftState;
use crate::route::Waypoint;

/// Delegate state, shared by holds and localizer directors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelegateState {
    /// Not engaged
    #[default]
    Inactive,
    /// Engaged but waiting for its capture condition
    Armed,
    /// Entering (e.g. a hold entry procedure)
    Entering,
    /// Flying the aircraft
    Active,
    /// Finished; guidance returns to the route
    Exited,
}

impl DelegateState {
    /// True when the delegate owns lateral guidance
    pub fn claims_guidance(&self) -> bool {
        matches!(self, DelegateState::Entering | DelegateState::Active)
    }
}

/// Context passed to a delegate on update
#[derive(Debug, Clone, Copy)]
pub struct DelegateContext<'a> {
    /// Index of the active waypoint
    pub active_index: usize,
    /// The active waypoint, if the route has one
    pub active_waypoint: Option<&'a Waypoint>,
    /// Aircraft state this cycle
    pub aircraft: &'a AircraftState,
}

/// A sub-director that may take over lateral guidance
pub trait LateralDelegate {
    /// Run one cycle of the delegate
    fn update(&mut self, ctx: &DelegateContext<'_>);

    /// State after the last update
    fn state(&self) -> DelegateState;
}

/// Holding-pattern director
pub trait HoldsDelegate: LateralDelegate {
    /// True once the hold at the waypoint with `index` has been exited
    fn is_hold_exited(&self, index: usize) -> bool;
}

/// Delegate that never engages, for hosts without holds or localizer support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelegate;

impl LateralDelegate for NoDelegate {
    fn update(&mut self, _ctx: &DelegateContext<'_>) {}

    fn state(&self) -> DelegateState {
        DelegateState::Inactive
    }
}

impl HoldsDelegate for NoDelegate {
    fn is_hold_exited(&self, _index: usize) -> bool {
        false
    }
}
