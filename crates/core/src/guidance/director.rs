//! Lateral guidance director
//!
//! Once per cycle the director reconciles route edits, resolves the bank
//! limit, classifies nav sensitivity, offers guidance to the holds and
//! localizer directors, and otherwise sequences waypoints and steers the
//! active leg through the autopilot heading bug.
//!
//! The director does not know about displays, sensors or the flight-plan
//! database. All collaborators are borrowed for the duration of one
//! [`LnavDirector::update`] through [`GuidanceIo`].

use heapless::Vec;
use libm::fabs;

use super::delegate::DelegateContext;
use super::event::{GuidanceEvent, MAX_GUIDANCE_EVENTS};
use super::io::{GuidanceIo, GuidanceOutput, Telemetry};
use super::options::DirectorOptions;
use super::sensitivity::{lpv_scalar, nav_sensitivity, sensitivity_inputs, NavSensitivity};
use super::sequencing::{
    anticipates_turn, can_sequence, sequence_action, sequence_trigger, waypoint_alert,
    GuidanceState, SequenceAction, SequencingMode, ANTICIPATION_FACTOR,
};
use super::turn::{anticipation_distance, turn_completion, TurnCompletion};
use crate::mode::{ApproachKind, LateralMode, ModeEvent};
use crate::navigation::geo::{
    cross_track, desired_track, diff_angle, distance_nm, initial_bearing, intercept_angle,
    is_abeam, normalize_heading, true_to_magnetic, wind_correction_angle,
};
use crate::navigation::AircraftState;
use crate::route::{FlightPlan, Waypoint};

/// Which delegate owned guidance on the last cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delegation {
    Hold,
    Localizer,
}

/// Lateral guidance director
pub struct LnavDirector {
    options: DirectorOptions,
    state: GuidanceState,
    sequencing: SequencingMode,
    /// Last flight-plan version reconciled (`None` before the first cycle)
    flight_plan_version: Option<u32>,
    /// Cross-track error of the previous leg-tracking pass (NM)
    previous_deviation: f64,
    sensitivity: NavSensitivity,
    sensitivity_scalar: f64,
    discontinuity: bool,
    delegation: Option<Delegation>,
}

impl Default for LnavDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl LnavDirector {
    /// Create a director with default options
    pub fn new() -> Self {
        Self::with_options(DirectorOptions::default())
    }

    /// Create a director with the given options
    pub fn with_options(options: DirectorOptions) -> Self {
        Self {
            options,
            state: GuidanceState::Tracking,
            sequencing: SequencingMode::Auto,
            flight_plan_version: None,
            previous_deviation: 0.0,
            sensitivity: NavSensitivity::Normal,
            sensitivity_scalar: 1.0,
            discontinuity: false,
            delegation: None,
        }
    }

    /// Current guidance state
    pub fn state(&self) -> GuidanceState {
        self.state
    }

    /// Current sequencing mode
    pub fn sequencing_mode(&self) -> SequencingMode {
        self.sequencing
    }

    /// Sensitivity computed on the last cycle
    pub fn nav_sensitivity(&self) -> NavSensitivity {
        self.sensitivity
    }

    /// LPV scalar computed on the last cycle
    pub fn sensitivity_scalar(&self) -> f64 {
        self.sensitivity_scalar
    }

    /// True while stopped at a route discontinuity
    pub fn is_in_discontinuity(&self) -> bool {
        self.discontinuity
    }

    /// Options in effect, including the bank fields resolved last cycle
    pub fn options(&self) -> &DirectorOptions {
        &self.options
    }

    /// Replace the options (bank fields are re-resolved every cycle)
    pub fn set_options(&mut self, options: DirectorOptions) {
        self.options = options;
    }

    /// Run one guidance cycle.
    pub fn update(
        &mut self,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
    ) -> Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS> {
        let mut events = Vec::new();

        let version = io.route.version();
        if self.flight_plan_version != Some(version) {
            self.handle_flight_plan_changed(version, io, &mut events);
        }

        if !io.route.has_active_plan() {
            self.delegation = None;
            return events;
        }

        self.options
            .resolve_bank_knob(io.modes.max_bank_setting(), aircraft.true_airspeed);
        io.output.publish(Telemetry::Sequencing(self.sequencing));

        let index = io.route.active_waypoint_index();
        let active = io.route.waypoint(index);
        self.update_sensitivity(index, aircraft, io, &mut events);

        if self.delegate_to_holds(index, active.as_ref(), aircraft, io) {
            self.note_delegation(Delegation::Hold, &mut events);
            return events;
        }

        let previous = index.checked_sub(1).and_then(|i| io.route.waypoint(i));
        match (previous, active) {
            (Some(previous), Some(active)) => {
                self.generate_guidance(index, &previous, &active, aircraft, io, &mut events);
            }
            _ => self.delegation = None,
        }

        events
    }

    /// Resume automatic sequencing.
    ///
    /// Leaving a discontinuity, or sequencing past a runway, advances the
    /// active waypoint and clears the discontinuity behind it. If the route
    /// rejects the advance, guidance and sequencing are left unchanged.
    pub fn set_auto_sequencing(
        &mut self,
        route: &mut dyn FlightPlan,
        output: &mut dyn GuidanceOutput,
    ) -> Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS> {
        let mut events = Vec::new();
        let index = route.active_waypoint_index();
        let active_is_runway = route.waypoint(index).is_some_and(|wp| wp.is_runway());

        if self.state == GuidanceState::InDiscontinuity || active_is_runway {
            // Nothing to advance to: guidance stays where it is
            if let Err(e) = route.set_active_waypoint_index(index + 1) {
                let _ = events.push(GuidanceEvent::RouteCommandRejected(e));
                return events;
            }
            self.state = GuidanceState::Tracking;
            self.set_discontinuity(false, output);
            let _ = events.push(GuidanceEvent::Sequenced {
                from: index,
                to: index + 1,
            });
            if let Err(e) = route.clear_discontinuity(index) {
                let _ = events.push(GuidanceEvent::RouteCommandRejected(e));
            }
        }

        self.set_sequencing(SequencingMode::Auto, &mut events);
        output.publish(Telemetry::Sequencing(self.sequencing));
        events
    }

    /// Block automatic sequencing until resumed.
    pub fn set_inhibit_sequencing(
        &mut self,
        output: &mut dyn GuidanceOutput,
    ) -> Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS> {
        let mut events = Vec::new();
        self.set_sequencing(SequencingMode::Inhibit, &mut events);
        output.publish(Telemetry::Sequencing(self.sequencing));
        events
    }

    // ------------------------------------------------------------------------
    // Cycle steps
    // ------------------------------------------------------------------------

    fn handle_flight_plan_changed(
        &mut self,
        version: u32,
        io: &mut GuidanceIo<'_>,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        let active = io.route.waypoint(io.route.active_waypoint_index());

        if self.sequencing == SequencingMode::Inhibit
            && !active.as_ref().is_some_and(|wp| wp.is_runway())
        {
            self.set_sequencing(SequencingMode::Auto, events);
        }

        // TurnCompleting is kept: sequencing itself changes the version.
        if self.state == GuidanceState::InDiscontinuity
            && !active.as_ref().is_some_and(|wp| wp.ends_in_discontinuity())
        {
            self.state = GuidanceState::Tracking;
            self.set_discontinuity(false, io.output);
        }

        io.output.publish(Telemetry::WaypointAlert(false));
        self.flight_plan_version = Some(version);
        let _ = events.push(GuidanceEvent::FlightPlanChanged(version));
    }

    fn update_sensitivity(
        &mut self,
        index: usize,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        let inputs = sensitivity_inputs(
            &*io.route,
            index,
            &aircraft.position,
            io.modes.lateral_active(),
            io.modes.approach_kind(),
        );
        let sensitivity = nav_sensitivity(&inputs);
        if sensitivity != self.sensitivity {
            let _ = events.push(GuidanceEvent::SensitivityChanged(sensitivity));
        }
        self.sensitivity = sensitivity;

        let runway_distance = io
            .route
            .runway()
            .map(|rw| distance_nm(&aircraft.position, &rw.position));
        self.sensitivity_scalar = lpv_scalar(sensitivity, runway_distance);

        io.output.publish(Telemetry::NavSensitivity(sensitivity));
        io.output
            .publish(Telemetry::SensitivityScalar(self.sensitivity_scalar));
    }

    fn delegate_to_holds(
        &mut self,
        index: usize,
        active: Option<&Waypoint>,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
    ) -> bool {
        let Some(waypoint) = active else {
            return false;
        };
        if !waypoint.has_hold() {
            return false;
        }
        let exited = index
            .checked_sub(1)
            .is_some_and(|prev| io.holds.is_hold_exited(prev));
        if exited {
            return false;
        }

        io.holds.update(&DelegateContext {
            active_index: index,
            active_waypoint: active,
            aircraft,
        });
        io.holds.state().claims_guidance()
    }

    fn delegate_to_localizer(
        &mut self,
        index: usize,
        active: &Waypoint,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
    ) -> bool {
        let approach_mode = io.modes.lateral_armed() == LateralMode::Approach
            || io.modes.lateral_active() == LateralMode::Approach;
        let localizer_source =
            io.modes.approach_kind() == ApproachKind::Ils || io.modes.nav_source().is_radio();
        if !(approach_mode && localizer_source) {
            return false;
        }

        io.localizer.update(&DelegateContext {
            active_index: index,
            active_waypoint: Some(active),
            aircraft,
        });
        io.localizer.state().claims_guidance()
    }

    fn generate_guidance(
        &mut self,
        index: usize,
        previous: &Waypoint,
        active: &Waypoint,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        let next = io.route.waypoint(index + 1);
        let position = &aircraft.position;

        let dtk = desired_track(&previous.position, &active.position);
        let xtk = cross_track(&previous.position, &active.position, position);
        let distance = distance_nm(position, &active.position);
        let abeam = is_abeam(dtk, position, &active.position);

        let anticipation = if anticipates_turn(active, next.as_ref()) {
            let to_active = initial_bearing(position, &active.position);
            let next_track = next
                .as_ref()
                .map_or(to_active, |n| initial_bearing(&active.position, &n.position));
            let turn = diff_angle(to_active, next_track);
            Some(anticipation_distance(aircraft, turn, &self.options) * ANTICIPATION_FACTOR)
        } else {
            None
        };

        io.output.publish(Telemetry::WaypointAlert(waypoint_alert(
            distance,
            anticipation.unwrap_or(0.0),
            aircraft.ground_speed,
            self.state,
            self.sequencing,
        )));

        // Past or turning at the fix: the last course holds until the route moves on
        if sequence_trigger(abeam, distance, anticipation).is_some() {
            self.sequence_to_next(index, active, next.as_ref(), aircraft, io, events);
            self.delegation = None;
            return;
        }

        if self.delegate_to_localizer(index, active, aircraft, io) {
            self.note_delegation(Delegation::Localizer, events);
            return;
        }
        self.delegation = None;

        self.try_activate_if_armed(xtk, aircraft, io, events);

        match self.state {
            GuidanceState::Tracking => {
                let active_mode = io.modes.lateral_active();
                let lnav_coupled = active_mode == LateralMode::Lnav
                    || (active_mode == LateralMode::Approach
                        && io.modes.approach_kind() == ApproachKind::Rnav);
                let execute = distance > self.options.minimum_tracking_distance && lnav_coupled;
                self.track_leg(active, dtk, xtk, aircraft, execute, io.output);
            }
            GuidanceState::TurnCompleting => {
                let lnav_active = io.modes.lateral_active() == LateralMode::Lnav;
                match turn_completion(
                    aircraft.true_heading,
                    dtk,
                    self.options.degrees_rollout,
                    lnav_active,
                ) {
                    TurnCompletion::Complete => {
                        self.state = GuidanceState::Tracking;
                        let _ = events.push(GuidanceEvent::TurnCompleted);
                    }
                    TurnCompletion::Continue { heading } => {
                        self.track_leg(active, dtk, xtk, aircraft, false, io.output);
                        self.command_course(heading, aircraft, io.output);
                    }
                }
            }
            GuidanceState::InDiscontinuity => {}
        }
    }

    /// Apply the sequencing decision, if sequencing is allowed
    fn sequence_to_next(
        &mut self,
        index: usize,
        active: &Waypoint,
        next: Option<&Waypoint>,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        if !can_sequence(
            self.sequencing,
            aircraft,
            self.options.min_sequencing_ground_speed,
        ) {
            return;
        }
        let Some(action) = sequence_action(active, next) else {
            return;
        };

        match action {
            SequenceAction::EnterDiscontinuity => {
                self.state = GuidanceState::InDiscontinuity;
                self.set_discontinuity(true, io.output);
                self.set_sequencing(SequencingMode::Inhibit, events);
                self.command_course(aircraft.true_heading, aircraft, io.output);
                io.output.publish(Telemetry::WaypointAlert(false));
                let _ = events.push(GuidanceEvent::EnteredDiscontinuity(index));
            }
            SequenceAction::AdvanceToRunway | SequenceAction::Advance => {
                if let Err(e) = io.route.set_active_waypoint_index(index + 1) {
                    let _ = events.push(GuidanceEvent::RouteCommandRejected(e));
                    return;
                }
                if action == SequenceAction::AdvanceToRunway {
                    self.set_sequencing(SequencingMode::Inhibit, events);
                }
                self.state = GuidanceState::TurnCompleting;
                let _ = events.push(GuidanceEvent::Sequenced {
                    from: index,
                    to: index + 1,
                });
            }
        }
    }

    fn try_activate_if_armed(
        &mut self,
        xtk: f64,
        aircraft: &AircraftState,
        io: &mut GuidanceIo<'_>,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        let armed = io.modes.lateral_armed();
        let route_armed = armed == LateralMode::Lnav
            || (armed == LateralMode::Approach && io.modes.approach_kind() == ApproachKind::Rnav);
        if !route_armed
            || aircraft.on_ground
            || aircraft.altitude_agl_ft <= self.options.activation_min_agl_ft
        {
            return;
        }

        if fabs(xtk) < self.sensitivity.activation_threshold() {
            io.modes.queue_event(ModeEvent::LnavActive);
            let _ = events.push(GuidanceEvent::LnavActivationRequested);
        }
    }

    /// Steer onto and along the leg ending at `active`
    ///
    /// Publishes deviation telemetry and updates the previous deviation
    /// whether or not the course is issued.
    fn track_leg(
        &mut self,
        active: &Waypoint,
        dtk: f64,
        xtk: f64,
        aircraft: &AircraftState,
        execute: bool,
        output: &mut dyn GuidanceOutput,
    ) {
        output.publish(Telemetry::CrossTrack(xtk));
        output.publish(Telemetry::DesiredTrack(true_to_magnetic(
            dtk,
            aircraft.magnetic_variation,
        )));

        let intercept = intercept_angle(
            xtk,
            self.sensitivity.full_scale(),
            self.options.max_intercept_angle,
        );
        let bearing_to_fix = initial_bearing(&aircraft.position, &active.position);
        let off_track = fabs(diff_angle(dtk, bearing_to_fix));

        let closure = self.previous_deviation - xtk;
        let intercept_rate = if self.previous_deviation > 0.0 {
            closure.max(0.0)
        } else {
            -closure.min(0.0)
        };

        let full_scale = self
            .sensitivity
            .full_scale_deflection(self.sensitivity_scalar);
        let rate_scalar = if fabs(xtk) < full_scale / 2.0 {
            1.0 - (intercept_rate / (full_scale / 10.0)).min(1.0)
        } else {
            1.0
        };

        let course = if off_track < fabs(intercept) {
            normalize_heading(dtk + intercept * rate_scalar)
        } else {
            bearing_to_fix
        };

        self.previous_deviation = xtk;
        if execute {
            self.command_course(course, aircraft, output);
        }
    }

    /// Issue a true course to the autopilot, wind and variation corrected
    fn command_course(&self, course: f64, aircraft: &AircraftState, output: &mut dyn GuidanceOutput) {
        let wca = wind_correction_angle(
            course,
            aircraft.true_airspeed,
            aircraft.wind_direction,
            aircraft.wind_speed,
        );
        let heading = normalize_heading(course - wca);
        output.set_course(true_to_magnetic(heading, aircraft.magnetic_variation));
    }

    // ------------------------------------------------------------------------
    // State helpers
    // ------------------------------------------------------------------------

    fn set_sequencing(
        &mut self,
        mode: SequencingMode,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        if self.sequencing == mode {
            return;
        }
        self.sequencing = mode;
        let event = match mode {
            SequencingMode::Auto => GuidanceEvent::SequencingResumed,
            SequencingMode::Inhibit => GuidanceEvent::SequencingInhibited,
        };
        let _ = events.push(event);
    }

    fn set_discontinuity(&mut self, active: bool, output: &mut dyn GuidanceOutput) {
        self.discontinuity = active;
        output.publish(Telemetry::Discontinuity(active));
    }

    fn note_delegation(
        &mut self,
        delegation: Delegation,
        events: &mut Vec<GuidanceEvent, MAX_GUIDANCE_EVENTS>,
    ) {
        if self.delegation != Some(delegation) {
            let event = match delegation {
                Delegation::Hold => GuidanceEvent::HoldClaimed,
                Delegation::Localizer => GuidanceEvent::LocalizerClaimed,
            };
            let _ = events.push(event);
        }
        self.delegation = Some(delegation);
    }
}
