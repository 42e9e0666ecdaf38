pub mod time;

use lnav_core::guidance::{GuidanceEvent, GuidanceIo, GuidanceState, LnavDirector, NoDelegate};
use lnav_core::route::{FlightPlan, RouteStorage};
use tracing::{debug, info, warn};

pub use time::{TimeMode, DEFAULT_STEP_US};

use crate::aircraft::AircraftModel;
use crate::error::SimulatorError;
use crate::modes::SimModeSelector;
use crate::recorder::OutputRecorder;

/// Outcome of a `run`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Guidance cycles executed.
    pub cycles: u64,
    /// Simulated time at the end of the run (µs).
    pub sim_time_us: u64,
    /// Waypoint sequences as (from, to) index pairs.
    pub sequences: Vec<(usize, usize)>,
    /// Discontinuities reached.
    pub discontinuities: u32,
    /// Largest absolute cross-track error seen (NM).
    pub max_cross_track: f64,
    /// Active waypoint index at the end of the run.
    pub final_waypoint: usize,
    /// Director state at the end of the run.
    pub final_state: GuidanceState,
}

/// SITL Bridge orchestrator.
///
/// Owns the guidance director, its collaborators and the aircraft model.
/// Each step runs one guidance cycle, applies the course command and
/// integrates the aircraft over the cycle period.
pub struct SitlBridge {
    director: LnavDirector,
    route: RouteStorage,
    modes: SimModeSelector,
    holds: NoDelegate,
    localizer: NoDelegate,
    output: OutputRecorder,
    aircraft: AircraftModel,
    time_mode: TimeMode,
    sim_time_us: u64,
    cycles: u64,
}

impl SitlBridge {
    pub fn new(route: RouteStorage, aircraft: AircraftModel) -> Self {
        Self {
            director: LnavDirector::new(),
            route,
            modes: SimModeSelector::default(),
            holds: NoDelegate,
            localizer: NoDelegate,
            output: OutputRecorder::new(),
            aircraft,
            time_mode: TimeMode::default(),
            sim_time_us: 0,
            cycles: 0,
        }
    }

    /// Replace the director (e.g. one built from parameters).
    pub fn with_director(mut self, director: LnavDirector) -> Self {
        self.director = director;
        self
    }

    /// Replace the mode selector.
    pub fn with_modes(mut self, modes: SimModeSelector) -> Self {
        self.modes = modes;
        self
    }

    // -- Simulation control --

    /// Run one guidance cycle and advance the simulation by one step.
    pub fn step(&mut self) -> Vec<GuidanceEvent> {
        let state = self.aircraft.state();
        let mut io = GuidanceIo {
            route: &mut self.route,
            modes: &mut self.modes,
            holds: &mut self.holds,
            localizer: &mut self.localizer,
            output: &mut self.output,
        };
        let events = self.director.update(&state, &mut io);
        for event in &events {
            log_event(event);
        }

        if let Some(course) = self.output.take_course() {
            debug!(
                course,
                xtk = ?self.output.telemetry().cross_track,
                "course command"
            );
            self.aircraft.command_course(course);
        }

        let step_us = self.time_mode.step_size_us();
        self.aircraft.integrate(step_us as f64 / 1_000_000.0);
        self.sim_time_us += step_us;
        self.cycles += 1;

        events.into_iter().collect()
    }

    /// Run `steps` cycles, paced according to the time mode.
    pub async fn run(&mut self, steps: u64) -> Result<RunSummary, SimulatorError> {
        let period = self.time_mode.wall_period()?;
        let mut interval = period.map(tokio::time::interval);
        let mut summary = RunSummary::default();

        info!(steps, mode = ?self.time_mode, "run started");
        for _ in 0..steps {
            match interval.as_mut() {
                Some(interval) => {
                    interval.tick().await;
                }
                None => tokio::task::yield_now().await,
            }

            for event in self.step() {
                match event {
                    GuidanceEvent::Sequenced { from, to } => summary.sequences.push((from, to)),
                    GuidanceEvent::EnteredDiscontinuity(_) => summary.discontinuities += 1,
                    _ => {}
                }
            }
            if let Some(xtk) = self.output.telemetry().cross_track {
                summary.max_cross_track = summary.max_cross_track.max(xtk.abs());
            }
        }

        summary.cycles = steps;
        summary.sim_time_us = self.sim_time_us;
        summary.final_waypoint = self.route.active_waypoint_index();
        summary.final_state = self.director.state();
        info!(
            cycles = summary.cycles,
            sequences = summary.sequences.len(),
            waypoint = summary.final_waypoint,
            "run finished"
        );
        Ok(summary)
    }

    /// Pilot command: resume automatic sequencing.
    pub fn resume_sequencing(&mut self) -> Vec<GuidanceEvent> {
        let events = self
            .director
            .set_auto_sequencing(&mut self.route, &mut self.output);
        for event in &events {
            log_event(event);
        }
        events.into_iter().collect()
    }

    /// Pilot command: inhibit automatic sequencing.
    pub fn inhibit_sequencing(&mut self) -> Vec<GuidanceEvent> {
        let events = self.director.set_inhibit_sequencing(&mut self.output);
        for event in &events {
            log_event(event);
        }
        events.into_iter().collect()
    }

    /// Set the time synchronization mode.
    pub fn set_time_mode(&mut self, mode: TimeMode) {
        self.time_mode = mode;
    }

    pub fn time_mode(&self) -> &TimeMode {
        &self.time_mode
    }

    /// Get the current simulation time in microseconds.
    pub fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // -- Accessors --

    pub fn director(&self) -> &LnavDirector {
        &self.director
    }

    pub fn route(&self) -> &RouteStorage {
        &self.route
    }

    /// Mutable route access for in-flight edits.
    pub fn route_mut(&mut self) -> &mut RouteStorage {
        &mut self.route
    }

    pub fn modes(&self) -> &SimModeSelector {
        &self.modes
    }

    pub fn modes_mut(&mut self) -> &mut SimModeSelector {
        &mut self.modes
    }

    pub fn output(&self) -> &OutputRecorder {
        &self.output
    }

    pub fn aircraft(&self) -> &AircraftModel {
        &self.aircraft
    }

    pub fn aircraft_mut(&mut self) -> &mut AircraftModel {
        &mut self.aircraft
    }
}

fn log_event(event: &GuidanceEvent) {
    match event {
        GuidanceEvent::Sequenced { from, to } => info!(from, to, "waypoint sequenced"),
        GuidanceEvent::EnteredDiscontinuity(index) => {
            warn!(index, "route discontinuity, holding heading")
        }
        GuidanceEvent::RouteCommandRejected(e) => warn!(error = %e, "route command rejected"),
        GuidanceEvent::SensitivityChanged(s) => info!(sensitivity = s.name(), "nav sensitivity"),
        GuidanceEvent::FlightPlanChanged(version) => debug!(version, "flight plan changed"),
        other => info!(event = ?other, "guidance event"),
    }
}
