//! Scenario files.
//!
//! A scenario is a JSON description of a route, the aircraft's starting
//! condition, the wind, the autopilot modes and optional `LNAV_*` parameter
//! overrides. [`Scenario::build`] turns it into a ready-to-run [`SitlBridge`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lnav_core::guidance::LnavDirector;
use lnav_core::mode::{ApproachKind, LateralMode};
use lnav_core::navigation::geo::destination_point;
use lnav_core::navigation::GeoPoint;
use lnav_core::parameters::{LateralParams, ParamValue, ParameterError, ParameterStore};
use lnav_core::route::{FlightPlan, RouteStorage, SegmentType, Waypoint, WaypointFlags};

use crate::aircraft::{AircraftConfig, AircraftModel};
use crate::bridge::SitlBridge;
use crate::error::SimulatorError;
use crate::modes::SimModeSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagName {
    Runway,
    Flyover,
    Hold,
    Discontinuity,
}

impl FlagName {
    fn flag(self) -> WaypointFlags {
        match self {
            FlagName::Runway => WaypointFlags::RUNWAY,
            FlagName::Flyover => WaypointFlags::FLYOVER,
            FlagName::Hold => WaypointFlags::HOLD,
            FlagName::Discontinuity => WaypointFlags::DISCONTINUITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentName {
    Departure,
    #[default]
    Enroute,
    Arrival,
    Approach,
    Missed,
}

impl From<SegmentName> for SegmentType {
    fn from(name: SegmentName) -> Self {
        match name {
            SegmentName::Departure => SegmentType::Departure,
            SegmentName::Enroute => SegmentType::Enroute,
            SegmentName::Arrival => SegmentType::Arrival,
            SegmentName::Approach => SegmentType::Approach,
            SegmentName::Missed => SegmentType::Missed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeName {
    #[default]
    None,
    Heading,
    Lnav,
    Approach,
}

impl From<ModeName> for LateralMode {
    fn from(name: ModeName) -> Self {
        match name {
            ModeName::None => LateralMode::None,
            ModeName::Heading => LateralMode::Heading,
            ModeName::Lnav => LateralMode::Lnav,
            ModeName::Approach => LateralMode::Approach,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproachName {
    #[default]
    None,
    Ils,
    Rnav,
    Visual,
}

impl From<ApproachName> for ApproachKind {
    fn from(name: ApproachName) -> Self {
        match name {
            ApproachName::None => ApproachKind::None,
            ApproachName::Ils => ApproachKind::Ils,
            ApproachName::Rnav => ApproachKind::Rnav,
            ApproachName::Visual => ApproachKind::Visual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWaypoint {
    pub ident: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub flags: Vec<FlagName>,
    #[serde(default)]
    pub segment: SegmentName,
}

impl ScenarioWaypoint {
    fn to_waypoint(&self) -> Waypoint {
        let flags = self
            .flags
            .iter()
            .fold(WaypointFlags::empty(), |acc, f| acc | f.flag());
        Waypoint::new(&self.ident, GeoPoint::new(self.latitude, self.longitude)).with_flags(flags)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAircraft {
    pub latitude: f64,
    pub longitude: f64,
    /// True heading (deg).
    pub heading: f64,
    /// True airspeed (kt).
    pub true_airspeed: f64,
    #[serde(default = "default_agl")]
    pub altitude_agl_ft: f64,
    #[serde(default)]
    pub on_ground: bool,
}

fn default_agl() -> f64 {
    3000.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioWind {
    /// Direction the wind blows from, true (deg).
    pub direction: f64,
    /// Speed (kt).
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioModes {
    #[serde(default)]
    pub active: ModeName,
    #[serde(default)]
    pub armed: ModeName,
    #[serde(default)]
    pub approach: ApproachName,
    #[serde(default = "default_max_bank")]
    pub max_bank: f64,
}

fn default_max_bank() -> f64 {
    25.0
}

impl Default for ScenarioModes {
    fn default() -> Self {
        Self {
            active: ModeName::Lnav,
            armed: ModeName::None,
            approach: ApproachName::None,
            max_bank: default_max_bank(),
        }
    }
}

fn default_active_index() -> usize {
    1
}

/// A complete SITL scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub waypoints: Vec<ScenarioWaypoint>,
    #[serde(default = "default_active_index")]
    pub active_index: usize,
    #[serde(default)]
    pub destination: Option<ScenarioWaypoint>,
    pub aircraft: ScenarioAircraft,
    #[serde(default)]
    pub wind: ScenarioWind,
    /// East positive (deg).
    #[serde(default)]
    pub magnetic_variation: f64,
    #[serde(default)]
    pub modes: ScenarioModes,
    /// Turbulence bank noise standard deviation (deg).
    #[serde(default)]
    pub turbulence_deg: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// `LNAV_*` parameter overrides.
    #[serde(default)]
    pub parameters: BTreeMap<String, f32>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SimulatorError> {
        let scenario: Scenario = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, SimulatorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the scenario for values the harness cannot run.
    pub fn validate(&self) -> Result<(), SimulatorError> {
        if self.waypoints.len() < 2 {
            return Err(SimulatorError::InvalidScenario(
                "at least two waypoints are required".to_string(),
            ));
        }
        if self.active_index == 0 || self.active_index >= self.waypoints.len() {
            return Err(SimulatorError::InvalidScenario(format!(
                "active index {} must be in 1..{}",
                self.active_index,
                self.waypoints.len()
            )));
        }
        for wp in self.waypoints.iter().chain(self.destination.iter()) {
            if !GeoPoint::new(wp.latitude, wp.longitude).is_valid() {
                return Err(SimulatorError::InvalidScenario(format!(
                    "waypoint {} has invalid coordinates",
                    wp.ident
                )));
            }
        }
        let start = GeoPoint::new(self.aircraft.latitude, self.aircraft.longitude);
        if !start.is_valid() {
            return Err(SimulatorError::InvalidScenario(
                "aircraft position is invalid".to_string(),
            ));
        }
        if self.aircraft.true_airspeed.is_nan() || self.aircraft.true_airspeed <= 0.0 {
            return Err(SimulatorError::InvalidScenario(
                "true airspeed must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Lateral parameters with the overrides applied.
    pub fn lateral_params(&self) -> Result<LateralParams, SimulatorError> {
        let mut store = ParameterStore::new();
        LateralParams::register_defaults(&mut store)?;
        for (name, value) in &self.parameters {
            store.set(name, ParamValue::Float(*value))?;
        }
        let params = LateralParams::from_store(&store);
        if !params.is_valid() {
            return Err(ParameterError::InvalidConfig.into());
        }
        Ok(params)
    }

    /// Build the route store.
    pub fn route(&self) -> Result<RouteStorage, SimulatorError> {
        let mut route = RouteStorage::new();
        for wp in &self.waypoints {
            route.push(wp.to_waypoint(), wp.segment.into())?;
        }
        route.set_destination(self.destination.as_ref().map(ScenarioWaypoint::to_waypoint));
        route.set_active_waypoint_index(self.active_index)?;
        Ok(route)
    }

    /// Build a bridge ready to run this scenario.
    pub fn build(&self) -> Result<SitlBridge, SimulatorError> {
        self.validate()?;

        let params = self.lateral_params()?;
        let director = LnavDirector::with_options(params.to_options());

        let config = AircraftConfig {
            true_airspeed: self.aircraft.true_airspeed,
            turbulence_deg: self.turbulence_deg,
            seed: self.seed,
            wind_direction: self.wind.direction,
            wind_speed: self.wind.speed,
            magnetic_variation: self.magnetic_variation,
            altitude_agl_ft: self.aircraft.altitude_agl_ft,
            ..AircraftConfig::default()
        };
        let mut aircraft = AircraftModel::new(
            config,
            GeoPoint::new(self.aircraft.latitude, self.aircraft.longitude),
            self.aircraft.heading,
        );
        aircraft.set_on_ground(self.aircraft.on_ground);

        let mut modes = SimModeSelector::new(self.modes.active.into());
        modes.arm(self.modes.armed.into());
        modes.set_approach_kind(self.modes.approach.into());
        modes.set_max_bank_setting(self.modes.max_bank);

        Ok(SitlBridge::new(self.route()?, aircraft)
            .with_director(director)
            .with_modes(modes))
    }

    /// Built-in demo: three 6 NM legs joined by 90 degree turns, starting
    /// 1 NM left of the first leg with LNAV armed.
    pub fn demo() -> Self {
        let origin = GeoPoint::new(47.0, 8.0);
        let alpha = destination_point(&origin, 90.0, 6.0);
        let bravo = destination_point(&alpha, 0.0, 6.0);
        let charlie = destination_point(&bravo, 90.0, 6.0);
        let start = destination_point(&origin, 0.0, 1.0);

        let waypoint = |ident: &str, p: GeoPoint| ScenarioWaypoint {
            ident: ident.to_string(),
            latitude: p.latitude,
            longitude: p.longitude,
            flags: Vec::new(),
            segment: SegmentName::Enroute,
        };

        Self {
            name: "demo".to_string(),
            waypoints: vec![
                waypoint("ORIGIN", origin),
                waypoint("ALPHA", alpha),
                waypoint("BRAVO", bravo),
                waypoint("CHARLIE", charlie),
            ],
            active_index: 1,
            destination: None,
            aircraft: ScenarioAircraft {
                latitude: start.latitude,
                longitude: start.longitude,
                heading: 120.0,
                true_airspeed: 150.0,
                altitude_agl_ft: default_agl(),
                on_ground: false,
            },
            wind: ScenarioWind {
                direction: 330.0,
                speed: 15.0,
            },
            magnetic_variation: 2.0,
            modes: ScenarioModes {
                active: ModeName::Heading,
                armed: ModeName::Lnav,
                ..ScenarioModes::default()
            },
            turbulence_deg: 0.0,
            seed: Some(1),
            parameters: BTreeMap::new(),
        }
    }
}

/// Active waypoint ident for reporting.
pub fn active_ident(route: &RouteStorage) -> String {
    route
        .waypoint(route.active_waypoint_index())
        .map(|wp| wp.ident.as_str().to_string())
        .unwrap_or_default()
}
