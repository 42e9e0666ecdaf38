use lnav_core::mode::{ApproachKind, LateralMode, ModeSelector};
use lnav_core::parameters::ParameterError;
use lnav_core::route::FlightPlan;
use lnav_sitl::{Scenario, SimulatorError};

const MINIMAL: &str = r#"{
    "name": "minimal",
    "waypoints": [
        { "ident": "ORIGIN", "latitude": 47.0, "longitude": 8.0 },
        { "ident": "ALPHA", "latitude": 47.0, "longitude": 8.1, "flags": ["flyover"] }
    ],
    "aircraft": { "latitude": 47.0, "longitude": 8.0, "heading": 90.0, "true_airspeed": 120.0 }
}"#;

fn with_parameter(name: &str, value: f32) -> Scenario {
    let mut scenario = Scenario::from_json(MINIMAL).unwrap();
    scenario.parameters.insert(name.to_string(), value);
    scenario
}

#[test]
fn parse_fills_defaults() {
    let scenario = Scenario::from_json(MINIMAL).unwrap();

    assert_eq!(scenario.name, "minimal");
    assert_eq!(scenario.active_index, 1);
    assert!(scenario.destination.is_none());
    assert_eq!(scenario.aircraft.altitude_agl_ft, 3000.0);
    assert!(!scenario.aircraft.on_ground);
    assert_eq!(scenario.wind.speed, 0.0);
    assert_eq!(scenario.modes.max_bank, 25.0);
    assert!(scenario.parameters.is_empty());
}

#[test]
fn build_wires_route_and_modes() {
    let json = r#"{
        "name": "approach",
        "waypoints": [
            { "ident": "IAF", "latitude": 47.0, "longitude": 8.0, "segment": "approach" },
            { "ident": "FAF", "latitude": 47.0, "longitude": 8.1, "segment": "approach" },
            { "ident": "RW27", "latitude": 47.0, "longitude": 8.2, "flags": ["runway"], "segment": "approach" }
        ],
        "destination": { "ident": "LSZH", "latitude": 47.0, "longitude": 8.21 },
        "aircraft": { "latitude": 47.0, "longitude": 7.95, "heading": 90.0, "true_airspeed": 110.0 },
        "modes": { "active": "heading", "armed": "approach", "approach": "rnav", "max_bank": 20.0 }
    }"#;
    let scenario = Scenario::from_json(json).unwrap();
    let bridge = scenario.build().unwrap();

    let route = bridge.route();
    assert_eq!(route.len(), 3);
    assert_eq!(route.active_waypoint_index(), 1);
    assert!(route.get(2).unwrap().is_runway());
    assert_eq!(route.destination().unwrap().ident.as_str(), "LSZH");
    assert_eq!(route.approach_waypoints().len(), 3);

    let modes = bridge.modes();
    assert_eq!(modes.lateral_active(), LateralMode::Heading);
    assert_eq!(modes.lateral_armed(), LateralMode::Approach);
    assert_eq!(modes.approach_kind(), ApproachKind::Rnav);
    assert_eq!(modes.max_bank_setting(), 20.0);
}

#[test]
fn invalid_scenarios_rejected() {
    let mut one_waypoint = Scenario::from_json(MINIMAL).unwrap();
    one_waypoint.waypoints.truncate(1);
    assert!(matches!(
        one_waypoint.validate(),
        Err(SimulatorError::InvalidScenario(_))
    ));

    let mut bad_index = Scenario::from_json(MINIMAL).unwrap();
    bad_index.active_index = 0;
    assert!(matches!(
        bad_index.build(),
        Err(SimulatorError::InvalidScenario(_))
    ));
    bad_index.active_index = 2;
    assert!(matches!(
        bad_index.validate(),
        Err(SimulatorError::InvalidScenario(_))
    ));

    let mut bad_position = Scenario::from_json(MINIMAL).unwrap();
    bad_position.waypoints[1].latitude = 95.0;
    assert!(matches!(
        bad_position.validate(),
        Err(SimulatorError::InvalidScenario(_))
    ));

    let mut parked = Scenario::from_json(MINIMAL).unwrap();
    parked.aircraft.true_airspeed = 0.0;
    assert!(matches!(
        parked.validate(),
        Err(SimulatorError::InvalidScenario(_))
    ));
}

#[test]
fn parameter_override_reaches_director() {
    let bridge = with_parameter("LNAV_INTCPT_MAX", 30.0).build().unwrap();
    assert_eq!(bridge.director().options().max_intercept_angle, 30.0);

    // out-of-range values are clamped on load
    let bridge = with_parameter("LNAV_INTCPT_MAX", 90.0).build().unwrap();
    assert_eq!(bridge.director().options().max_intercept_angle, 45.0);

    let bridge = Scenario::from_json(MINIMAL).unwrap().build().unwrap();
    assert_eq!(bridge.director().options().max_intercept_angle, 20.0);
}

#[test]
fn unknown_parameter_rejected() {
    let result = with_parameter("LNAV_BOGUS", 1.0).build();
    assert!(matches!(
        result,
        Err(SimulatorError::Parameter(ParameterError::InvalidConfig))
    ));
}

#[test]
fn inverted_anticipation_limits_rejected() {
    let mut scenario = with_parameter("LNAV_TA_DIST_LO", 9.0);
    scenario
        .parameters
        .insert("LNAV_TA_DIST_HI".to_string(), 5.0);

    assert!(matches!(
        scenario.lateral_params(),
        Err(SimulatorError::Parameter(ParameterError::InvalidConfig))
    ));
    assert!(matches!(
        scenario.build(),
        Err(SimulatorError::Parameter(ParameterError::InvalidConfig))
    ));

    // equal limits are fine
    scenario
        .parameters
        .insert("LNAV_TA_DIST_HI".to_string(), 9.0);
    assert!(scenario.lateral_params().is_ok());
}

#[test]
fn malformed_json_rejected() {
    assert!(matches!(
        Scenario::from_json("{ \"name\": "),
        Err(SimulatorError::Json(_))
    ));
    assert!(matches!(
        Scenario::from_json(r#"{ "name": "x", "waypoints": [] }"#),
        Err(SimulatorError::Json(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let result = Scenario::from_file("/nonexistent/lnav/scenario.json");
    assert!(matches!(result, Err(SimulatorError::Io(_))));
}

#[test]
fn demo_survives_json_round_trip() {
    let demo = Scenario::demo();
    let text = demo.to_json().unwrap();
    let parsed = Scenario::from_json(&text).unwrap();

    assert_eq!(parsed.name, demo.name);
    assert_eq!(parsed.modes, demo.modes);
    assert_eq!(parsed.seed, demo.seed);
    assert_eq!(parsed.waypoints.len(), 4);
    for (a, b) in parsed.waypoints.iter().zip(&demo.waypoints) {
        assert_eq!(a.ident, b.ident);
        assert!((a.latitude - b.latitude).abs() < 1e-9);
        assert!((a.longitude - b.longitude).abs() < 1e-9);
    }
    assert!(text.contains("\"armed\": \"lnav\""));
}
