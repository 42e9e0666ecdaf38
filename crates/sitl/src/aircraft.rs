//! Lightweight fixed-wing aircraft model.
//!
//! Point-mass kinematics: the model banks toward the commanded heading at a
//! limited roll rate, turns at the coordinated rate for its bank, and drifts
//! with the wind. Optional seeded turbulence perturbs the bank angle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lnav_core::navigation::geo::{destination_point, magnetic_to_true};
use lnav_core::navigation::{diff_angle, normalize_heading, true_to_magnetic, AircraftState, GeoPoint};

/// Coordinated turn constant: rate (deg/s) = 1091 * tan(bank) / TAS (kt)
const RATE_OF_TURN_CONSTANT: f64 = 1091.0;

/// Configuration for the aircraft model.
#[derive(Debug, Clone)]
pub struct AircraftConfig {
    /// True airspeed in knots.
    pub true_airspeed: f64,
    /// Bank limit in degrees.
    pub max_bank: f64,
    /// Roll rate in deg/s.
    pub roll_rate: f64,
    /// Target bank per degree of heading error.
    pub heading_gain: f64,
    /// Turbulence bank noise standard deviation in degrees.
    pub turbulence_deg: f64,
    /// RNG seed for deterministic turbulence. None = random.
    pub seed: Option<u64>,
    /// Direction the wind blows from, true (deg).
    pub wind_direction: f64,
    /// Wind speed in knots.
    pub wind_speed: f64,
    /// Magnetic variation, east positive (deg).
    pub magnetic_variation: f64,
    /// Height above ground in feet.
    pub altitude_agl_ft: f64,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            true_airspeed: 150.0,
            max_bank: 30.0,
            roll_rate: 5.0,
            heading_gain: 2.0,
            turbulence_deg: 0.0,
            seed: None,
            wind_direction: 0.0,
            wind_speed: 0.0,
            magnetic_variation: 0.0,
            altitude_agl_ft: 3000.0,
        }
    }
}

/// Aircraft model producing `AircraftState` snapshots for the director.
pub struct AircraftModel {
    config: AircraftConfig,
    position: GeoPoint,
    /// True heading in degrees.
    heading: f64,
    /// Bank angle in degrees, right positive.
    bank: f64,
    ground_speed: f64,
    track: f64,
    /// Heading the autopilot is steering to, true (deg).
    commanded_heading: Option<f64>,
    on_ground: bool,
    rng: StdRng,
}

impl AircraftModel {
    /// Create a model at `position` flying `true_heading`, wings level.
    pub fn new(config: AircraftConfig, position: GeoPoint, true_heading: f64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut model = Self {
            config,
            position,
            heading: normalize_heading(true_heading),
            bank: 0.0,
            ground_speed: 0.0,
            track: 0.0,
            commanded_heading: None,
            on_ground: false,
            rng,
        };
        model.update_ground_vector();
        model
    }

    /// Set the autopilot heading bug (magnetic, deg).
    pub fn command_course(&mut self, magnetic_course: f64) {
        self.commanded_heading = Some(magnetic_to_true(
            magnetic_course,
            self.config.magnetic_variation,
        ));
    }

    /// Heading the autopilot is steering to, true (deg).
    pub fn commanded_heading(&self) -> Option<f64> {
        self.commanded_heading
    }

    /// Put the aircraft on or off the ground.
    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
    }

    /// Change the wind (from direction true, speed kt).
    pub fn set_wind(&mut self, direction: f64, speed: f64) {
        self.config.wind_direction = direction;
        self.config.wind_speed = speed;
        self.update_ground_vector();
    }

    /// Integrate the kinematics for one time step of `dt` seconds.
    pub fn integrate(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        let target_bank = match self.commanded_heading {
            Some(cmd) => (diff_angle(self.heading, cmd) * self.config.heading_gain)
                .clamp(-self.config.max_bank, self.config.max_bank),
            None => 0.0,
        };
        let max_roll = self.config.roll_rate * dt;
        self.bank += (target_bank - self.bank).clamp(-max_roll, max_roll);
        self.bank += self.gaussian_noise(self.config.turbulence_deg);
        self.bank = self
            .bank
            .clamp(-self.config.max_bank, self.config.max_bank);

        if self.config.true_airspeed > 0.0 {
            let rate = RATE_OF_TURN_CONSTANT * self.bank.to_radians().tan()
                / self.config.true_airspeed;
            self.heading = normalize_heading(self.heading + rate * dt);
        }

        self.update_ground_vector();
        let distance = self.ground_speed * dt / 3600.0;
        if distance > 0.0 {
            self.position = destination_point(&self.position, self.track, distance);
        }
    }

    /// Snapshot for the guidance director.
    pub fn state(&self) -> AircraftState {
        AircraftState {
            position: self.position,
            ground_speed: self.ground_speed,
            true_airspeed: self.config.true_airspeed,
            true_heading: self.heading,
            magnetic_heading: true_to_magnetic(self.heading, self.config.magnetic_variation),
            true_track: self.track,
            bank_angle: self.bank,
            wind_direction: self.config.wind_direction,
            wind_speed: self.config.wind_speed,
            magnetic_variation: self.config.magnetic_variation,
            altitude_agl_ft: self.config.altitude_agl_ft,
            on_ground: self.on_ground,
        }
    }

    /// Current position.
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    /// Current true heading in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Current bank angle in degrees.
    pub fn bank(&self) -> f64 {
        self.bank
    }

    /// Sum the air and wind vectors into ground speed and track.
    fn update_ground_vector(&mut self) {
        let tas = self.config.true_airspeed;
        let heading = self.heading.to_radians();
        // Wind blows toward the reciprocal of its from-direction
        let wind_to = (self.config.wind_direction + 180.0).to_radians();
        let north = tas * heading.cos() + self.config.wind_speed * wind_to.cos();
        let east = tas * heading.sin() + self.config.wind_speed * wind_to.sin();

        self.ground_speed = north.hypot(east);
        self.track = if self.ground_speed > 0.0 {
            normalize_heading(east.atan2(north).to_degrees())
        } else {
            self.heading
        };
    }

    /// Generate Gaussian noise using Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f64 = self.rng.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        z * stddev
    }
}

impl std::fmt::Debug for AircraftModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AircraftModel")
            .field("position", &self.position)
            .field("heading", &self.heading)
            .field("bank", &self.bank)
            .field("ground_speed", &self.ground_speed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnav_core::navigation::{distance_nm, initial_bearing};

    fn create_test_model(heading: f64) -> AircraftModel {
        let config = AircraftConfig {
            seed: Some(42),
            ..Default::default()
        };
        AircraftModel::new(config, GeoPoint::new(0.0, 0.0), heading)
    }

    #[test]
    fn test_straight_line_motion() {
        let mut model = create_test_model(90.0);

        // 60 s at 150 kt = 2.5 NM
        for _ in 0..600 {
            model.integrate(0.1);
        }

        let start = GeoPoint::new(0.0, 0.0);
        let d = distance_nm(&start, &model.position());
        assert!((d - 2.5).abs() < 0.01, "Expected 2.5 NM, got {}", d);
        assert!((initial_bearing(&start, &model.position()) - 90.0).abs() < 0.01);
        assert!(model.bank().abs() < 1e-9);
    }

    #[test]
    fn test_turns_to_commanded_heading() {
        let mut model = create_test_model(90.0);
        model.command_course(180.0);

        for _ in 0..600 {
            model.integrate(0.1);
        }

        assert!(
            diff_angle(model.heading(), 180.0).abs() < 1.0,
            "Expected heading ≈ 180, got {}",
            model.heading()
        );
        assert!(model.bank().abs() < 2.0);
    }

    #[test]
    fn test_roll_rate_limited() {
        let mut model = create_test_model(0.0);
        model.command_course(90.0);
        model.integrate(1.0);
        assert!((model.bank() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bank_limited() {
        let mut model = create_test_model(0.0);
        model.command_course(179.0);
        for _ in 0..100 {
            model.integrate(0.1);
        }
        assert!(model.bank() <= 30.0 + 1e-9);
    }

    #[test]
    fn test_command_converted_from_magnetic() {
        let config = AircraftConfig {
            magnetic_variation: 10.0,
            seed: Some(1),
            ..Default::default()
        };
        let mut model = AircraftModel::new(config, GeoPoint::new(0.0, 0.0), 0.0);
        model.command_course(80.0);
        assert!((model.commanded_heading().unwrap() - 90.0).abs() < 1e-9);
        assert!((model.state().magnetic_heading - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_drift() {
        let config = AircraftConfig {
            wind_direction: 0.0,
            wind_speed: 30.0,
            seed: Some(1),
            ..Default::default()
        };
        let model = AircraftModel::new(config, GeoPoint::new(0.0, 0.0), 90.0);
        let state = model.state();

        // North wind pushes an eastbound aircraft south
        assert!(state.true_track > 90.0);
        assert!((state.ground_speed - (150.0f64.powi(2) + 30.0f64.powi(2)).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_turbulence_deterministic_with_seed() {
        let config = AircraftConfig {
            turbulence_deg: 1.0,
            seed: Some(7),
            ..Default::default()
        };
        let mut a = AircraftModel::new(config.clone(), GeoPoint::new(0.0, 0.0), 90.0);
        let mut b = AircraftModel::new(config, GeoPoint::new(0.0, 0.0), 90.0);
        for _ in 0..50 {
            a.integrate(0.1);
            b.integrate(0.1);
        }
        assert_eq!(a.bank(), b.bank());
        assert_eq!(a.position(), b.position());
        assert!(a.bank() != 0.0);
    }

    #[test]
    fn test_state_reports_ground_flag_and_agl() {
        let mut model = create_test_model(0.0);
        assert!(!model.state().on_ground);
        model.set_on_ground(true);
        assert!(model.state().on_ground);
        assert!((model.state().altitude_agl_ft - 3000.0).abs() < 1e-9);
    }
}
