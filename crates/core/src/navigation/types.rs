//! Navigation type definitions
//!
//! This module contains core types used by the guidance subsystem:
//! - `GeoPoint`: Geographic coordinate of a fix or of the aircraft
//! - `AircraftState`: Per-cycle snapshot of the aircraft read from telemetry
//! - `WindComponents`: Headwind/crosswind decomposition

/// Geographic coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to +90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180)
    pub longitude: f64,
    /// Optional altitude in feet MSL (not used by lateral guidance)
    pub altitude_ft: Option<f64>,
}

impl GeoPoint {
    /// Create a new coordinate without altitude
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_ft: None,
        }
    }

    /// Create a new coordinate with altitude
    pub const fn with_altitude(latitude: f64, longitude: f64, altitude_ft: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_ft: Some(altitude_ft),
        }
    }

    /// True when both coordinates are finite numbers
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Immutable per-cycle aircraft state
///
/// All angles are degrees, speeds knots. Wind direction is the true
/// direction the wind blows from; hosts that read a magnetic wind convert it
/// with [`magnetic_to_true`](super::geo::magnetic_to_true) on ingestion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AircraftState {
    /// Present position
    pub position: GeoPoint,
    /// Ground speed (kt)
    pub ground_speed: f64,
    /// True airspeed (kt)
    pub true_airspeed: f64,
    /// True heading (0-360)
    pub true_heading: f64,
    /// Magnetic heading (0-360)
    pub magnetic_heading: f64,
    /// True ground track (0-360)
    pub true_track: f64,
    /// Bank angle, right wing down positive
    pub bank_angle: f64,
    /// Wind direction, true, blowing from
    pub wind_direction: f64,
    /// Wind speed (kt)
    pub wind_speed: f64,
    /// Magnetic variation, east positive
    pub magnetic_variation: f64,
    /// Height above ground level (ft)
    pub altitude_agl_ft: f64,
    /// Weight on wheels
    pub on_ground: bool,
}

/// Wind decomposed relative to a heading
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindComponents {
    /// Positive when the wind opposes the heading (kt)
    pub headwind: f64,
    /// Positive when the wind comes from the right (kt)
    pub crosswind: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_new_has_no_altitude() {
        let p = GeoPoint::new(47.5, -122.3);
        assert!((p.latitude - 47.5).abs() < 1e-9);
        assert!((p.longitude + 122.3).abs() < 1e-9);
        assert!(p.altitude_ft.is_none());
        assert!(p.is_valid());
    }

    #[test]
    fn test_geo_point_with_altitude() {
        let p = GeoPoint::with_altitude(0.0, 0.0, 3000.0);
        assert_eq!(p.altitude_ft, Some(3000.0));
    }

    #[test]
    fn test_geo_point_rejects_nan() {
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_aircraft_state_default_is_on_ground_false() {
        let state = AircraftState::default();
        assert!(!state.on_ground);
        assert_eq!(state.ground_speed, 0.0);
    }
}
