//! Navigation geometry
//!
//! Pure great-circle and wind-triangle functions used by the guidance
//! director. Angles are degrees, distances nautical miles, speeds knots.

use libm::{asin, atan2, cos, fabs, pow, sin, sqrt, tan};

use super::types::{GeoPoint, WindComponents};

/// Mean earth radius in nautical miles
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Feet per nautical mile
pub const FEET_PER_NM: f64 = 6076.1093456638;

const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Normalize a heading to the range [0, 360)
pub fn normalize_heading(heading: f64) -> f64 {
    let h = heading % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-15 + 360.0 rounds to 360.0
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Signed smallest rotation from `from` to `to`, in (-180, 180]
///
/// Positive means `to` lies clockwise (to the right) of `from`.
pub fn diff_angle(from: f64, to: f64) -> f64 {
    let mut d = (to - from) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Convert a true heading to magnetic (east variation positive)
pub fn true_to_magnetic(heading: f64, variation: f64) -> f64 {
    normalize_heading(heading - variation)
}

/// Convert a magnetic heading to true (east variation positive)
pub fn magnetic_to_true(heading: f64, variation: f64) -> f64 {
    normalize_heading(heading + variation)
}

/// Great-circle distance between two points (haversine)
pub fn distance_nm(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude * DEG_TO_RAD;
    let lat2 = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let a = sin_dlat * sin_dlat + cos(lat1) * cos(lat2) * sin_dlon * sin_dlon;
    let c = 2.0 * atan2(sqrt(a), sqrt(1.0 - a));
    EARTH_RADIUS_NM * c
}

/// Initial great-circle bearing from `from` to `to`, true, [0, 360)
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.latitude * DEG_TO_RAD;
    let lat2 = to.latitude * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    let y = sin(delta_lon) * cos(lat2);
    let x = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(delta_lon);
    normalize_heading(atan2(y, x) * RAD_TO_DEG)
}

/// Point reached travelling `distance` NM from `from` on initial `bearing`
pub fn destination_point(from: &GeoPoint, bearing: f64, distance: f64) -> GeoPoint {
    let lat1 = from.latitude * DEG_TO_RAD;
    let lon1 = from.longitude * DEG_TO_RAD;
    let brg = bearing * DEG_TO_RAD;
    let delta = distance / EARTH_RADIUS_NM;

    let lat2 = asin(sin(lat1) * cos(delta) + cos(lat1) * sin(delta) * cos(brg));
    let lon2 = lon1
        + atan2(
            sin(brg) * sin(delta) * cos(lat1),
            cos(delta) - sin(lat1) * sin(lat2),
        );

    let mut lon = lon2 * RAD_TO_DEG;
    if lon > 180.0 {
        lon -= 360.0;
    } else if lon < -180.0 {
        lon += 360.0;
    }

    GeoPoint {
        latitude: lat2 * RAD_TO_DEG,
        longitude: lon,
        altitude_ft: from.altitude_ft,
    }
}

/// Desired track of a leg: the initial great-circle course from its start
/// fix to its end fix.
pub fn desired_track(leg_start: &GeoPoint, leg_end: &GeoPoint) -> f64 {
    initial_bearing(leg_start, leg_end)
}

/// Signed cross-track distance of `position` from the great circle through
/// the leg, positive right of course.
pub fn cross_track(leg_start: &GeoPoint, leg_end: &GeoPoint, position: &GeoPoint) -> f64 {
    let d13 = distance_nm(leg_start, position) / EARTH_RADIUS_NM;
    let theta13 = initial_bearing(leg_start, position) * DEG_TO_RAD;
    let theta12 = initial_bearing(leg_start, leg_end) * DEG_TO_RAD;

    let ratio = (sin(d13) * sin(theta13 - theta12)).clamp(-1.0, 1.0);
    asin(ratio) * EARTH_RADIUS_NM
}

/// True once the fix lies more than 90 degrees off the desired track as seen
/// from the aircraft, i.e. the aircraft has passed abeam of it.
pub fn is_abeam(desired_track: f64, position: &GeoPoint, fix: &GeoPoint) -> bool {
    let bearing = initial_bearing(position, fix);
    fabs(diff_angle(bearing, desired_track)) > 90.0
}

/// Intercept angle to add to the desired track to converge on the course
///
/// Magnitude grows with `|xtk|` scaled against the full-scale deflection of
/// the current sensitivity, capped at `max_intercept`; sign is opposite to
/// the deviation.
pub fn intercept_angle(xtk: f64, full_scale: f64, max_intercept: f64) -> f64 {
    if xtk == 0.0 || !xtk.is_finite() || full_scale <= 0.0 {
        return 0.0;
    }
    let magnitude = pow(fabs(xtk) * 20.0 * (2.0 / full_scale), 1.35).min(max_intercept);
    if xtk > 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Radius of a coordinated level turn in nautical miles
pub fn turn_radius(speed: f64, bank_angle: f64) -> f64 {
    let tan_bank = tan(bank_angle * DEG_TO_RAD);
    if tan_bank <= 0.0 {
        return f64::INFINITY;
    }
    (speed * speed) / (11.26 * tan_bank) / FEET_PER_NM
}

/// Decompose the wind relative to `heading`
pub fn wind_components(heading: f64, wind_direction: f64, wind_speed: f64) -> WindComponents {
    let relative = (wind_direction - heading) * DEG_TO_RAD;
    WindComponents {
        headwind: wind_speed * cos(relative),
        crosswind: wind_speed * sin(relative),
    }
}

/// Wind correction angle for flying `course` at `tas`
///
/// The heading to fly is `course - wca`.
pub fn wind_correction_angle(course: f64, tas: f64, wind_direction: f64, wind_speed: f64) -> f64 {
    if tas <= 0.0 || wind_speed == 0.0 {
        return 0.0;
    }
    let ratio = (wind_speed * sin((course - wind_direction) * DEG_TO_RAD) / tas).clamp(-1.0, 1.0);
    asin(ratio) * RAD_TO_DEG
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    // ========================================================================
    // Heading arithmetic
    // ========================================================================

    #[test]
    fn test_normalize_heading_wraps_into_range() {
        assert!((normalize_heading(370.0) - 10.0).abs() < TOL);
        assert!((normalize_heading(-90.0) - 270.0).abs() < TOL);
        assert!((normalize_heading(720.0)).abs() < TOL);
        assert!((normalize_heading(360.0)).abs() < TOL);
        assert!(normalize_heading(-1e-15) < 360.0);
    }

    #[test]
    fn test_normalize_heading_idempotent() {
        for h in [-725.5, -360.0, -0.1, 0.0, 45.0, 359.999, 360.0, 1234.5] {
            let once = normalize_heading(h);
            assert!((0.0..360.0).contains(&once), "{h} -> {once}");
            assert!((normalize_heading(once) - once).abs() < TOL);
        }
    }

    #[test]
    fn test_diff_angle_shortest_signed() {
        assert!((diff_angle(350.0, 10.0) - 20.0).abs() < TOL);
        assert!((diff_angle(10.0, 350.0) + 20.0).abs() < TOL);
        assert!((diff_angle(0.0, 180.0) - 180.0).abs() < TOL);
        assert!((diff_angle(90.0, 90.0)).abs() < TOL);
    }

    #[test]
    fn test_magvar_conversion() {
        // 10 deg east: magnetic reads lower than true
        assert!((true_to_magnetic(90.0, 10.0) - 80.0).abs() < TOL);
        assert!((magnetic_to_true(80.0, 10.0) - 90.0).abs() < TOL);
        assert!((true_to_magnetic(5.0, 10.0) - 355.0).abs() < TOL);
    }

    // ========================================================================
    // Great circle
    // ========================================================================

    #[test]
    fn test_distance_one_degree_latitude() {
        let d = distance_nm(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(1.0, 0.0));
        assert!((d - 60.04).abs() < 0.1, "distance = {d}");
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(initial_bearing(&origin, &GeoPoint::new(1.0, 0.0)).abs() < TOL);
        assert!((initial_bearing(&origin, &GeoPoint::new(0.0, 1.0)) - 90.0).abs() < TOL);
        assert!((initial_bearing(&origin, &GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < TOL);
        assert!((initial_bearing(&origin, &GeoPoint::new(0.0, -1.0)) - 270.0).abs() < TOL);
    }

    #[test]
    fn test_destination_point_round_trips_distance_and_bearing() {
        let start = GeoPoint::new(47.0, -122.0);
        let end = destination_point(&start, 45.0, 20.0);
        assert!((distance_nm(&start, &end) - 20.0).abs() < 1e-3);
        assert!((initial_bearing(&start, &end) - 45.0).abs() < 1e-3);
    }

    // ========================================================================
    // Leg geometry
    // ========================================================================

    #[test]
    fn test_desired_track_equator_leg() {
        let dtk = desired_track(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 1.0));
        assert!((dtk - 90.0).abs() < TOL);
    }

    #[test]
    fn test_cross_track_zero_on_centerline() {
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 1.0);
        let xtk = cross_track(&start, &end, &GeoPoint::new(0.0, 0.5));
        assert!(xtk.abs() < TOL);
    }

    #[test]
    fn test_cross_track_sign_right_positive() {
        // Eastbound leg: south of it is right of course
        let start = GeoPoint::new(0.0, 0.0);
        let end = GeoPoint::new(0.0, 1.0);
        let right = cross_track(&start, &end, &GeoPoint::new(-0.1, 0.5));
        let left = cross_track(&start, &end, &GeoPoint::new(0.1, 0.5));
        assert!(right > 5.9 && right < 6.1, "right = {right}");
        assert!(left < -5.9 && left > -6.1, "left = {left}");
    }

    #[test]
    fn test_is_abeam_before_and_after_fix() {
        let fix = GeoPoint::new(0.0, 1.0);
        assert!(!is_abeam(90.0, &GeoPoint::new(0.0, 0.9), &fix));
        assert!(is_abeam(90.0, &GeoPoint::new(0.0, 1.01), &fix));
    }

    #[test]
    fn test_intercept_angle_opposes_deviation_and_caps() {
        assert!(intercept_angle(0.0, 2.0, 20.0).abs() < TOL);
        let small = intercept_angle(0.1, 2.0, 20.0);
        assert!(small < 0.0 && small > -3.0, "small = {small}");
        assert!((intercept_angle(-5.0, 2.0, 20.0) - 20.0).abs() < TOL);
        assert!((intercept_angle(5.0, 2.0, 20.0) + 20.0).abs() < TOL);
    }

    #[test]
    fn test_intercept_angle_steeper_at_tighter_sensitivity() {
        let enroute = intercept_angle(0.05, 2.0, 20.0).abs();
        let approach = intercept_angle(0.05, 0.3, 20.0).abs();
        assert!(approach > enroute);
    }

    // ========================================================================
    // Performance and wind
    // ========================================================================

    #[test]
    fn test_turn_radius_known_value() {
        // 120 kt at 25 deg bank: 120^2 / (11.26 * tan 25) ft
        let r = turn_radius(120.0, 25.0);
        let expected = 14400.0 / (11.26 * 0.466_307_658) / FEET_PER_NM;
        assert!((r - expected).abs() < 1e-6);
        assert!(turn_radius(120.0, 0.0).is_infinite());
    }

    #[test]
    fn test_wind_components_head_and_cross() {
        let head = wind_components(90.0, 90.0, 20.0);
        assert!((head.headwind - 20.0).abs() < TOL);
        assert!(head.crosswind.abs() < TOL);

        let tail = wind_components(90.0, 270.0, 20.0);
        assert!((tail.headwind + 20.0).abs() < TOL);

        let right = wind_components(0.0, 90.0, 10.0);
        assert!((right.crosswind - 10.0).abs() < TOL);
    }

    #[test]
    fn test_wind_correction_turns_into_wind() {
        // Course east, wind from north: heading must be left of course
        let wca = wind_correction_angle(90.0, 120.0, 0.0, 20.0);
        assert!(wca > 0.0);
        let heading = normalize_heading(90.0 - wca);
        assert!(heading < 90.0);
        assert!((wca - libm::asin(20.0 / 120.0) * RAD_TO_DEG).abs() < TOL);
    }

    #[test]
    fn test_wind_correction_zero_cases() {
        assert_eq!(wind_correction_angle(90.0, 0.0, 0.0, 20.0), 0.0);
        assert_eq!(wind_correction_angle(90.0, 120.0, 0.0, 0.0), 0.0);
        assert!(wind_correction_angle(90.0, 120.0, 90.0, 20.0).abs() < TOL);
    }
}
