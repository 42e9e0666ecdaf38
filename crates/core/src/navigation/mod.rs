//! Navigation types and geometry
//!
//! This module contains the coordinate and aircraft-state types plus the pure
//! geometry functions the guidance director is built on.

pub mod geo;
mod types;

pub use geo::{
    cross_track, desired_track, diff_angle, distance_nm, initial_bearing, intercept_angle,
    is_abeam, magnetic_to_true, normalize_heading, true_to_magnetic, turn_radius,
    wind_components, wind_correction_angle,
};
pub use types::{AircraftState, GeoPoint, WindComponents};
