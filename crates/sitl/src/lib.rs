//! lnav_sitl - Software-in-the-loop harness for the lnav guidance core
//!
//! Closes the loop around `lnav_core::guidance::LnavDirector` with an
//! in-memory route, a simulated mode selector, an output recorder and a
//! point-mass aircraft model, all driven by [`SitlBridge`].

pub mod aircraft;
pub mod bridge;
pub mod error;
pub mod logging;
pub mod modes;
pub mod recorder;
pub mod scenario;

pub use aircraft::{AircraftConfig, AircraftModel};
pub use bridge::{RunSummary, SitlBridge, TimeMode};
pub use error::SimulatorError;
pub use modes::SimModeSelector;
pub use recorder::{OutputRecorder, TelemetrySnapshot};
pub use scenario::Scenario;
