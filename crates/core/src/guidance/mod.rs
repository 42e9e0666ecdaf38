//! Lateral navigation guidance
//!
//! [`LnavDirector`] turns the active flight-plan leg and the aircraft state
//! into autopilot course commands. The surrounding modules hold the pieces it
//! is built from, each usable and tested on its own:
//!
//! - [`sensitivity`]: nav sensitivity categories and LPV scaling
//! - [`options`]: director tunables and max-bank knob resolution
//! - [`turn`]: turn anticipation distance and turn completion
//! - [`sequencing`]: when and how the active waypoint advances
//! - [`delegate`]: holds and localizer directors that can take over guidance
//! - [`io`]: collaborators and telemetry handed to the director each cycle

pub mod delegate;
mod director;
mod event;
pub mod io;
pub mod options;
pub mod sensitivity;
pub mod sequencing;
pub mod turn;

pub use delegate::{DelegateContext, DelegateState, HoldsDelegate, LateralDelegate, NoDelegate};
pub use director::LnavDirector;
pub use event::{GuidanceEvent, MAX_GUIDANCE_EVENTS};
pub use io::{GuidanceIo, GuidanceOutput, Telemetry};
pub use options::{AnticipationLimit, DirectorOptions};
pub use sensitivity::NavSensitivity;
pub use sequencing::{GuidanceState, SequencingMode};
