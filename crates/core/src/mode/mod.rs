//! Autopilot Mode Signals
//!
//! This module provides the lateral-mode types the guidance director reads and
//! the `ModeSelector` trait through which it reads them. Mode arbitration is
//! owned by the autopilot, not by this crate.
//!
//! # Contents
//!
//! - `ModeSelector` trait definition (platform-agnostic interface)
//! - Lateral mode, approach kind and nav source enums
//! - `ModeEvent` requests queued by the director

mod state;
mod traits;

pub use state::{ApproachKind, LateralMode, ModeEvent, NavSource};
pub use traits::ModeSelector;
