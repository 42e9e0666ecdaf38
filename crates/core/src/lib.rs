//! lnav_core - Pure no_std lateral navigation guidance
//!
//! This crate contains the platform-agnostic part of an LNAV lateral
//! director: great-circle geometry, nav sensitivity, turn anticipation,
//! waypoint sequencing and the director that ties them together. It can be
//! tested on host without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Flight plan, mode selector, delegates and
//!   autopilot output are injected via traits
//!
//! # Modules
//!
//! - [`navigation`]: Geographic types and great-circle geometry
//! - [`route`]: Waypoints, flight-plan trait and fixed-capacity route storage
//! - [`mode`]: Lateral autopilot modes and the mode selector trait
//! - [`guidance`]: Sensitivity, turn, sequencing and the LNAV director
//! - [`parameters`]: Parameter store and lateral guidance parameters

#![no_std]

pub mod guidance;
pub mod mode;
pub mod navigation;
pub mod parameters;
pub mod route;
