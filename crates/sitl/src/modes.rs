//! Simulated autopilot mode selector.
//!
//! Holds the active and armed lateral modes and processes the director's
//! queued events immediately: `LnavActive` promotes the armed mode.

use lnav_core::mode::{ApproachKind, LateralMode, ModeEvent, ModeSelector, NavSource};
use tracing::info;

/// Mode selector for the SITL loop.
#[derive(Debug, Clone)]
pub struct SimModeSelector {
    active: LateralMode,
    armed: LateralMode,
    approach: ApproachKind,
    source: NavSource,
    max_bank_setting: f64,
    activations: u32,
}

impl SimModeSelector {
    /// Create a selector with `active` engaged and nothing armed.
    pub fn new(active: LateralMode) -> Self {
        Self {
            active,
            armed: LateralMode::None,
            approach: ApproachKind::None,
            source: NavSource::Fms,
            max_bank_setting: 25.0,
            activations: 0,
        }
    }

    /// Arm a lateral mode.
    pub fn arm(&mut self, mode: LateralMode) {
        self.armed = mode;
    }

    /// Engage a lateral mode directly.
    pub fn engage(&mut self, mode: LateralMode) {
        self.active = mode;
    }

    /// Set the approach kind.
    pub fn set_approach_kind(&mut self, kind: ApproachKind) {
        self.approach = kind;
    }

    /// Set the navigation source.
    pub fn set_nav_source(&mut self, source: NavSource) {
        self.source = source;
    }

    /// Set the max-bank knob (deg).
    pub fn set_max_bank_setting(&mut self, setting: f64) {
        self.max_bank_setting = setting;
    }

    /// Number of armed-to-active promotions so far.
    pub fn activations(&self) -> u32 {
        self.activations
    }
}

impl Default for SimModeSelector {
    fn default() -> Self {
        Self::new(LateralMode::Lnav)
    }
}

impl ModeSelector for SimModeSelector {
    fn lateral_active(&self) -> LateralMode {
        self.active
    }

    fn lateral_armed(&self) -> LateralMode {
        self.armed
    }

    fn approach_kind(&self) -> ApproachKind {
        self.approach
    }

    fn nav_source(&self) -> NavSource {
        self.source
    }

    fn max_bank_setting(&self) -> f64 {
        self.max_bank_setting
    }

    fn queue_event(&mut self, event: ModeEvent) {
        match event {
            ModeEvent::LnavActive => {
                if matches!(self.armed, LateralMode::Lnav | LateralMode::Approach) {
                    info!(
                        from = self.active.name(),
                        to = self.armed.name(),
                        "lateral mode activated"
                    );
                    self.active = self.armed;
                    self.armed = LateralMode::None;
                    self.activations += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lnav_active_promotes_armed_mode() {
        let mut modes = SimModeSelector::new(LateralMode::Heading);
        modes.arm(LateralMode::Lnav);

        modes.queue_event(ModeEvent::LnavActive);

        assert_eq!(modes.lateral_active(), LateralMode::Lnav);
        assert_eq!(modes.lateral_armed(), LateralMode::None);
        assert_eq!(modes.activations(), 1);
    }

    #[test]
    fn test_lnav_active_without_armed_mode_ignored() {
        let mut modes = SimModeSelector::new(LateralMode::Heading);
        modes.queue_event(ModeEvent::LnavActive);
        assert_eq!(modes.lateral_active(), LateralMode::Heading);
        assert_eq!(modes.activations(), 0);
    }

    #[test]
    fn test_defaults() {
        let modes = SimModeSelector::default();
        assert_eq!(modes.lateral_active(), LateralMode::Lnav);
        assert_eq!(modes.nav_source(), NavSource::Fms);
        assert!((modes.max_bank_setting() - 25.0).abs() < 1e-9);
    }
}
