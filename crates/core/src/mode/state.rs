//! Lateral mode state types
//!
//! Closed sets of the autopilot mode signals the guidance director reads.
//! Mode arbitration itself belongs to the autopilot; these are inputs.

/// Lateral autopilot mode, used both for the active and the armed slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LateralMode {
    /// No lateral mode
    #[default]
    None,
    /// Wings-level / roll hold
    Roll,
    /// Heading select
    Heading,
    /// Conventional radio navigation (VOR/LOC)
    Nav,
    /// Lateral navigation along the route
    Lnav,
    /// Approach
    Approach,
    /// Takeoff
    Takeoff,
    /// Go-around
    GoAround,
}

impl LateralMode {
    /// Short annunciator label
    pub fn name(&self) -> &'static str {
        match self {
            LateralMode::None => "NONE",
            LateralMode::Roll => "ROL",
            LateralMode::Heading => "HDG",
            LateralMode::Nav => "NAV",
            LateralMode::Lnav => "LNAV",
            LateralMode::Approach => "APPR",
            LateralMode::Takeoff => "TO",
            LateralMode::GoAround => "GA",
        }
    }
}

/// Kind of the loaded approach procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApproachKind {
    /// No approach loaded
    #[default]
    None,
    /// Localizer-based precision approach
    Ils,
    /// GPS/RNAV approach
    Rnav,
    /// Visual approach
    Visual,
}

/// Source the navigation display is coupled to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavSource {
    /// Flight management route
    #[default]
    Fms,
    /// Navigation radio 1
    Nav1,
    /// Navigation radio 2
    Nav2,
}

impl NavSource {
    /// True for the legacy radio sources
    pub fn is_radio(&self) -> bool {
        matches!(self, NavSource::Nav1 | NavSource::Nav2)
    }
}

/// Requests the guidance director queues to the mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Promote an armed LNAV (or RNAV approach) to active
    LnavActive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(LateralMode::default(), LateralMode::None);
        assert_eq!(ApproachKind::default(), ApproachKind::None);
        assert_eq!(NavSource::default(), NavSource::Fms);
    }

    #[test]
    fn test_nav_source_is_radio() {
        assert!(!NavSource::Fms.is_radio());
        assert!(NavSource::Nav1.is_radio());
        assert!(NavSource::Nav2.is_radio());
    }

    #[test]
    fn test_lateral_mode_names() {
        assert_eq!(LateralMode::Lnav.name(), "LNAV");
        assert_eq!(LateralMode::Approach.name(), "APPR");
    }
}
