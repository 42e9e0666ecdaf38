//! Guidance output recorder.
//!
//! Stands in for the autopilot heading bug and the display bus: keeps the
//! latest course command and the last value of each telemetry point.

use lnav_core::guidance::{GuidanceOutput, NavSensitivity, SequencingMode, Telemetry};

/// Latest value of each telemetry point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub cross_track: Option<f64>,
    pub desired_track: Option<f64>,
    pub nav_sensitivity: Option<NavSensitivity>,
    pub sensitivity_scalar: Option<f64>,
    pub waypoint_alert: bool,
    pub discontinuity: bool,
    pub sequencing: Option<SequencingMode>,
}

/// Records the director's outputs.
#[derive(Debug, Clone, Default)]
pub struct OutputRecorder {
    last_course: Option<f64>,
    pending_course: Option<f64>,
    course_count: u64,
    telemetry: TelemetrySnapshot,
}

impl OutputRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded magnetic course.
    pub fn last_course(&self) -> Option<f64> {
        self.last_course
    }

    /// Course commanded since the previous call, if any.
    pub fn take_course(&mut self) -> Option<f64> {
        self.pending_course.take()
    }

    /// Number of course commands received.
    pub fn course_count(&self) -> u64 {
        self.course_count
    }

    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }
}

impl GuidanceOutput for OutputRecorder {
    fn set_course(&mut self, magnetic_course: f64) {
        self.last_course = Some(magnetic_course);
        self.pending_course = Some(magnetic_course);
        self.course_count += 1;
    }

    fn publish(&mut self, value: Telemetry) {
        let t = &mut self.telemetry;
        match value {
            Telemetry::CrossTrack(v) => t.cross_track = Some(v),
            Telemetry::DesiredTrack(v) => t.desired_track = Some(v),
            Telemetry::NavSensitivity(v) => t.nav_sensitivity = Some(v),
            Telemetry::SensitivityScalar(v) => t.sensitivity_scalar = Some(v),
            Telemetry::WaypointAlert(v) => t.waypoint_alert = v,
            Telemetry::Discontinuity(v) => t.discontinuity = v,
            Telemetry::Sequencing(v) => t.sequencing = Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_latched_and_taken_once() {
        let mut rec = OutputRecorder::new();
        rec.set_course(270.0);

        assert_eq!(rec.take_course(), Some(270.0));
        assert_eq!(rec.take_course(), None);
        assert_eq!(rec.last_course(), Some(270.0));
        assert_eq!(rec.course_count(), 1);
    }

    #[test]
    fn test_telemetry_keeps_last_value() {
        let mut rec = OutputRecorder::new();
        rec.publish(Telemetry::CrossTrack(0.4));
        rec.publish(Telemetry::CrossTrack(-0.1));
        rec.publish(Telemetry::WaypointAlert(true));
        rec.publish(Telemetry::Sequencing(SequencingMode::Inhibit));

        let t = rec.telemetry();
        assert_eq!(t.cross_track, Some(-0.1));
        assert!(t.waypoint_alert);
        assert!(!t.discontinuity);
        assert_eq!(t.sequencing, Some(SequencingMode::Inhibit));
    }
}
