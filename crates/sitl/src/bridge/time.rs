use std::time::Duration;

use crate::error::SimulatorError;

/// Guidance cycle period used when the time mode does not set one.
pub const DEFAULT_STEP_US: u64 = 100_000;

/// Time synchronization mode for the SITL simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeMode {
    /// Simulation runs as fast as possible, no synchronization.
    FreeRunning,
    /// Simulation advances in discrete steps of `step_size_us` microseconds.
    Lockstep { step_size_us: u64 },
    /// Simulation runs at a scaled rate relative to wall-clock time.
    Scaled { factor: f32 },
}

impl Default for TimeMode {
    fn default() -> Self {
        Self::FreeRunning
    }
}

impl TimeMode {
    /// Simulated time covered by one guidance cycle.
    pub fn step_size_us(&self) -> u64 {
        match self {
            TimeMode::Lockstep { step_size_us } => *step_size_us,
            TimeMode::FreeRunning | TimeMode::Scaled { .. } => DEFAULT_STEP_US,
        }
    }

    /// Wall-clock time between cycles, `None` when not paced.
    pub fn wall_period(&self) -> Result<Option<Duration>, SimulatorError> {
        match self {
            TimeMode::Scaled { factor } if !(factor.is_finite() && *factor > 0.0) => Err(
                SimulatorError::InvalidTimeMode(format!("scale factor must be positive, got {factor}")),
            ),
            TimeMode::Scaled { factor } => Duration::try_from_secs_f64(
                self.step_size_us() as f64 / 1_000_000.0 / f64::from(*factor),
            )
            .map(Some)
            .map_err(|e| {
                SimulatorError::InvalidTimeMode(format!("scale factor {factor} out of range: {e}"))
            }),
            TimeMode::Lockstep { step_size_us: 0 } => Err(SimulatorError::InvalidTimeMode(
                "lockstep step size must be non-zero".to_string(),
            )),
            TimeMode::FreeRunning | TimeMode::Lockstep { .. } => Ok(None),
        }
    }
}
