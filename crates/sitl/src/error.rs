use lnav_core::parameters::ParameterError;
use lnav_core::route::RouteError;

/// Errors that can occur during simulator operations.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid time mode: {0}")]
    InvalidTimeMode(String),

    #[error("Route command rejected: {0}")]
    Route(RouteError),

    #[error("Parameter error: {0}")]
    Parameter(ParameterError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RouteError> for SimulatorError {
    fn from(e: RouteError) -> Self {
        Self::Route(e)
    }
}

impl From<ParameterError> for SimulatorError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}
