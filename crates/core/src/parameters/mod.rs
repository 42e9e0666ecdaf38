//! Parameter management
//!
//! A fixed-capacity parameter store and the lateral guidance parameter set
//! loaded from it.

pub mod error;
pub mod lateral;
pub mod storage;

pub use error::ParameterError;
pub use lateral::LateralParams;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
