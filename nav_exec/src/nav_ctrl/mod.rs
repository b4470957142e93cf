//! Navigation control module
//!
//! Navigation control steers the robot towards a single fixed target. Each
//! cycle it takes the latest position sample and:
//!
//! 1. calculates the bearing from the robot to the target,
//! 2. calculates the angular error between that bearing and the robot's
//!    heading, wrapped into [0, 360),
//! 3. classifies the error into one of the discrete steering commands.
//!
//! The classifier is a deadband plus buckets, not a continuous controller.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_bearing;
mod calc_error;
mod classify;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use calc_bearing::*;
pub use calc_error::*;
pub use classify::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during NavCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum NavCtrlError {
    #[error("Could not load the NavCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("The NavCtrl parameters are invalid: {0}")]
    InvalidParams(String),

    #[error("Recieved an invalid position sample: {0:?}")]
    InvalidSample(comms_if::eqpt::PositionSample),
}
