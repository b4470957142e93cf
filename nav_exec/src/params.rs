//! # Navigation Executable Parameters
//!
//! This module provides parameters for the navigation executable, loaded from `nav_exec.toml`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::DriveIntensities;
use serde::Deserialize;
use thiserror::Error;

use crate::ctrl_loop::SensorFaultAction;
use crate::gps_client::GpsParams;
use crate::motor_driver::MotorParams;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Longest allowed control cycle.
///
/// Units: seconds
pub const MAX_CYCLE_PERIOD_S: f64 = 300.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct NavExecParams {
    // ---- CYCLE ----

    /// Target period of one control cycle, 0.1 for 10 Hz navigation or 1.0 for 1 Hz logging.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// What to send to the motors on a cycle with no position sample
    #[serde(default)]
    pub sensor_fault_action: SensorFaultAction,

    // ---- DATA ----

    /// Name of the position log file in the session directory
    #[serde(default = "default_pos_log_file_name")]
    pub pos_log_file_name: String,

    // ---- DRIVE ----
    #[serde(flatten)]
    pub intensities: DriveIntensities,

    // ---- EQUIPMENT ----

    pub gps: GpsParams,

    pub motors: MotorParams,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("Invalid cycle period {0}, it must be positive and at most {} s", MAX_CYCLE_PERIOD_S)]
    InvalidCyclePeriod(f64),

    #[error("The {0} intensity must be between 0 and 100 %, found {1}")]
    IntensityOutOfRange(&'static str, f64),

    #[error("The turn intensity ({turn}) must not exceed the full speed intensity ({full})")]
    TurnFasterThanFull { turn: f64, full: f64 },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavExecParams {
    /// Check the parameters are sensible.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.cycle_period_s > 0.0 && self.cycle_period_s <= MAX_CYCLE_PERIOD_S) {
            return Err(ParamsError::InvalidCyclePeriod(self.cycle_period_s));
        }

        let int = &self.intensities;

        for (name, value) in [
            ("full speed", int.full_speed_pct),
            ("turn speed", int.turn_speed_pct),
            ("stop speed", int.stop_speed_pct),
        ]
        .iter()
        {
            if !(*value >= 0.0 && *value <= 100.0) {
                return Err(ParamsError::IntensityOutOfRange(*name, *value));
            }
        }

        if int.turn_speed_pct > int.full_speed_pct {
            return Err(ParamsError::TurnFasterThanFull {
                turn: int.turn_speed_pct,
                full: int.full_speed_pct,
            });
        }

        Ok(())
    }
}

fn default_pos_log_file_name() -> String {
    "pos_log.csv".into()
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const PARAMS: &str = r#"
cycle_period_s = 0.1
full_speed_pct = 100.0
turn_speed_pct = 80.0
stop_speed_pct = 0.0

[gps]
kind = "trace"
trace_path = "trace.csv"

[motors]
kind = "sim"
"#;

    #[test]
    fn test_parse_and_defaults() {
        let p: NavExecParams = util::params::parse(PARAMS).unwrap();

        assert_eq!(p.cycle_period_s, 0.1);
        assert_eq!(p.sensor_fault_action, SensorFaultAction::Disable);
        assert_eq!(p.pos_log_file_name, "pos_log.csv");
        assert_eq!(p.intensities, DriveIntensities::default());
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let base: NavExecParams = util::params::parse(PARAMS).unwrap();

        let mut p = base.clone();
        p.cycle_period_s = 0.0;
        assert_eq!(p.validate(), Err(ParamsError::InvalidCyclePeriod(0.0)));

        // Too long to be a duration
        let mut p = base.clone();
        p.cycle_period_s = 1e30;
        assert_eq!(p.validate(), Err(ParamsError::InvalidCyclePeriod(1e30)));

        let mut p = base.clone();
        p.cycle_period_s = std::f64::INFINITY;
        assert!(p.validate().is_err());

        let mut p = base.clone();
        p.cycle_period_s = MAX_CYCLE_PERIOD_S;
        assert_eq!(p.validate(), Ok(()));

        let mut p = base.clone();
        p.intensities.full_speed_pct = 120.0;
        assert_eq!(
            p.validate(),
            Err(ParamsError::IntensityOutOfRange("full speed", 120.0))
        );

        let mut p = base.clone();
        p.intensities.stop_speed_pct = std::f64::NAN;
        assert!(p.validate().is_err());

        let mut p = base;
        p.intensities.turn_speed_pct = 90.0;
        p.intensities.full_speed_pct = 70.0;
        assert_eq!(
            p.validate(),
            Err(ParamsError::TurnFasterThanFull {
                turn: 90.0,
                full: 70.0
            })
        );
    }
}
