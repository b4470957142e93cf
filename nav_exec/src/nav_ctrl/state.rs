//! Implementations for the NavCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::eqpt::{PositionSample, SteeringCommand};
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{calc_bearing, calc_heading_error, calc_range_m, classify, NavCtrlError, Params};
use util::{module::State, params, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Navigation control module state
#[derive(Default)]
pub struct NavCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    pub(crate) output: Option<OutputData>,
}

/// Input data to Navigation Control.
#[derive(Clone, Copy, Debug)]
pub struct InputData {
    /// The position sample acquired on this cycle
    pub sample: PositionSample,
}

/// Output command from NavCtrl that the motor driver must execute.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct OutputData {
    pub cmd: SteeringCommand,
}

/// Status report for NavCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Bearing from the robot to the target.
    ///
    /// Units: degrees
    pub bearing_deg: f64,

    /// Bearing minus heading, before wrapping.
    ///
    /// Units: degrees
    pub raw_error_deg: f64,

    /// Heading error wrapped into [0, 360).
    ///
    /// Units: degrees
    pub error_deg: f64,

    /// Great circle distance to the target.
    ///
    /// Units: meters
    pub range_m: f64,

    /// True if the robot is within the arrival radius of the target.
    pub at_target: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for NavCtrl {
    type InitData = String;
    type InitError = NavCtrlError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = NavCtrlError;

    /// Initialise the NavCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, _session: &Session) -> Result<(), Self::InitError> {
        let params: Params = params::load(&init_data).map_err(NavCtrlError::ParamLoadError)?;

        *self = Self::with_params(params)?;

        Ok(())
    }

    /// Perform cyclic processing of Navigation Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        let sample = input_data.sample;

        if !sample.position.is_valid() {
            return Err(NavCtrlError::InvalidSample(sample));
        }

        let target = self.params.target();

        self.report.range_m = calc_range_m(&sample.position, &target);
        self.report.bearing_deg = calc_bearing(&sample.position, &target);
        self.report.raw_error_deg = self.report.bearing_deg - sample.heading_deg;
        self.report.error_deg = calc_heading_error(sample.heading_deg, self.report.bearing_deg);

        // The bearing is undefined at (or very near) zero range, so stop rather
        // than steer on noise.
        let cmd = if self.report.range_m <= self.params.arrival_radius_m {
            self.report.at_target = true;
            SteeringCommand::Disabled
        } else {
            classify(self.report.error_deg)
        };

        debug!(
            "Location: {:9.7} N {:9.7} E, heading: {:5.2}, target bearing: {:5.2}, \
             error: {:5.2}, range: {:.1} m",
            sample.position.lat_deg,
            sample.position.lon_deg,
            sample.heading_deg,
            self.report.bearing_deg,
            self.report.error_deg,
            self.report.range_m
        );
        trace!("NavCtrl output: {}", cmd.name());

        let output = OutputData { cmd };
        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl NavCtrl {
    /// Create a new NavCtrl from already loaded parameters.
    pub fn with_params(params: Params) -> Result<Self, NavCtrlError> {
        params.validate()?;

        info!(
            "NavCtrl target: {:9.7} N {:9.7} E (arrival radius {} m)",
            params.target_lat_deg, params.target_lon_deg, params.arrival_radius_m
        );

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// The output of the last successful processing cycle.
    pub fn last_output(&self) -> Option<OutputData> {
        self.output
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
