//! # Control loop
//!
//! The cyclic part of the executable. Each cycle:
//!
//! 1. checks for a stop request, the only point at which the loop can stop,
//! 2. reads a position sample from the GPS and notes any change of fix,
//! 3. runs NavCtrl to get a steering command,
//! 4. sends the command to the motors,
//! 5. appends the position to the position log,
//! 6. waits out the rest of the cycle on the stop signal.
//!
//! When the loop stops the motors are disabled exactly once more before
//! returning. Faults in the GPS, motors or log never stop the loop.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::{Duration, Instant};

use comms_if::eqpt::{DriveIntensities, FixState, MotorDems, SteeringCommand};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use util::{module::State, stop::StopSignal};

use crate::gps_client::GpsClient;
use crate::motor_driver::MotorDriver;
use crate::nav_ctrl::{self, NavCtrl};
use crate::params::NavExecParams;
use crate::pos_log::PosLog;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct CtrlLoop {
    nav_ctrl: NavCtrl,

    cycle_period: Duration,

    sensor_fault_action: SensorFaultAction,

    intensities: DriveIntensities,

    /// Last command sent to the motors
    last_cmd: SteeringCommand,

    /// True while NavCtrl reports the robot at the target
    at_target: bool,

    /// Fix state of the GPS at the last cycle
    fix_state: FixState,

    num_consec_cycle_overruns: u64,
}

/// Summary of a run of the control loop.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopReport {
    /// Number of cycles executed
    pub num_cycles: u64,

    /// Number of cycles on which no steering command could be calculated
    pub num_skipped: u64,

    /// Number of cycles which took longer than the cycle period
    pub num_overruns: u64,

    /// Number of times the GPS lost its fix
    pub num_fix_losses: u64,

    /// Command sent on the last cycle, not including the disable sent on stopping
    pub last_cmd: SteeringCommand,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// What to drive when a cycle has no usable position sample.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SensorFaultAction {
    /// Stop the motors
    Disable,

    /// Keep executing the previous command
    HoldLast,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SensorFaultAction {
    fn default() -> Self {
        SensorFaultAction::Disable
    }
}

impl CtrlLoop {
    pub fn new(
        nav_ctrl: NavCtrl,
        cycle_period: Duration,
        sensor_fault_action: SensorFaultAction,
        intensities: DriveIntensities,
    ) -> Self {
        Self {
            nav_ctrl,
            cycle_period,
            sensor_fault_action,
            intensities,
            last_cmd: SteeringCommand::Disabled,
            at_target: false,
            fix_state: FixState::NoFix,
            num_consec_cycle_overruns: 0,
        }
    }

    /// Build the loop from validated executable parameters.
    pub fn from_params(nav_ctrl: NavCtrl, params: &NavExecParams) -> Self {
        Self::new(
            nav_ctrl,
            Duration::from_secs_f64(params.cycle_period_s),
            params.sensor_fault_action,
            params.intensities,
        )
    }

    /// Run the loop until `stop` is requested.
    pub fn run(
        &mut self,
        gps: &mut dyn GpsClient,
        motors: &mut dyn MotorDriver,
        pos_log: &mut PosLog,
        stop: &StopSignal,
    ) -> LoopReport {
        let mut report = LoopReport::default();

        info!(
            "Begining main loop ({:.1} Hz)\n",
            1.0 / self.cycle_period.as_secs_f64()
        );

        loop {
            // Get cycle start time
            let cycle_start_instant = Instant::now();

            if stop.is_stop_requested() {
                break;
            }

            let cmd = self.cycle(gps, motors, pos_log, &mut report);
            report.last_cmd = cmd;
            report.num_cycles += 1;

            // ---- CYCLE MANAGEMENT ----

            let cycle_dur = Instant::now() - cycle_start_instant;

            match self.cycle_period.checked_sub(cycle_dur) {
                Some(d) => {
                    self.num_consec_cycle_overruns = 0;
                    stop.wait_timeout(d);
                }
                None => {
                    self.num_consec_cycle_overruns += 1;
                    report.num_overruns += 1;
                    warn!(
                        "Cycle overran by {:.06} s ({} consecutive)",
                        cycle_dur.as_secs_f64() - self.cycle_period.as_secs_f64(),
                        self.num_consec_cycle_overruns
                    );
                }
            }
        }

        // ---- SHUTDOWN ----

        info!("Stop requested, disabling motors");
        self.dispatch(motors, SteeringCommand::Disabled);

        if let Err(e) = pos_log.flush() {
            warn!("{}", e);
        }

        info!(
            "Main loop stopped after {} cycles ({} skipped, {} overran, fix lost {} times)",
            report.num_cycles, report.num_skipped, report.num_overruns, report.num_fix_losses
        );

        report
    }

    /// Execute a single cycle, returning the command sent to the motors.
    fn cycle(
        &mut self,
        gps: &mut dyn GpsClient,
        motors: &mut dyn MotorDriver,
        pos_log: &mut PosLog,
        report: &mut LoopReport,
    ) -> SteeringCommand {
        // ---- DATA INPUT ----

        let sample = match gps.read_position() {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("No position sample this cycle: {}", e);
                None
            }
        };

        let fix_state = gps.fix_state();
        if fix_state != self.fix_state {
            match fix_state {
                FixState::Fix => info!("GPS fix acquired"),
                FixState::NoFix => {
                    warn!("GPS fix lost");
                    report.num_fix_losses += 1;
                }
            }
            self.fix_state = fix_state;
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        let nav_cmd = match sample {
            Some(sample) => match self.nav_ctrl.proc(&nav_ctrl::InputData { sample }) {
                Ok((output, status_rpt)) => {
                    if status_rpt.at_target && !self.at_target {
                        info!("Target reached ({:.1} m away)", status_rpt.range_m);
                    }
                    self.at_target = status_rpt.at_target;

                    Some(output.cmd)
                }
                Err(e) => {
                    warn!("Error during NavCtrl processing: {}", e);
                    None
                }
            },
            None => None,
        };

        let cmd = match nav_cmd {
            Some(c) => c,
            None => {
                report.num_skipped += 1;
                match self.sensor_fault_action {
                    SensorFaultAction::Disable => SteeringCommand::Disabled,
                    SensorFaultAction::HoldLast => self.last_cmd,
                }
            }
        };

        // ---- MOTOR OUTPUT ----

        self.dispatch(motors, cmd);

        // ---- WRITE ARCHIVES ----

        if let (Some(sample), Some(_)) = (sample, nav_cmd) {
            if let Err(e) = pos_log.append(&sample.position) {
                warn!("{}, position logging disabled", e);
            }
        }

        cmd
    }

    fn dispatch(&mut self, motors: &mut dyn MotorDriver, cmd: SteeringCommand) {
        if cmd != self.last_cmd {
            info!("Steering: {}", cmd.name());
        } else {
            debug!("Steering: {}", cmd.name());
        }

        let dems = MotorDems::from_cmd(cmd, &self.intensities);

        if let Err(e) = motors.drive(&dems) {
            warn!("{}", e);
        }

        self.last_cmd = cmd;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
