//! Simulated motor driver

use comms_if::eqpt::MotorDems;
use log::debug;

use super::{MotorDriver, MotorError};

/// Motor driver which only logs and records the demands it is given.
#[derive(Default, Debug)]
pub struct SimMotorDriver {
    history: Vec<MotorDems>,
}

impl SimMotorDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every set of demands driven so far, oldest first.
    pub fn history(&self) -> &[MotorDems] {
        &self.history
    }
}

impl MotorDriver for SimMotorDriver {
    fn drive(&mut self, dems: &MotorDems) -> Result<(), MotorError> {
        debug!(
            "Sim motors: left {:?} {:.0} %, right {:?} {:.0} %",
            dems.left.direction, dems.left.duty_pct, dems.right.direction, dems.right.duty_pct
        );

        self.history.push(*dems);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::{DriveIntensities, SteeringCommand};

    #[test]
    fn test_records_history() {
        let int = DriveIntensities::default();
        let mut drv = SimMotorDriver::new();

        drv.drive(&MotorDems::from_cmd(SteeringCommand::HardLeft, &int))
            .unwrap();
        drv.drive(&MotorDems::disabled(&int)).unwrap();

        assert_eq!(drv.history().len(), 2);
        assert_eq!(drv.history()[1], MotorDems::disabled(&int));
    }
}
