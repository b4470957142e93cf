//! # GPS Client
//!
//! Provides position samples from a GPS receiver. The control loop only sees
//! the [`GpsClient`] trait, the receiver in use is picked by the `[gps]`
//! section of the executable parameters.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// NMEA 0183 receiver on a serial device
pub mod nmea;

/// Replays a recorded CSV trace
pub mod trace;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::PathBuf;
use std::time::Duration;

use comms_if::eqpt::{FixState, PositionSample};
use log::info;
use serde::Deserialize;

pub use nmea::NmeaGps;
pub use trace::TraceGps;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A source of position samples.
pub trait GpsClient {
    /// Get the latest position sample.
    ///
    /// Any error means there is no usable sample for this cycle.
    fn read_position(&mut self) -> Result<PositionSample, GpsError>;

    /// Current fix state of the receiver.
    fn fix_state(&self) -> FixState;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GpsError {
    #[error("The GPS receiver is not attached")]
    NotAttached,

    #[error("Timed out waiting for data from the GPS receiver")]
    Timeout,

    #[error("Could not read from the GPS receiver: {0}")]
    ReadError(String),

    #[error("The GPS receiver has no position fix")]
    NoFix,
}

/// Parameters selecting and configuring the GPS receiver.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GpsParams {
    /// A receiver streaming NMEA sentences over a serial device. The device
    /// must already be configured for the receiver's baud rate.
    Nmea {
        /// Path to the serial device, e.g. `/dev/ttyACM0`
        device_path: PathBuf,

        /// Maximum time to wait for the first sentence at startup
        #[serde(default = "default_attach_timeout_ms")]
        attach_timeout_ms: u64,

        /// Maximum time to block waiting for a new sentence in one cycle
        #[serde(default = "default_read_timeout_ms")]
        read_timeout_ms: u64,

        /// Age after which the last sentence is no longer used
        #[serde(default = "default_max_sample_age_ms")]
        max_sample_age_ms: u64,
    },

    /// A recorded trace with `lat,lon,heading` columns
    Trace { trace_path: PathBuf },
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the GPS receiver described by the parameters.
///
/// For real receivers this waits for the device to attach, failure to attach
/// is returned as [`GpsError::NotAttached`].
pub fn open(params: &GpsParams) -> Result<Box<dyn GpsClient>, GpsError> {
    match params {
        GpsParams::Nmea {
            device_path,
            attach_timeout_ms,
            read_timeout_ms,
            max_sample_age_ms,
        } => {
            info!("Opening NMEA GPS on {:?}", device_path);

            let mut gps = NmeaGps::open(
                device_path,
                Duration::from_millis(*read_timeout_ms),
                Duration::from_millis(*max_sample_age_ms),
            )?;
            gps.wait_for_attachment(Duration::from_millis(*attach_timeout_ms))?;

            Ok(Box::new(gps))
        }
        GpsParams::Trace { trace_path } => {
            info!("Replaying GPS trace from {:?}", trace_path);

            let gps = TraceGps::from_path(trace_path)?;

            info!("Trace contains {} samples", gps.remaining());

            Ok(Box::new(gps))
        }
    }
}

fn default_attach_timeout_ms() -> u64 {
    5000
}

fn default_read_timeout_ms() -> u64 {
    50
}

fn default_max_sample_age_ms() -> u64 {
    2000
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
