//! # Trace GPS client
//!
//! Replays a recorded trace one row per cycle. The trace is a CSV file with a
//! `lat,lon,heading` header. Rows with empty `lat` or `lon` fields stand for
//! cycles on which the receiver had no fix.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::collections::VecDeque;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use comms_if::eqpt::{FixState, PositionSample};
use serde::Deserialize;

use super::{GpsClient, GpsError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// GPS client replaying a recorded trace.
pub struct TraceGps {
    /// Remaining rows, `None` for rows without a fix
    samples: VecDeque<Option<PositionSample>>,

    fix_state: FixState,
}

#[derive(Deserialize)]
struct TraceRow {
    lat: Option<f64>,
    lon: Option<f64>,
    heading: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TraceGps {
    /// Load a trace from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GpsError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            GpsError::ReadError(format!("cannot open trace {:?}: {}", path.as_ref(), e))
        })?;

        Self::from_reader(file)
    }

    /// Load a trace from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GpsError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut samples = VecDeque::new();

        for (i, row) in rdr.deserialize::<TraceRow>().enumerate() {
            let row = row.map_err(|e| GpsError::ReadError(format!("bad trace row {}: {}", i + 1, e)))?;

            samples.push_back(match (row.lat, row.lon) {
                (Some(lat), Some(lon)) => Some(PositionSample::new(
                    lat,
                    lon,
                    row.heading.unwrap_or(std::f64::NAN),
                )),
                _ => None,
            });
        }

        Ok(Self {
            samples,
            fix_state: FixState::NoFix,
        })
    }

    /// Number of rows not yet replayed.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl GpsClient for TraceGps {
    fn read_position(&mut self) -> Result<PositionSample, GpsError> {
        match self.samples.pop_front() {
            Some(Some(sample)) => {
                self.fix_state = FixState::Fix;
                Ok(sample)
            }
            Some(None) => {
                self.fix_state = FixState::NoFix;
                Err(GpsError::NoFix)
            }
            None => Err(GpsError::ReadError("end of trace".into())),
        }
    }

    fn fix_state(&self) -> FixState {
        self.fix_state
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_replay() {
        let trace = "lat,lon,heading\n\
                     50.3633510, -4.1433730, 0.0\n\
                     ,,\n\
                     50.3647510,-4.1419730,\n";

        let mut gps = TraceGps::from_reader(trace.as_bytes()).unwrap();
        assert_eq!(gps.remaining(), 3);
        assert_eq!(gps.fix_state(), FixState::NoFix);

        assert_eq!(
            gps.read_position(),
            Ok(PositionSample::new(50.363351, -4.143373, 0.0))
        );
        assert_eq!(gps.fix_state(), FixState::Fix);

        assert_eq!(gps.read_position(), Err(GpsError::NoFix));
        assert_eq!(gps.fix_state(), FixState::NoFix);

        let s = gps.read_position().unwrap();
        assert_eq!(s.position.lat_deg, 50.364751);
        assert!(s.heading_deg.is_nan());

        assert_eq!(gps.remaining(), 0);
        match gps.read_position() {
            Err(GpsError::ReadError(_)) => (),
            r => panic!("Expected end of trace, got {:?}", r),
        }
    }

    #[test]
    fn test_bad_row_rejected() {
        let trace = "lat,lon,heading\n50.0,north,0.0\n";
        match TraceGps::from_reader(trace.as_bytes()) {
            Err(GpsError::ReadError(_)) => (),
            Ok(_) => panic!("Expected a bad row error"),
            Err(e) => panic!("Expected a bad row error, got {}", e),
        }
    }
}
