//! # Position log
//!
//! Append-only CSV record of every position the robot has navigated from. The
//! file starts with a `lat,lon` header and each record is written with seven
//! decimal places (about 1 cm) and flushed immediately, so the log survives
//! the process being killed.
//!
//! A log which fails to open or write becomes a no-op, losing the log never
//! stops navigation.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::File;
use std::io::Write;
use std::path::Path;

use comms_if::eqpt::GeoPoint;
use csv::{Terminator, Writer, WriterBuilder};
use log::warn;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct PosLog {
    /// `None` once the log has been disabled
    writer: Option<Writer<Box<dyn Write>>>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("Could not open the position log: {0}")]
    OpenFailed(std::io::Error),

    #[error("Could not write to the position log: {0}")]
    WriteFailed(csv::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PosLog {
    /// Create a new log file at the given path, replacing any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let file = File::create(path).map_err(LogError::OpenFailed)?;

        Self::from_writer(file)
    }

    /// Create a new log file, or a disabled log if the file can't be created.
    pub fn create_or_disabled<P: AsRef<Path>>(path: P) -> Self {
        match Self::create(path.as_ref()) {
            Ok(l) => l,
            Err(e) => {
                warn!("{}, positions will not be logged to {:?}", e, path.as_ref());
                Self::disabled()
            }
        }
    }

    /// Create a log writing into any writer. The header is written
    /// immediately.
    pub fn from_writer<W: Write + 'static>(writer: W) -> Result<Self, LogError> {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Box::new(writer) as Box<dyn Write>);

        writer
            .write_record(&["lat", "lon"])
            .map_err(LogError::WriteFailed)?;
        writer
            .flush()
            .map_err(|e| LogError::WriteFailed(e.into()))?;

        Ok(Self {
            writer: Some(writer),
        })
    }

    /// A log which discards everything.
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Append a position to the log.
    ///
    /// On failure the log is disabled and the error returned, all later calls
    /// do nothing.
    pub fn append(&mut self, position: &GeoPoint) -> Result<(), LogError> {
        let writer = match self.writer {
            Some(ref mut w) => w,
            None => return Ok(()),
        };

        let res = writer
            .write_record(&[
                format!("{:.7}", position.lat_deg),
                format!("{:.7}", position.lon_deg),
            ])
            .and_then(|_| writer.flush().map_err(csv::Error::from));

        if let Err(e) = res {
            self.writer = None;
            return Err(LogError::WriteFailed(e));
        }

        Ok(())
    }

    /// Flush any buffered records.
    pub fn flush(&mut self) -> Result<(), LogError> {
        match self.writer {
            Some(ref mut w) => w.flush().map_err(|e| LogError::WriteFailed(e.into())),
            None => Ok(()),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::io;

    /// Writer which accepts the header then fails every write.
    struct FailAfter {
        remaining: usize,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.remaining -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_format() {
        let path = std::env::temp_dir().join("gps_nav_pos_log_test.csv");

        let mut log = PosLog::create(&path).unwrap();
        log.append(&GeoPoint::new(50.364351, -4.141873)).unwrap();
        log.append(&GeoPoint::new(-33.85, 151.2)).unwrap();

        // Records must be on disk before the log is dropped
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "lat,lon\n50.3643510,-4.1418730\n-33.8500000,151.2000000\n"
        );
    }

    #[test]
    fn test_write_failure_disables() {
        let mut log = PosLog::from_writer(FailAfter { remaining: 1 }).unwrap();
        assert!(log.is_enabled());

        match log.append(&GeoPoint::new(50.0, -4.0)) {
            Err(LogError::WriteFailed(_)) => (),
            r => panic!("Expected a write failure, got {:?}", r),
        }
        assert!(!log.is_enabled());

        // Now a no-op
        assert!(log.append(&GeoPoint::new(50.0, -4.0)).is_ok());
    }

    #[test]
    fn test_open_failure_disables() {
        let log = PosLog::create_or_disabled("/nonexistent_dir/pos_log.csv");
        assert!(!log.is_enabled());
    }
}
