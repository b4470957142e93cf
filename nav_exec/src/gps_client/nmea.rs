//! # NMEA GPS client
//!
//! Reads NMEA 0183 sentences from a serial device. A background thread reads
//! lines as they arrive, runs them through the `nmea0183` parser, which also
//! checks the checksum, and forwards each recommended minimum (`RMC`)
//! sentence to the client over a channel. The client keeps the newest one, so a cycle never waits for the receiver when recent data is at hand.
//!
//! The heading is the course over ground from the RMC sentence. Receivers
//! leave the course empty when stationary, in which case the last reported
//! course is reused.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use comms_if::eqpt::{FixState, GeoPoint, PositionSample};
use log::{debug, info, warn};
use nmea0183::{ParseResult, Parser};

use super::{GpsClient, GpsError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// GPS client for an NMEA receiver.
pub struct NmeaGps {
    rx: Receiver<Result<NmeaEvent, GpsError>>,

    /// Newest event and the time it was recieved
    latest: Option<(Instant, NmeaEvent)>,

    fix_state: FixState,

    read_timeout: Duration,

    max_sample_age: Duration,
}

/// The content of an RMC sentence that navigation cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmcSentence {
    /// True if the receiver flagged the data as valid (`A`)
    pub valid: bool,

    /// Position, `None` if the fields were empty
    pub position: Option<GeoPoint>,

    /// Course over ground, `None` if the field was empty.
    ///
    /// Units: degrees
    pub course_deg: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Events passed from the reader thread to the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NmeaEvent {
    Fix(PositionSample),
    NoFix,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NmeaGps {
    /// Open the receiver on the given serial device.
    ///
    /// This does not wait for the receiver to send anything, use
    /// [`NmeaGps::wait_for_attachment`] for that.
    pub fn open<P: AsRef<Path>>(
        device_path: P,
        read_timeout: Duration,
        max_sample_age: Duration,
    ) -> Result<Self, GpsError> {
        let file = File::open(device_path.as_ref()).map_err(|e| {
            warn!("Cannot open GPS device {:?}: {}", device_path.as_ref(), e);
            GpsError::NotAttached
        })?;

        Self::from_reader(BufReader::new(file), read_timeout, max_sample_age)
    }

    /// Create a client reading sentences from any line source.
    pub fn from_reader<R>(
        reader: R,
        read_timeout: Duration,
        max_sample_age: Duration,
    ) -> Result<Self, GpsError>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = channel();

        thread::Builder::new()
            .name("nmea_reader".into())
            .spawn(move || reader_thread(reader, tx))
            .map_err(|e| GpsError::ReadError(format!("cannot spawn reader thread: {}", e)))?;

        Ok(Self::from_receiver(rx, read_timeout, max_sample_age))
    }

    fn from_receiver(
        rx: Receiver<Result<NmeaEvent, GpsError>>,
        read_timeout: Duration,
        max_sample_age: Duration,
    ) -> Self {
        Self {
            rx,
            latest: None,
            fix_state: FixState::NoFix,
            read_timeout,
            max_sample_age,
        }
    }

    /// Block until the receiver sends its first RMC sentence.
    ///
    /// Returns [`GpsError::NotAttached`] if nothing arrives within `timeout`.
    pub fn wait_for_attachment(&mut self, timeout: Duration) -> Result<(), GpsError> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                info!("GPS receiver attached");
                self.update(event);
                Ok(())
            }
            Ok(Err(e)) => {
                warn!("GPS receiver failed while attaching: {}", e);
                Err(GpsError::NotAttached)
            }
            Err(_) => Err(GpsError::NotAttached),
        }
    }

    /// Record a new event from the reader thread.
    fn update(&mut self, event: NmeaEvent) {
        self.fix_state = match event {
            NmeaEvent::Fix(_) => FixState::Fix,
            NmeaEvent::NoFix => FixState::NoFix,
        };

        self.latest = Some((Instant::now(), event));
    }

    fn latest_is_fresh(&self) -> bool {
        match self.latest {
            Some((t, _)) => t.elapsed() < self.max_sample_age,
            None => false,
        }
    }
}

impl GpsClient for NmeaGps {
    fn read_position(&mut self) -> Result<PositionSample, GpsError> {
        // Drain everything already recieved, keeping only the newest
        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => self.update(event),
                Ok(Err(e)) => return Err(e),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(GpsError::NotAttached),
            }
        }

        // Wait a short time for new data if what we have is too old
        if !self.latest_is_fresh() {
            match self.rx.recv_timeout(self.read_timeout) {
                Ok(Ok(event)) => self.update(event),
                Ok(Err(e)) => return Err(e),
                Err(RecvTimeoutError::Timeout) => return Err(GpsError::Timeout),
                Err(RecvTimeoutError::Disconnected) => return Err(GpsError::NotAttached),
            }
        }

        match self.latest {
            Some((_, NmeaEvent::Fix(sample))) => Ok(sample),
            Some((_, NmeaEvent::NoFix)) => Err(GpsError::NoFix),
            None => Err(GpsError::Timeout),
        }
    }

    fn fix_state(&self) -> FixState {
        self.fix_state
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Feed one line through the NMEA parser.
///
/// Line terminators are stripped by the reader so the `\r\n` which ends a
/// sentence is fed back in. Returns `None` if the line did not complete a
/// sentence.
fn parse_line(parser: &mut Parser, line: &str) -> Option<Result<ParseResult, &'static str>> {
    let mut result = None;

    for &byte in line.trim().as_bytes().iter().chain(b"\r\n") {
        if let Some(r) = parser.parse_from_byte(byte) {
            result = Some(r);
        }
    }

    result
}

/// Extract the RMC content from a parse result, `None` for other sentences.
fn rmc_sentence(result: ParseResult) -> Option<RmcSentence> {
    match result {
        ParseResult::RMC(Some(rmc)) => Some(RmcSentence {
            valid: true,
            position: Some(GeoPoint::new(rmc.latitude.as_f64(), rmc.longitude.as_f64())),
            course_deg: rmc.course.as_ref().map(|c| c.degrees as f64),
        }),
        // Status `V`, the receiver has no fix
        ParseResult::RMC(None) => Some(RmcSentence {
            valid: false,
            position: None,
            course_deg: None,
        }),
        _ => None,
    }
}

/// Read lines until the source ends or the client goes away, forwarding every
/// RMC sentence as an event.
fn reader_thread<R: BufRead>(reader: R, tx: Sender<Result<NmeaEvent, GpsError>>) {
    let mut parser = Parser::new();
    let mut last_course_deg = std::f64::NAN;

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tx.send(Err(GpsError::ReadError(e.to_string()))).ok();
                return;
            }
        };

        let rmc = match parse_line(&mut parser, &line) {
            Some(Ok(result)) => match rmc_sentence(result) {
                Some(r) => r,
                None => continue,
            },
            Some(Err(e)) => {
                debug!("Discarding NMEA sentence {:?}: {}", line, e);
                continue;
            }
            None => continue,
        };

        if let Some(c) = rmc.course_deg {
            last_course_deg = c;
        }

        let event = match (rmc.valid, rmc.position) {
            (true, Some(position)) => NmeaEvent::Fix(PositionSample {
                position,
                heading_deg: last_course_deg,
            }),
            _ => NmeaEvent::NoFix,
        };

        // Client dropped, nothing left to do
        if tx.send(Ok(event)).is_err() {
            return;
        }
    }

    tx.send(Err(GpsError::ReadError("end of NMEA stream".into()))).ok();
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    const RMC_FIX: &str = "$GPRMC,123519,A,5021.8611,N,00408.5124,W,0.5,084.4,230394,003.1,W*7D";
    const RMC_NO_COURSE: &str = "$GNRMC,123520.00,A,5021.8611,N,00408.5124,W,0.5,,230394,,,A*77";
    const RMC_NO_FIX: &str = "$GPRMC,123521,V,,,,,,,230394,,*38";
    const GGA: &str = "$GPGGA,123519,5021.8611,N,00408.5124,W,1,08,0.9,545.4,M,46.9,M,,*51";
    const RMC_SOUTH_EAST: &str = "$GPRMC,123522,A,3351.0000,S,15112.0000,E,0.0,270.0,230394,,*0D";

    fn parse(parser: &mut Parser, line: &str) -> Option<RmcSentence> {
        match parse_line(parser, line) {
            Some(Ok(result)) => rmc_sentence(result),
            _ => None,
        }
    }

    #[test]
    fn test_parse_rmc() {
        let mut parser = Parser::new();

        let rmc = parse(&mut parser, RMC_FIX).unwrap();
        assert!(rmc.valid);
        let p = rmc.position.unwrap();
        assert!((p.lat_deg - 50.3643517).abs() < 1e-4);
        assert!((p.lon_deg + 4.1418733).abs() < 1e-4);
        assert!((rmc.course_deg.unwrap() - 84.4).abs() < 1e-4);

        let rmc = parse(&mut parser, RMC_SOUTH_EAST).unwrap();
        let p = rmc.position.unwrap();
        assert!((p.lat_deg + 33.85).abs() < 1e-4);
        assert!((p.lon_deg - 151.2).abs() < 1e-4);
        assert!((rmc.course_deg.unwrap() - 270.0).abs() < 1e-4);

        let rmc = parse(&mut parser, RMC_NO_COURSE).unwrap();
        assert!(rmc.valid);
        assert_eq!(rmc.course_deg, None);

        let rmc = parse(&mut parser, RMC_NO_FIX).unwrap();
        assert!(!rmc.valid);
        assert_eq!(rmc.position, None);
    }

    #[test]
    fn test_parse_other_and_invalid() {
        let mut parser = Parser::new();

        // Valid, but not an RMC sentence
        assert!(matches!(parse_line(&mut parser, GGA), Some(Ok(_))));
        assert_eq!(parse(&mut parser, GGA), None);

        // Corrupt one digit of the latitude
        let corrupt = RMC_FIX.replace("5021.8611", "5021.8612");
        assert!(matches!(parse_line(&mut parser, &corrupt), Some(Err(_))));

        // Malformed checksums
        for bad in &["*+7D", "*07D", "*7"] {
            let line = RMC_FIX.replace("*7D", bad);
            assert!(
                !matches!(parse_line(&mut parser, &line), Some(Ok(_))),
                "{:?} was accepted",
                line
            );
        }

        // The parser recovers once a good sentence arrives
        assert!(parse(&mut parser, RMC_FIX).is_some());
    }

    #[test]
    fn test_reader_thread_rejects_bad_checksums() {
        let stream = format!(
            "{}\r\n{}\r\n{}\r\n",
            RMC_FIX.replace("*7D", "*+7D"),
            RMC_FIX.replace("*7D", "*07D"),
            RMC_FIX.replace("5021.8611", "5021.8612"),
        );
        let (tx, rx) = channel();

        reader_thread(Cursor::new(stream), tx);

        // Only the end of stream comes through
        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.len(), 1);
        match events[0] {
            Err(GpsError::ReadError(_)) => (),
            ref e => panic!("Expected end of stream, got {:?}", e),
        }
    }

    #[test]
    fn test_reader_thread_events() {
        let stream = format!(
            "{}\r\n{}\r\ngarbage\r\n{}\r\n{}\r\n",
            GGA, RMC_FIX, RMC_NO_COURSE, RMC_NO_FIX
        );
        let (tx, rx) = channel();

        reader_thread(Cursor::new(stream), tx);

        let events: Vec<_> = rx.iter().collect();
        assert_eq!(events.len(), 4);

        match events[0] {
            Ok(NmeaEvent::Fix(s)) => assert!((s.heading_deg - 84.4).abs() < 1e-4),
            ref e => panic!("Expected a fix, got {:?}", e),
        }

        // Course carried over from the previous sentence
        match events[1] {
            Ok(NmeaEvent::Fix(s)) => assert!((s.heading_deg - 84.4).abs() < 1e-4),
            ref e => panic!("Expected a fix, got {:?}", e),
        }

        assert_eq!(events[2], Ok(NmeaEvent::NoFix));

        match events[3] {
            Err(GpsError::ReadError(_)) => (),
            ref e => panic!("Expected end of stream, got {:?}", e),
        }
    }

    #[test]
    fn test_client_keeps_newest_sample() {
        let (tx, rx) = channel();
        let mut gps = NmeaGps::from_receiver(rx, Duration::from_millis(10), Duration::from_secs(60));

        // Nothing yet
        assert_eq!(gps.read_position(), Err(GpsError::Timeout));

        let a = PositionSample::new(50.0, -4.0, 10.0);
        let b = PositionSample::new(50.1, -4.1, 20.0);
        tx.send(Ok(NmeaEvent::Fix(a))).unwrap();
        tx.send(Ok(NmeaEvent::Fix(b))).unwrap();

        assert_eq!(gps.read_position(), Ok(b));
        assert_eq!(gps.fix_state(), FixState::Fix);

        // Still fresh, reused without waiting
        assert_eq!(gps.read_position(), Ok(b));

        tx.send(Ok(NmeaEvent::NoFix)).unwrap();
        assert_eq!(gps.read_position(), Err(GpsError::NoFix));
        assert_eq!(gps.fix_state(), FixState::NoFix);

        drop(tx);
        assert_eq!(gps.read_position(), Err(GpsError::NotAttached));
    }

    #[test]
    fn test_stale_sample_times_out() {
        let (tx, rx) = channel();
        let mut gps = NmeaGps::from_receiver(rx, Duration::from_millis(10), Duration::from_millis(0));

        tx.send(Ok(NmeaEvent::Fix(PositionSample::new(50.0, -4.0, 10.0))))
            .unwrap();

        // Every sample is immediately stale, so after the drain a new one is
        // waited for and never comes
        assert_eq!(gps.read_position(), Err(GpsError::Timeout));
    }

    #[test]
    fn test_attachment() {
        let mut gps = NmeaGps::from_reader(
            Cursor::new(format!("{}\n", RMC_FIX)),
            Duration::from_millis(10),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(gps.wait_for_attachment(Duration::from_secs(5)), Ok(()));
        assert_eq!(gps.fix_state(), FixState::Fix);

        // A source which ends without sending anything never attaches
        let mut gps = NmeaGps::from_reader(
            Cursor::new(String::new()),
            Duration::from_millis(10),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(
            gps.wait_for_attachment(Duration::from_secs(5)),
            Err(GpsError::NotAttached)
        );
    }
}
