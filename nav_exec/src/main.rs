//! Main navigation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise session, logging and parameters
//!     - Attach the GPS receiver and open the motor driver
//!     - Main loop, until SIGINT or SIGTERM:
//!         - Position acquisition
//!         - Navigation control processing
//!         - Motor output
//!         - Position logging
//!     - Disable the motors
//!
//! # Modules
//!
//! All processing modules (e.g. `nav_ctrl`) shall provide a public struct implementing the
//! `util::module::State` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;
use structopt::StructOpt;

// Internal
use nav_lib::{
    ctrl_loop::CtrlLoop, gps_client, motor_driver, nav_ctrl::NavCtrl, params::NavExecParams,
    pos_log::PosLog,
};
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
    stop::StopSignal,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// GPS waypoint navigation executable.
#[derive(Debug, StructOpt)]
#[structopt(name = "nav_exec")]
struct Opts {
    /// Executable parameter file, relative to the params directory
    #[structopt(long, default_value = "nav_exec.toml")]
    params: String,

    /// Navigation control parameter file, relative to the params directory
    #[structopt(long, default_value = "nav_ctrl.toml")]
    nav_ctrl_params: String,

    /// Minimum level of log messages, one of `info`, `debug` or `trace`
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("nav_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("GPS Waypoint Navigation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: NavExecParams = util::params::load(&opts.params)
        .wrap_err("Could not load the executable parameters")?;
    exec_params
        .validate()
        .wrap_err("The executable parameters are invalid")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut nav_ctrl = NavCtrl::default();

    nav_ctrl
        .init(opts.nav_ctrl_params.clone(), &session)
        .wrap_err("Failed to initialise NavCtrl")?;
    info!("NavCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE EQUIPMENT ----

    info!("Initialising equipment");

    let mut gps = gps_client::open(&exec_params.gps).wrap_err("Failed to open the GPS receiver")?;
    info!("GpsClient initialised");

    let mut motors =
        motor_driver::open(&exec_params.motors).wrap_err("Failed to open the motor driver")?;
    info!("MotorDriver initialised");

    let pos_log_path = session.file_path(&exec_params.pos_log_file_name);
    let mut pos_log = PosLog::create_or_disabled(&pos_log_path);
    if pos_log.is_enabled() {
        info!("Logging positions to {:?}", pos_log_path);
    }

    info!("Equipment initialisation complete\n");

    // ---- SIGNAL HANDLING ----

    let stop = StopSignal::new();
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.request_stop())
            .wrap_err("Could not set the signal handler")?;
    }

    // ---- MAIN LOOP ----

    let report = CtrlLoop::from_params(nav_ctrl, &exec_params).run(
        &mut *gps,
        &mut *motors,
        &mut pos_log,
        &stop,
    );

    // ---- SHUTDOWN ----

    info!("Last steering command: {}", report.last_cmd.name());
    info!("End of execution");

    Ok(())
}
