//! Main car-side executive entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - System input acquisition:
//!             - Odometry draining
//!             - Plan draining
//!         - Command request processing and handling
//!         - Tracking manager processing
//!         - Actuation command output
//!         - Telemetry output
//!
//! One actuation command is published on every cycle without exception. The
//! tracking manager guarantees that the command is the fail safe whenever a
//! plan is not actively being tracked.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use car_lib::{
    act_server::ActServer,
    cmd_server::{CmdServer, CmdServerError},
    data_store::DataStore,
    odom_client::{OdomClient, OdomClientError},
    plan_client::{PlanClient, PlanClientError},
    tm_server::TmServer,
    track_mgr::TrackMgr,
};
use comms_if::{
    net::NetParams,
    tc::{CtrlRequest, CtrlResponse},
};
use pursuit::PursuitTracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.10;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("car_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Car Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.track_mgr =
        TrackMgr::init("track_mgr.toml").wrap_err("Failed to initialise the tracking manager")?;
    info!("TrackMgr init complete");

    let mut tracker =
        PursuitTracker::init("pursuit.toml").wrap_err("Failed to initialise the pursuit tracker")?;
    info!("PursuitTracker init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let cmd_server = {
        let s = CmdServer::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise the CmdServer")?;
        info!("CmdServer initialised");
        s
    };

    let plan_client = {
        let c = PlanClient::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise the PlanClient")?;
        info!("PlanClient initialised");
        c
    };

    let odom_client = {
        let c = OdomClient::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise the OdomClient")?;
        info!("OdomClient initialised");
        c
    };

    let mut act_server = {
        let s = ActServer::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise the ActServer")?;
        info!("ActServer initialised");
        s
    };

    let mut tm_server = {
        let s =
            TmServer::new(&zmq_ctx, &net_params).wrap_err("Failed to initialise the TmServer")?;
        info!("TmServer initialised");
        s
    };

    info!("Network initialisation complete");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        // Drain all pending odometry, keeping only the latest observation
        loop {
            match odom_client.recieve_state() {
                Ok(Some(state)) => ds.odom.update(state),
                Ok(None) => break,
                Err(OdomClientError::StateParseError(e)) => {
                    warn!("Could not parse recieved vehicle state: {}", e);
                    break;
                }
                Err(OdomClientError::NonUtf8Message) => {
                    warn!("Non UTF-8 message from the odometry source");
                    break;
                }
                Err(e) => {
                    return Err(e).wrap_err("An error occured while recieving odometry")
                }
            }
        }

        // Drain all pending plans, each one is offered to the manager in turn
        loop {
            match plan_client.recieve_plan() {
                Ok(Some(plan)) => {
                    ds.track_mgr.submit_plan(plan);
                }
                Ok(None) => break,
                Err(PlanClientError::PlanParseError(e)) => {
                    warn!("Could not parse recieved plan: {}", e);
                    break;
                }
                Err(PlanClientError::NonUtf8Message) => {
                    warn!("Non UTF-8 message from the planner");
                    break;
                }
                Err(e) => return Err(e).wrap_err("An error occured while recieving plans"),
            }
        }

        // ---- COMMAND PROCESSING ----

        // Get requests until none remain
        loop {
            match cmd_server.recieve_request() {
                Ok(Some(request)) => {
                    let response = match request {
                        CtrlRequest::Track(cmd) => {
                            match ds.track_mgr.handle_command(cmd, &mut tracker) {
                                true => CtrlResponse::Ack,
                                false => CtrlResponse::Invalid,
                            }
                        }
                        CtrlRequest::GetState => CtrlResponse::State {
                            veh_state: ds.odom.current(),
                        },
                    };

                    // Print warning if couldn't send the response
                    match cmd_server.send_response(&response) {
                        Ok(_) => (),
                        Err(e) => warn!("Could not respond to the request: {}", e),
                    }
                }
                Ok(None) => break,
                // The invalid response has already been sent by the server
                Err(CmdServerError::RequestParseError(e)) => {
                    warn!("Could not parse recieved request: {}", e);
                    break;
                }
                Err(CmdServerError::NonUtf8Request) => {
                    warn!("Non UTF-8 request from the control station");
                    break;
                }
                Err(e) => {
                    return Err(e).wrap_err("An error occured while recieving requests")
                }
            }
        }

        // ---- TRACKING PROCESSING ----

        let veh_state = ds.odom.current();
        let (act_cmd, report) = ds.track_mgr.tick(&mut tracker, veh_state.as_ref());
        ds.act_cmd = act_cmd;
        ds.track_status_rpt = report;

        // Log the tracking status on the 1Hz boundary
        if ds.is_1_hz_cycle {
            debug!(
                "Tracking status: {:?}, act_cmd: {:?}",
                ds.track_status_rpt.status, ds.act_cmd
            );
        }

        // ---- ACTUATION OUTPUT ----

        match act_server.send(&ds.act_cmd) {
            Ok(_) => (),
            Err(e) => warn!("ActServer error: {}", e),
        };

        // ---- TELEMETRY ----

        match tm_server.send(&ds) {
            Ok(_) => (),
            Err(e) => warn!("TmServer error: {}", e),
        };

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - Duration::from_secs_f64(CYCLE_PERIOD_S).as_secs_f64()
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }
}
