//! Control station command line tool.
//!
//! Issues commands to the car executive and publishes plans to it. Each
//! invocation performs a single operation and exits, the executive keeps the
//! session state.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use structopt::StructOpt;

// Internal
use comms_if::{
    net::{zmq, MonitoredSocket, NetParams, SocketOptions},
    plan::Plan,
    tc::{CtrlRequest, CtrlResponse, TrackingCmd},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time to wait between connecting the plan publisher and sending the plan.
///
/// Subscriptions take a moment to propagate after the connection comes up,
/// anything published before that is silently dropped.
const PLAN_SETTLE_TIME_MS: u64 = 500;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Control station for the car control software.
#[derive(Debug, StructOpt)]
#[structopt(name = "ctrl_station")]
enum Opt {
    /// Begin tracking the staged plan
    Start,

    /// Stop tracking and return the executive to idle
    Stop,

    /// Query the executive for its latest vehicle state observation
    State,

    /// Publish a plan file to the executive
    Plan {
        /// Path to the JSON plan file
        #[structopt(parse(from_os_str))]
        file: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // Parse the command line options
    let opt = Opt::from_args();

    // Load the network parameters to find the executive
    let net_params: NetParams =
        util::params::load("net.toml").wrap_err("Could not load net params")?;

    let zmq_ctx = zmq::Context::new();

    match opt {
        Opt::Start => {
            let response = send_request(
                &zmq_ctx,
                &net_params.cmd_endpoint,
                &CtrlRequest::Track(TrackingCmd::StartTracking),
            )?;
            println!("Response: {:?}", response);
        }
        Opt::Stop => {
            let response = send_request(
                &zmq_ctx,
                &net_params.cmd_endpoint,
                &CtrlRequest::Track(TrackingCmd::StopTracking),
            )?;
            println!("Response: {:?}", response);
        }
        Opt::State => {
            let response = send_request(&zmq_ctx, &net_params.cmd_endpoint, &CtrlRequest::GetState)?;

            match response {
                CtrlResponse::State {
                    veh_state: Some(state),
                } => println!("{:#?}", state),
                CtrlResponse::State { veh_state: None } => {
                    println!("The executive has no vehicle state observation yet")
                }
                r => println!("Unexpected response: {:?}", r),
            }
        }
        Opt::Plan { file } => publish_plan(&zmq_ctx, &net_params.plan_endpoint, &file)?,
    }

    Ok(())
}

/// Send a single request to the executive and wait for the response.
fn send_request(
    ctx: &zmq::Context,
    endpoint: &str,
    request: &CtrlRequest,
) -> Result<CtrlResponse, Report> {
    // Create the socket options
    let socket_options = SocketOptions {
        connect_timeout: 5000,
        recv_timeout: 5000,
        send_timeout: 1000,
        req_correlate: true,
        req_relaxed: true,
        ..Default::default()
    };

    // Connect the socket, blocking until the executive is reachable
    let socket = MonitoredSocket::new(ctx, zmq::REQ, socket_options, endpoint)
        .wrap_err("Could not connect to the executive")?;

    // Send the request
    socket
        .send(&request.to_json(), 0)
        .wrap_err("Could not send the request")?;

    // Wait for the response
    let response_str = match socket.recv_string(0) {
        Ok(Ok(s)) => s,
        Ok(Err(_)) => return Err(eyre!("The executive sent a non UTF-8 response")),
        Err(e) => return Err(e).wrap_err("Could not recieve a response from the executive"),
    };

    // Parse the response
    serde_json::from_str(&response_str).wrap_err("Could not parse the response")
}

/// Publish the plan in the given file to the executive.
fn publish_plan(ctx: &zmq::Context, endpoint: &str, file: &PathBuf) -> Result<(), Report> {
    // Read and validate the plan before connecting anything
    let plan_str = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("Could not read the plan file {:?}", file))?;

    let plan: Plan = serde_json::from_str(&plan_str).wrap_err("The plan file is not valid")?;

    // Create the socket options
    let socket_options = SocketOptions {
        connect_timeout: 5000,
        send_timeout: 1000,
        ..Default::default()
    };

    // Connect the socket, blocking until the executive is reachable
    let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, endpoint)
        .wrap_err("Could not connect to the executive")?;

    thread::sleep(Duration::from_millis(PLAN_SETTLE_TIME_MS));

    // Send the validated form of the plan
    let plan_json = serde_json::to_string(&plan).wrap_err("Could not serialize the plan")?;
    socket
        .send(&plan_json, 0)
        .wrap_err("Could not send the plan")?;

    println!(
        "Plan published: {} segment(s), {} pose(s)",
        plan.num_segments(),
        plan.num_poses()
    );

    Ok(())
}
