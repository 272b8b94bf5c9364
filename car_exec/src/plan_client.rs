//! # Plan client
//!
//! The plan client recieves plans published by the planner. The executive
//! binds the plan endpoint and the planner connects to it whenever it has a
//! plan to deliver.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
    plan::Plan,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Plan subscription client
pub struct PlanClient {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the plan topic: {0}")]
    SubscribeError(zmq::Error),

    #[error("Could not recieve a message from the planner: {0}")]
    RecvError(zmq::Error),

    #[error("Could not parse the recieved plan: {0}")]
    PlanParseError(serde_json::Error),

    #[error("The planner sent a message which was not valid UTF-8")]
    NonUtf8Message,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PlanClient {
    /// Create a new instance of the plan client.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, PlanClientError> {
        // Create the socket options
        let socket_options = SocketOptions {
            bind: true,
            block_on_first_connect: false,
            connect_timeout: 1000,
            heartbeat_ivl: 500,
            heartbeat_ttl: 1000,
            heartbeat_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        // Bind the socket
        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.plan_endpoint)
            .map_err(PlanClientError::SocketError)?;

        // Subscribe to all messages on the endpoint
        socket
            .set_subscribe(b"")
            .map_err(PlanClientError::SubscribeError)?;

        // Create self
        Ok(Self { socket })
    }

    /// Recieve a single plan from the planner.
    ///
    /// Call in a loop until `Ok(None)`, which indicates there are no more
    /// pending plans right now.
    pub fn recieve_plan(&self) -> Result<Option<Plan>, PlanClientError> {
        // Attempt to read a string from the socket
        let plan_str = match self.socket.recv_string(0) {
            // Valid message
            Ok(Ok(s)) => s,
            // Non UTF-8 message
            Ok(Err(_)) => return Err(PlanClientError::NonUtf8Message),
            // No message in timeout
            Err(zmq::Error::EAGAIN) => return Ok(None),
            // Recieve error
            Err(e) => return Err(PlanClientError::RecvError(e)),
        };

        // Parse the plan
        serde_json::from_str(&plan_str)
            .map(Some)
            .map_err(PlanClientError::PlanParseError)
    }
}
