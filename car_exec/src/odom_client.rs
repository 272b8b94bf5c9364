//! # Odometry client
//!
//! The odometry client recieves vehicle state observations published by the
//! odometry source. Observations can arrive faster or slower than the
//! control cycle, the executive drains them all each cycle and keeps the
//! most recent.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::odom::VehicleState,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Odometry subscription client
pub struct OdomClient {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OdomClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the odometry topic: {0}")]
    SubscribeError(zmq::Error),

    #[error("Could not recieve a message from the odometry source: {0}")]
    RecvError(zmq::Error),

    #[error("Could not parse the recieved vehicle state: {0}")]
    StateParseError(serde_json::Error),

    #[error("The odometry source sent a message which was not valid UTF-8")]
    NonUtf8Message,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OdomClient {
    /// Create a new instance of the odometry client.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, OdomClientError> {
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
        let socket = MonitoredSocket::new(ctx, zmq::SUB, socket_options, &params.odom_endpoint)
            .map_err(OdomClientError::SocketError)?;

        // Subscribe to all messages on the endpoint
        socket
            .set_subscribe(b"")
            .map_err(OdomClientError::SubscribeError)?;

        // Create self
        Ok(Self { socket })
    }

    /// Recieve a single vehicle state observation.
    ///
    /// Call in a loop until `Ok(None)` to drain the backlog, keeping only
    /// the last observation returned.
    pub fn recieve_state(&self) -> Result<Option<VehicleState>, OdomClientError> {
        // Attempt to read a string from the socket
        let state_str = match self.socket.recv_string(0) {
            // Valid message
            Ok(Ok(s)) => s,
            // Non UTF-8 message
            Ok(Err(_)) => return Err(OdomClientError::NonUtf8Message),
            // No message in timeout
            Err(zmq::Error::EAGAIN) => return Ok(None),
            // Recieve error
            Err(e) => return Err(OdomClientError::RecvError(e)),
        };

        // Parse the state
        serde_json::from_str(&state_str)
            .map(Some)
            .map_err(OdomClientError::StateParseError)
    }
}
