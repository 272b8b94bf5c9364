//! # Actuation server
//!
//! The actuation server publishes the per-cycle actuation command to the
//! vehicle's actuation system. Exactly one command is published every cycle,
//! so the actuation side can treat a silent link as a reason to stop.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::act::ActCmd,
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Actuation command server
pub struct ActServer {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ActServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the actuation command: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the actuation command: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActServer {
    /// Create a new instance of the actuation server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, ActServerError> {
        // Create the socket options
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            bind: true,
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
        let socket = MonitoredSocket::new(ctx, zmq::PUB, socket_options, &params.act_endpoint)
            .map_err(ActServerError::SocketError)?;

        // Create self
        Ok(Self { socket })
    }

    /// Publish the actuation command for this cycle.
    pub fn send(&mut self, act_cmd: &ActCmd) -> Result<(), ActServerError> {
        // Serialize the command
        let cmd_string =
            serde_json::to_string(act_cmd).map_err(ActServerError::SerializationError)?;

        // Send the command
        self.socket
            .send(&cmd_string, 0)
            .map_err(ActServerError::SendError)
    }
}
