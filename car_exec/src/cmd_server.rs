//! # Command server
//!
//! The command server answers requests from the control station over a
//! REP socket. Requests arrive as JSON envelopes and every request gets
//! exactly one response.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    net::{zmq, MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions},
    tc::{CmdParseError, CtrlRequest, CtrlResponse},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Command request server
pub struct CmdServer {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CmdServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send a response to the client: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a request from the client: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the response: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not parse the recieved request: {0}")]
    RequestParseError(CmdParseError),

    #[error("The client sent a message which was not valid UTF-8")]
    NonUtf8Request,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl CmdServer {
    /// Create a new instance of the command server.
    ///
    /// Binds the command endpoint and returns without waiting for a client,
    /// clients come and go over the life of the executive.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, CmdServerError> {
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
        let socket = MonitoredSocket::new(ctx, zmq::REP, socket_options, &params.cmd_endpoint)
            .map_err(CmdServerError::SocketError)?;

        // Create self
        Ok(Self { socket })
    }

    /// Recieve a single request from a client.
    ///
    /// The protocol here is to call recieve_request in a loop until `Ok(None)`
    /// is returned, indicating that there are no more pending requests right
    /// now.
    ///
    /// After recieving a valid request the server must send a response using
    /// `.send_response()` before attempting to recieve another request. If an
    /// error occurs in parsing the request the response is sent automatically
    /// by this function.
    ///
    /// No connection check is made before reading. One-shot clients connect,
    /// issue a single request, and disconnect, so an unconnected socket is
    /// the normal quiescent state of this server.
    pub fn recieve_request(&self) -> Result<Option<CtrlRequest>, CmdServerError> {
        // Attempt to read a string from the socket
        let request_str = match self.socket.recv_string(0) {
            // Valid message
            Ok(Ok(s)) => s,
            // Non UTF-8 message
            Ok(Err(_)) => {
                // Send invalid message response
                self.send_response(&CtrlResponse::Invalid)?;

                return Err(CmdServerError::NonUtf8Request);
            }
            // No message in timeout
            Err(zmq::Error::EAGAIN) => return Ok(None),
            // Recieve error
            Err(e) => {
                // No response is sent if we could not recieve
                return Err(CmdServerError::RecvError(e));
            }
        };

        // Parse the request
        CtrlRequest::from_json(&request_str)
            .map_err(|e| {
                // Send the invalid response, the parse error takes precedence
                // over any send failure here
                self.send_response(&CtrlResponse::Invalid).ok();

                CmdServerError::RequestParseError(e)
            })
            .map(Some)
    }

    /// Send the given response back to the client.
    ///
    /// This function must be called after recieving a request.
    pub fn send_response(&self, response: &CtrlResponse) -> Result<(), CmdServerError> {
        // Serialise the response
        let response_str =
            serde_json::to_string(response).map_err(CmdServerError::SerializationError)?;

        // Send the response
        self.socket
            .send(&response_str, 0)
            .map_err(CmdServerError::SendError)
    }
}
