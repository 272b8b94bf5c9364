//! # Command request module
//!
//! This module provides the command requests sent to the vehicle executive by
//! the control station, and the responses returned by the executive.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use serde_json::{self, json, Value};
use thiserror::Error;

// Internal
use crate::eqpt::odom::VehicleState;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A request made to the vehicle executive over the command link.
///
/// Requests are carried as a JSON envelope with a `type` tag and an optional
/// `payload`. A syntactically valid envelope whose type or payload is not
/// recognised parses to a [`TrackingCmd::Unknown`] command rather than an
/// error, so that the executive can ack and log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CtrlRequest {
    /// A tracking command for the session state machine
    Track(TrackingCmd),

    /// A query for the latest vehicle state observation
    GetState,
}

/// Tracking commands accepted by the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingCmd {
    /// Begin tracking the staged plan
    StartTracking,

    /// Stop tracking the active plan
    StopTracking,

    /// A command which was not recognised. Acked and logged, never acted on.
    Unknown,
}

/// Response to a [`CtrlRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CtrlResponse {
    /// The request was recieved. Receipt does not imply that a tracking
    /// command caused a transition.
    Ack,

    /// The latest vehicle state, or `None` if no observation has been made yet
    State { veh_state: Option<VehicleState> },

    /// The request could not be parsed
    Invalid,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum CmdParseError {
    #[error("Request contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Request has an invalid type ({0})")]
    InvalidType(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CtrlRequest {
    /// Parse a new request from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, CmdParseError> {
        // Parse the JSON string into a value
        let val: Value = serde_json::from_str(json_str).map_err(CmdParseError::InvalidJson)?;

        // Get the type of the request
        let type_str = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(CmdParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };

        match type_str {
            "TRACK" => {
                // Unrecognised payloads fold to the Unknown command, which the
                // executive acks and warns on
                let cmd = match val["payload"].as_str() {
                    Some("START") => TrackingCmd::StartTracking,
                    Some("STOP") => TrackingCmd::StopTracking,
                    _ => TrackingCmd::Unknown,
                };

                Ok(CtrlRequest::Track(cmd))
            }
            "STATE" => Ok(CtrlRequest::GetState),
            // An unrecognised type tag is still a command, just one we don't
            // understand
            _ => Ok(CtrlRequest::Track(TrackingCmd::Unknown)),
        }
    }

    /// Serialise this request into its JSON envelope
    pub fn to_json(&self) -> String {
        let val = match self {
            CtrlRequest::Track(TrackingCmd::StartTracking) => {
                json!({"type": "TRACK", "payload": "START"})
            }
            CtrlRequest::Track(TrackingCmd::StopTracking) => {
                json!({"type": "TRACK", "payload": "STOP"})
            }
            CtrlRequest::Track(TrackingCmd::Unknown) => {
                json!({"type": "TRACK", "payload": null})
            }
            CtrlRequest::GetState => json!({"type": "STATE"}),
        };

        val.to_string()
    }
}
