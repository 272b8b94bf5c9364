//! # Car control library.
//!
//! This library allows other crates in the workspace to access items defined inside the car
//! executive crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store - cycle state shared between the executive's modules
pub mod data_store;

/// Odometry cache - keeps the most recent vehicle state observation
pub mod odom;

/// Path tracker interface - the trait through which the executive drives the tracking algorithm
pub mod tracker;

/// Tracking manager module - supervises the tracking session and produces actuation commands
pub mod track_mgr;

/// Command server - answers requests from the control station
pub mod cmd_server;

/// Plan client - recieves plans from the planner
pub mod plan_client;

/// Odometry client - recieves vehicle state observations
pub mod odom_client;

/// Actuation server - publishes actuation commands to the vehicle
pub mod act_server;

/// Telemetry server - publishes cycle telemetry to the control station
pub mod tm_server;
