//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command requests and responses for the control station link
pub mod tc;

/// Path plan definitions
pub mod plan;

/// Command and state definitions for equipment (actuation and odometry)
pub mod eqpt;

/// Network module
pub mod net;
