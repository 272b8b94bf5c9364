//! # Actuation commands
//!
//! Defines the command sent to the vehicle's actuation system on every control
//! cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Command to the vehicle's actuation system.
///
/// Exactly one of these is produced per control cycle. A command is built once
/// and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActCmd {
    /// The demanded gear.
    pub gear: Gear,

    /// Normalised steering demand.
    ///
    /// Units: dimensionless, in the range [-1, +1]. Positive values steer to
    /// the left.
    pub steering: f64,

    /// Normalised throttle demand.
    ///
    /// Units: dimensionless, in the range [0, +1].
    pub throttle: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Gear selection for the vehicle's transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gear {
    Forward,
    Reverse,
    Neutral,
    Park,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ActCmd {
    /// The canonical safe command: forward gear, no steering, no throttle.
    ///
    /// This is issued whenever tracking is not actively and successfully in
    /// progress.
    pub fn fail_safe() -> Self {
        Self {
            gear: Gear::Forward,
            steering: 0.0,
            throttle: 0.0,
        }
    }
}

impl Default for ActCmd {
    fn default() -> Self {
        Self::fail_safe()
    }
}
