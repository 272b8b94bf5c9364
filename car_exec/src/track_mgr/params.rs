//! Tracking manager parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters for the tracking manager
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Params {
    // ----------------------------------------
    // COMMAND CONVERSION
    // ----------------------------------------
    /// Maximum steering angle the actuation accepts. Steering demands are
    /// clamped to this magnitude before being mapped onto the normalised
    /// steering command range.
    ///
    /// Units: radians
    pub max_steering_rad: f64,

    /// Maximum speed the actuation accepts. Velocity demand magnitudes are
    /// clamped to this value before being mapped onto the throttle range.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Throttle command issued at `max_speed_ms`.
    ///
    /// Units: none (normalised, between 0 and 1)
    pub max_throttle: f64,
}
