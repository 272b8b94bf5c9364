//! # Vehicle odometry
//!
//! Defines the vehicle state observation published by the odometry source.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A single observation of the vehicle's state.
///
/// Only the most recent observation is ever of interest, no history is kept by
/// any consumer of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Time at which this observation was made
    pub timestamp: DateTime<Utc>,

    /// The vehicle's pose in the world frame
    pub pose: VehiclePose,

    /// The vehicle's velocities in the body frame
    pub twist: VehicleTwist,
}

/// Position and attitude of the vehicle in the world frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehiclePose {
    /// The position in the world frame.
    ///
    /// Units: meters
    pub position_m: [f64; 3],

    /// The attitude of the vehicle in the world frame, as a quaternion which
    /// rotates the world frame into the body frame.
    ///
    /// Order: scalar-last, `[x, y, z, w]`
    pub attitude_q: [f64; 4],
}

/// Linear and angular velocity of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleTwist {
    /// Linear velocity in the body frame.
    ///
    /// Units: meters/second
    pub linear_ms: [f64; 3],

    /// Angular velocity in the body frame.
    ///
    /// Units: radians/second
    pub angular_rads: [f64; 3],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VehiclePose {
    /// An identity pose, at the world origin with no rotation.
    pub fn identity() -> Self {
        Self {
            position_m: [0.0; 3],
            attitude_q: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Default for VehicleTwist {
    fn default() -> Self {
        Self {
            linear_ms: [0.0; 3],
            angular_rads: [0.0; 3],
        }
    }
}
