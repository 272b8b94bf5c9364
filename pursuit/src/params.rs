//! Parameters structure for the pure pursuit tracker

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the pure pursuit tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct PursuitParams {
    // ---- GEOMETRY ----

    /// Distance between the front and rear axles of the vehicle.
    ///
    /// Units: meters
    pub wheel_base_m: f64,

    // ---- PURSUIT ----

    /// Radius of the lookahead circle. The tracker steers towards the point
    /// this far ahead of the vehicle on the path.
    ///
    /// Units: meters
    pub lookahead_m: f64,

    /// Magnitude of the longitudinal velocity demand. The demand is signed by
    /// the driving direction of the current segment.
    ///
    /// Units: meters/second
    pub desired_speed_ms: f64,

    // ---- LIMITS ----

    /// Distance from the final point of a segment at which that segment is
    /// considered complete.
    ///
    /// Units: meters
    pub goal_tolerance_m: f64,

    /// Maximum lateral distance from the tracked segment. Tracking fails
    /// unrecoverably if the vehicle diverges beyond this limit.
    ///
    /// Units: meters
    pub divergence_limit_m: f64,
}
