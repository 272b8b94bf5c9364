//! # Pure pursuit path tracker
//!
//! This crate implements a pure pursuit tracker for Ackermann steered
//! vehicles. The tracker is handed a plan (an ordered sequence of path
//! segments, each with a driving direction) and fed the latest vehicle state.
//! On each advance it finds the lookahead point, the intersection of a circle
//! of the lookahead radius centred on the vehicle with the path ahead of the
//! current target, and steers the vehicle onto it using the pursuit law
//!
//! ```text
//!     steering = atan2(2 * wheel_base * sin(alpha), lookahead_dist)
//! ```
//!
//! where `alpha` is the angle between the vehicle's heading and the bearing
//! to the lookahead point. The longitudinal velocity is a constant demand
//! signed by the driving direction of the current segment.
//!
//! The tracker is deliberately stateless about who is driving it. Session
//! arbitration (when a plan may be loaded, when tracking starts and stops)
//! belongs to the executive, which consumes this crate through a narrow
//! trait.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod math;
mod params;
mod tracker;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::PursuitParams;
pub use tracker::*;
