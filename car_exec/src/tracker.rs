//! # Path tracker interface
//!
//! The executive consumes the path tracking algorithm through the narrow
//! [`PathTracker`] trait defined here. Construction and configuration of the
//! concrete tracker happens entirely in `main`, the tracking manager only
//! ever sees `&mut dyn PathTracker` and treats it as already initialised and
//! ready.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::odom::VehicleState, plan::Plan};
use pursuit::PursuitTracker;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Interface to an external path tracking algorithm.
pub trait PathTracker {
    /// Hand the tracker a new plan at the start of a tracking session.
    fn import_plan(&mut self, plan: &Plan) -> Result<(), TrackerError>;

    /// Feed the tracker the latest vehicle state observation.
    fn update_state(&mut self, state: &VehicleState);

    /// Advance the tracker by one control step.
    ///
    /// An `Err` return is an unrecoverable failure, the caller must stop the
    /// tracker and tear the session down.
    fn advance(&mut self) -> Result<(), TrackerError>;

    /// Return the steering angle demand.
    ///
    /// Valid only immediately after a successful `advance`.
    fn steering_angle_rad(&self) -> f64;

    /// Return the longitudinal velocity demand. Negative values demand
    /// reversing.
    ///
    /// Valid only immediately after a successful `advance`.
    fn longitudinal_velocity_ms(&self) -> f64;

    /// Return true once the plan has been tracked to completion.
    fn tracking_finished(&self) -> bool;

    /// Release any internal tracking state.
    ///
    /// Called exactly once per session teardown.
    fn stop_tracking(&mut self);
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Failures a path tracker can report to the executive.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("The tracker rejected the plan: {0}")]
    PlanRejected(String),

    #[error("The tracker could not advance: {0}")]
    AdvanceFailed(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PathTracker for PursuitTracker {
    fn import_plan(&mut self, plan: &Plan) -> Result<(), TrackerError> {
        PursuitTracker::import_plan(self, plan)
            .map_err(|e| TrackerError::PlanRejected(e.to_string()))
    }

    fn update_state(&mut self, state: &VehicleState) {
        PursuitTracker::update_state(self, state)
    }

    fn advance(&mut self) -> Result<(), TrackerError> {
        PursuitTracker::advance(self).map_err(|e| TrackerError::AdvanceFailed(e.to_string()))
    }

    fn steering_angle_rad(&self) -> f64 {
        PursuitTracker::steering_angle_rad(self)
    }

    fn longitudinal_velocity_ms(&self) -> f64 {
        PursuitTracker::longitudinal_velocity_ms(self)
    }

    fn tracking_finished(&self) -> bool {
        PursuitTracker::tracking_finished(self)
    }

    fn stop_tracking(&mut self) {
        PursuitTracker::stop_tracking(self)
    }
}
