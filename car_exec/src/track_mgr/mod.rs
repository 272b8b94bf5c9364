//! Tracking manager module
//!
//! The tracking manager supervises the path tracking session: it accepts
//! plans, dispatches operator start/stop commands, drives the tracker once
//! per cycle, and guarantees that whenever the session is not actively
//! tracking the vehicle is commanded with the fail safe actuation.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod cmd;
mod gate;
mod params;
mod session;
mod state;
mod tick;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// Internal
pub use params::*;
pub use session::*;
pub use state::*;

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Possible errors that can occur during tracking manager operation.
#[derive(Debug, thiserror::Error)]
pub enum TrackMgrError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),
}

// ------------------------------------------------------------------------------------------------
// TEST UTILITIES
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_util {
    use std::collections::VecDeque;

    use crate::tracker::{PathTracker, TrackerError};
    use chrono::Utc;
    use comms_if::{
        eqpt::odom::{VehiclePose, VehicleState, VehicleTwist},
        plan::{DrivingDirection, Plan, PlanPose, PlanSegment},
    };

    /// A tracker which plays back scripted results and counts the calls made
    /// to it.
    #[derive(Default)]
    pub(crate) struct ScriptedTracker {
        /// Error to return from the next plan import, if any.
        pub import_result: Option<TrackerError>,

        /// Results to play back from successive `advance` calls. Once empty
        /// further advances succeed.
        pub advance_results: VecDeque<Result<(), TrackerError>>,

        pub steering_rad: f64,
        pub velocity_ms: f64,
        pub finished: bool,

        pub num_imports: usize,
        pub num_advances: usize,
        pub num_stops: usize,
        pub num_state_updates: usize,
    }

    impl PathTracker for ScriptedTracker {
        fn import_plan(&mut self, _plan: &Plan) -> Result<(), TrackerError> {
            self.num_imports += 1;
            match self.import_result.take() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        fn update_state(&mut self, _state: &VehicleState) {
            self.num_state_updates += 1;
        }

        fn advance(&mut self) -> Result<(), TrackerError> {
            self.num_advances += 1;
            self.advance_results.pop_front().unwrap_or(Ok(()))
        }

        fn steering_angle_rad(&self) -> f64 {
            self.steering_rad
        }

        fn longitudinal_velocity_ms(&self) -> f64 {
            self.velocity_ms
        }

        fn tracking_finished(&self) -> bool {
            self.finished
        }

        fn stop_tracking(&mut self) {
            self.num_stops += 1;
        }
    }

    /// Build a forward plan with the given number of poses per segment, laid
    /// out 1 m apart along the X axis.
    pub(crate) fn make_plan(segment_sizes: &[usize]) -> Plan {
        let mut x_m = 0.0;
        let mut segments = Vec::with_capacity(segment_sizes.len());

        for &num_poses in segment_sizes {
            let mut poses = Vec::with_capacity(num_poses);
            for _ in 0..num_poses {
                poses.push(PlanPose {
                    x_m,
                    y_m: 0.0,
                    heading_rad: 0.0,
                });
                x_m += 1.0;
            }
            segments.push(PlanSegment {
                direction: DrivingDirection::Forward,
                poses,
            });
        }

        Plan { segments }
    }

    /// A vehicle state observation at the origin.
    pub(crate) fn veh_state() -> VehicleState {
        VehicleState {
            timestamp: Utc::now(),
            pose: VehiclePose::identity(),
            twist: VehicleTwist::default(),
        }
    }
}
