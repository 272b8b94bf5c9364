//! Cyclic tick execution
//!
//! Once per control cycle the executive calls [`TrackMgr::tick`], which
//! produces exactly one actuation command. While the session is tracking the
//! command comes from the tracker's demands, converted into the normalised
//! actuation ranges. In every other situation, including any failure raised
//! during the tick itself, the command is the fail safe.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{error, info, warn};

// Internal
use super::{StatusReport, TrackMgr, TrackingStatus};
use crate::tracker::PathTracker;
use comms_if::eqpt::{
    act::{ActCmd, Gear},
    odom::VehicleState,
};
use util::maths::{clamp, lin_map};

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TrackMgr {
    /// Execute one control cycle, producing the actuation command to issue
    /// and the report describing the cycle.
    ///
    /// The returned status is sampled after any fault handling, so a cycle in
    /// which the tracker failed reports `Idle`, with the failure visible in
    /// the report flags.
    pub fn tick(
        &mut self,
        tracker: &mut dyn PathTracker,
        veh_state: Option<&VehicleState>,
    ) -> (ActCmd, StatusReport) {
        let act_cmd = match self.session.status() {
            TrackingStatus::Tracking => self.advance_tracker(tracker, veh_state),
            // Every status other than Tracking commands the fail safe
            _ => ActCmd::fail_safe(),
        };

        self.report.status = self.session.status();

        (act_cmd, self.report)
    }

    /// Advance the tracker by one step and convert its demands.
    fn advance_tracker(
        &mut self,
        tracker: &mut dyn PathTracker,
        veh_state: Option<&VehicleState>,
    ) -> ActCmd {
        if let Some(state) = veh_state {
            tracker.update_state(state);
        }

        if let Err(e) = tracker.advance() {
            error!("Tracker failed: {}", e);
            self.report.tracker_failed = true;

            // Fault the session, then fold it back to idle within the same
            // cycle so the fault never persists across cycles.
            if let Err(e) = self.session.fault() {
                warn!("Could not fault the session: {}", e);
            }
            self.stop_and_reset(tracker);

            return ActCmd::fail_safe();
        }

        if tracker.tracking_finished() {
            info!("Finished tracking the plan");
            self.report.plan_finished = true;
            self.stop_and_reset(tracker);

            return ActCmd::fail_safe();
        }

        self.convert_demands(
            tracker.steering_angle_rad(),
            tracker.longitudinal_velocity_ms(),
        )
    }

    /// Convert the tracker's demands into a normalised actuation command.
    ///
    /// Steering is clamped to the steering limit and mapped onto [-1, 1],
    /// the velocity magnitude is clamped to the speed limit and mapped onto
    /// [0, max throttle], and the gear follows the sign of the velocity.
    /// Clamping is recorded in the status report.
    fn convert_demands(&mut self, steering_rad: f64, velocity_ms: f64) -> ActCmd {
        self.report.steering_angle_rad = steering_rad;
        self.report.velocity_ms = velocity_ms;

        let gear = match velocity_ms < 0.0 {
            true => Gear::Reverse,
            false => Gear::Forward,
        };

        let steering_limit_rad = self.params.max_steering_rad;
        let clamped_steering_rad = clamp(&steering_rad, &-steering_limit_rad, &steering_limit_rad);
        if clamped_steering_rad != steering_rad {
            self.report.steering_limited = true;
        }
        let steering = lin_map(
            (-steering_limit_rad, steering_limit_rad),
            (-1.0, 1.0),
            clamped_steering_rad,
        );

        let speed_ms = velocity_ms.abs();
        let clamped_speed_ms = clamp(&speed_ms, &0.0, &self.params.max_speed_ms);
        if clamped_speed_ms != speed_ms {
            self.report.velocity_limited = true;
        }
        let throttle = lin_map(
            (0.0, self.params.max_speed_ms),
            (0.0, self.params.max_throttle),
            clamped_speed_ms,
        );

        ActCmd {
            gear,
            steering,
            throttle,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
