//! Pure pursuit tracker state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::PI;

// External
use log::{debug, info};
use nalgebra::{Quaternion, UnitQuaternion, Vector2};

// Internal
use crate::math::{Circle, Intersection, Line};
use crate::params::PursuitParams;
use comms_if::{
    eqpt::odom::VehicleState,
    plan::{DrivingDirection, Plan},
};
use util::{maths::get_ang_dist_2pi, params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct PursuitTracker {
    params: PursuitParams,

    /// The segments of the plan being tracked.
    segments: Vec<Segment>,

    /// Index of the segment being tracked
    seg_index: usize,

    /// Index of the current target point within the segment
    target_index: usize,

    /// Latest vehicle position on the XY plane
    position_m: Option<Vector2<f64>>,

    /// Latest vehicle heading (angle to the positive X axis)
    heading_rad: f64,

    /// Steering angle demand from the last advance
    steering_demand_rad: f64,

    /// Longitudinal velocity demand from the last advance
    velocity_demand_ms: f64,

    /// True once the final segment has been completed
    finished: bool,

    /// True while a plan is loaded
    tracking: bool,
}

/// A plan segment reduced to the points the tracker pursues.
struct Segment {
    direction: DrivingDirection,
    points_m: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during operation of the tracker.
#[derive(Debug, thiserror::Error)]
pub enum PursuitError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    /// A plan is already loaded. This error occurs when attempting to import
    /// a new plan before the current one has been stopped.
    #[error("Attempted to import a plan while one is already being tracked")]
    PlanAlreadyLoaded,

    /// Attempted to import a plan with no segments in it.
    #[error("Attempted to import an empty plan")]
    EmptyPlan,

    /// Attempted to import a plan containing untrackable segments. The
    /// contained vector provides the indices of the segments which were
    /// invalid.
    #[error("Imported plan contains untrackable segments at index(s) {0:?}")]
    InvalidSegments(Vec<usize>),

    /// Attempted to advance the tracker with no plan loaded.
    #[error("No plan is being tracked")]
    NotTracking,

    /// Attempted to advance the tracker when the vehicle state is not known.
    #[error("No vehicle state has been set")]
    NoVehicleState,

    /// The vehicle has moved too far from the tracked segment to recover.
    #[error("Vehicle diverged {distance_m:.2} m from the path")]
    DivergedFromPath { distance_m: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PursuitTracker {
    /// Initialise the tracker.
    ///
    /// Expected init data is a path to the parameter file.
    pub fn init(params_path: &str) -> Result<Self, PursuitError> {
        // Load the parameters
        let params = match params::load(params_path) {
            Ok(p) => p,
            Err(e) => return Err(PursuitError::ParamLoadError(e)),
        };

        Ok(Self::new(params))
    }

    /// Create a new tracker with the given parameters.
    pub fn new(params: PursuitParams) -> Self {
        Self {
            params,
            segments: vec![],
            seg_index: 0,
            target_index: 0,
            position_m: None,
            heading_rad: 0.0,
            steering_demand_rad: 0.0,
            velocity_demand_ms: 0.0,
            finished: false,
            tracking: false,
        }
    }

    /// Import a new plan and begin tracking it.
    ///
    /// The plan is validated before being accepted: it must contain at least
    /// one segment and every segment must have at least two poses. Importing
    /// while another plan is being tracked is an error, the current plan must
    /// be stopped with `stop_tracking` first.
    pub fn import_plan(&mut self, plan: &Plan) -> Result<(), PursuitError> {
        // Check to see if there's already a plan loaded
        if self.tracking {
            return Err(PursuitError::PlanAlreadyLoaded);
        }

        // Verify that the plan contains at least one segment
        if plan.is_empty() {
            return Err(PursuitError::EmptyPlan);
        }

        // Check that all segments in the plan are trackable
        let mut invalid_seg_indexes: Vec<usize> = vec![];
        for (i, seg) in plan.segments.iter().enumerate() {
            if seg.poses.len() < 2 {
                invalid_seg_indexes.push(i);
            }
        }

        // If there were invalid segments
        if !invalid_seg_indexes.is_empty() {
            return Err(PursuitError::InvalidSegments(invalid_seg_indexes));
        }

        // Reduce the plan to the points to pursue, only the positions are
        // needed
        self.segments = plan
            .segments
            .iter()
            .map(|seg| Segment {
                direction: seg.direction,
                points_m: seg
                    .poses
                    .iter()
                    .map(|pose| Vector2::new(pose.x_m, pose.y_m))
                    .collect(),
            })
            .collect();

        // Setup counters. The target must be 1 not 0 as a segment is defined
        // backwards, i.e. between the target and previous points.
        self.seg_index = 0;
        self.target_index = 1;
        self.finished = false;
        self.tracking = true;

        debug!(
            "Plan imported: {} segment(s), {} pose(s)",
            plan.num_segments(),
            plan.num_poses()
        );

        Ok(())
    }

    /// Feed the tracker the latest vehicle state.
    pub fn update_state(&mut self, state: &VehicleState) {
        self.position_m = Some(Vector2::new(
            state.pose.position_m[0],
            state.pose.position_m[1],
        ));

        // The attitude quaternion is scalar last on the wire, nalgebra's
        // constructor takes the scalar first
        let attitude_q = UnitQuaternion::from_quaternion(Quaternion::new(
            state.pose.attitude_q[3],
            state.pose.attitude_q[0],
            state.pose.attitude_q[1],
            state.pose.attitude_q[2],
        ));
        self.heading_rad = attitude_q.euler_angles().2;
    }

    /// Advance the tracker by one control step.
    ///
    /// Processing involves:
    ///  1. Completing the current segment (or the whole plan) if the vehicle
    ///     is within the goal tolerance of the segment's final point.
    ///  2. Moving the target point on while it falls inside the lookahead
    ///     circle.
    ///  3. Finding the lookahead point and applying the pursuit law to get
    ///     the steering and velocity demands.
    ///
    /// An `Err` return is unrecoverable, the caller is expected to stop
    /// tracking.
    pub fn advance(&mut self) -> Result<(), PursuitError> {
        // Tracking must have been started by a plan import
        if !self.tracking {
            return Err(PursuitError::NotTracking);
        }

        // The pursuit law cannot run without the vehicle state
        let position_m = match self.position_m {
            Some(p) => p,
            None => return Err(PursuitError::NoVehicleState),
        };

        // Nothing to do once the plan is complete, the demands stay safe
        if self.finished {
            return Ok(());
        }

        // ---- TARGET MANAGEMENT ----

        // Complete the current segment when the vehicle is within the goal
        // tolerance of its final point.
        //
        // Indexing is safe here as import guarantees at least two points per
        // segment.
        let num_points = self.segments[self.seg_index].points_m.len();
        let goal_m = self.segments[self.seg_index].points_m[num_points - 1];

        if (goal_m - position_m).norm() <= self.params.goal_tolerance_m {
            debug!("Segment {} complete", self.seg_index);

            self.seg_index += 1;
            self.target_index = 1;

            // If that was the final segment the plan is complete. Zero the
            // demands so anything reading them before stopping gets a safe
            // value.
            if self.seg_index >= self.segments.len() {
                info!("Plan complete");

                self.finished = true;
                self.steering_demand_rad = 0.0;
                self.velocity_demand_ms = 0.0;
                return Ok(());
            }
        }

        let segment = &self.segments[self.seg_index];

        // Move the target on while it falls inside the lookahead circle,
        // without running off the end of the segment
        while self.target_index + 1 < segment.points_m.len()
            && (segment.points_m[self.target_index] - position_m).norm() < self.params.lookahead_m
        {
            self.target_index += 1;
        }

        // ---- DIVERGENCE CHECK ----

        let tracked_line = Line {
            start_m: segment.points_m[self.target_index - 1],
            end_m: segment.points_m[self.target_index],
        };

        let lateral_m = tracked_line.distance_to_point(&position_m);

        if lateral_m > self.params.divergence_limit_m {
            return Err(PursuitError::DivergedFromPath {
                distance_m: lateral_m,
            });
        }

        // ---- PURSUIT LAW ----

        // Find the lookahead point. If the lookahead circle misses the
        // tracked line entirely (vehicle off the path but within the
        // divergence limit) fall back to pursuing the target point itself.
        let circle = Circle {
            centre_m: position_m,
            radius_m: self.params.lookahead_m,
        };

        let lookahead_point_m = match circle.intersect_segment(&tracked_line) {
            // Always pursue the intersection furthest along the segment
            Intersection::Two(_, point_m) => point_m,
            Intersection::One(point_m) => point_m,
            Intersection::None => segment.points_m[self.target_index],
        };

        // A backwards segment is tracked as if the vehicle were facing its
        // rear
        let effective_heading_rad = match segment.direction {
            DrivingDirection::Forward => self.heading_rad,
            DrivingDirection::Backwards => self.heading_rad + PI,
        };

        // Angle between the vehicle's heading and the bearing to the
        // lookahead point
        let to_lookahead_m = lookahead_point_m - position_m;
        let bearing_rad = to_lookahead_m[1].atan2(to_lookahead_m[0]);
        let alpha_rad = get_ang_dist_2pi(effective_heading_rad, bearing_rad);

        // Pursuit law. A vanishing lookahead distance means the vehicle is
        // on top of the lookahead point, in which case hold the wheels
        // straight.
        let lookahead_dist_m = to_lookahead_m.norm();
        let mut steering_rad = match lookahead_dist_m <= std::f64::EPSILON {
            true => 0.0,
            false => (2.0 * self.params.wheel_base_m * alpha_rad.sin()).atan2(lookahead_dist_m),
        };

        // The steering geometry mirrors when reversing, and the velocity
        // demand is signed by the driving direction
        let velocity_ms = match segment.direction {
            DrivingDirection::Forward => self.params.desired_speed_ms,
            DrivingDirection::Backwards => {
                steering_rad = -steering_rad;
                -self.params.desired_speed_ms
            }
        };

        self.steering_demand_rad = steering_rad;
        self.velocity_demand_ms = velocity_ms;

        Ok(())
    }

    /// Return the steering angle demand.
    ///
    /// Valid only after a successful `advance`.
    pub fn steering_angle_rad(&self) -> f64 {
        self.steering_demand_rad
    }

    /// Return the longitudinal velocity demand.
    ///
    /// Valid only after a successful `advance`. Negative values demand
    /// reversing.
    pub fn longitudinal_velocity_ms(&self) -> f64 {
        self.velocity_demand_ms
    }

    /// Return true if the whole plan has been tracked to completion.
    pub fn tracking_finished(&self) -> bool {
        self.finished
    }

    /// Stop tracking and release the plan.
    ///
    /// The vehicle state is kept, it is independent of the plan lifecycle.
    pub fn stop_tracking(&mut self) {
        self.segments = vec![];
        self.seg_index = 0;
        self.target_index = 0;
        self.steering_demand_rad = 0.0;
        self.velocity_demand_ms = 0.0;
        self.finished = false;
        self.tracking = false;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use comms_if::{
        eqpt::odom::{VehiclePose, VehicleTwist},
        plan::{PlanPose, PlanSegment},
    };

    fn test_params() -> PursuitParams {
        PursuitParams {
            wheel_base_m: 2.7,
            lookahead_m: 2.0,
            desired_speed_ms: 1.5,
            goal_tolerance_m: 0.3,
            divergence_limit_m: 3.0,
        }
    }

    /// Build a single segment plan along the X axis from the origin, with
    /// poses at 1 m spacing and the given direction of travel.
    fn straight_plan(length_m: i32, direction: DrivingDirection) -> Plan {
        let sign = match direction {
            DrivingDirection::Forward => 1.0,
            DrivingDirection::Backwards => -1.0,
        };

        Plan {
            segments: vec![PlanSegment {
                direction,
                poses: (0..=length_m)
                    .map(|i| PlanPose {
                        x_m: sign * i as f64,
                        y_m: 0.0,
                        heading_rad: 0.0,
                    })
                    .collect(),
            }],
        }
    }

    fn state_at(x_m: f64, y_m: f64, heading_rad: f64) -> VehicleState {
        let attitude_q = UnitQuaternion::from_euler_angles(0.0, 0.0, heading_rad);

        VehicleState {
            timestamp: Utc::now(),
            pose: VehiclePose {
                position_m: [x_m, y_m, 0.0],
                attitude_q: [
                    attitude_q.coords[0],
                    attitude_q.coords[1],
                    attitude_q.coords[2],
                    attitude_q.coords[3],
                ],
            },
            twist: VehicleTwist::default(),
        }
    }

    #[test]
    fn test_on_path_steering_is_straight() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();
        tracker.update_state(&state_at(1.0, 0.0, 0.0));

        tracker.advance().unwrap();

        // On the path and aligned with it, the wheels stay straight and the
        // velocity demand is the full forward speed
        assert!(tracker.steering_angle_rad().abs() < 1e-6);
        assert_eq!(tracker.longitudinal_velocity_ms(), 1.5);
        assert!(!tracker.tracking_finished());
    }

    #[test]
    fn test_below_path_steers_left() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();

        // Vehicle below the path, facing along it. The lookahead point is up
        // and to the left, so the steering demand must be positive.
        tracker.update_state(&state_at(1.0, -0.5, 0.0));

        tracker.advance().unwrap();

        assert!(tracker.steering_angle_rad() > 0.0);
    }

    #[test]
    fn test_divergence_is_unrecoverable() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();

        // Well beyond the 3 m divergence limit
        tracker.update_state(&state_at(1.0, 5.0, 0.0));

        match tracker.advance() {
            Err(PursuitError::DivergedFromPath { distance_m }) => {
                assert!(distance_m > 3.0);
            }
            other => panic!("expected divergence failure, got {:?}", other),
        }
    }

    #[test]
    fn test_goal_completion() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();

        // Within the goal tolerance of the final point
        tracker.update_state(&state_at(9.9, 0.0, 0.0));

        tracker.advance().unwrap();

        assert!(tracker.tracking_finished());
        assert_eq!(tracker.steering_angle_rad(), 0.0);
        assert_eq!(tracker.longitudinal_velocity_ms(), 0.0);
    }

    #[test]
    fn test_backwards_segment_reverses() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Backwards))
            .unwrap();

        // Backing along the negative X axis while facing positive X
        tracker.update_state(&state_at(-1.0, 0.0, 0.0));

        tracker.advance().unwrap();

        assert!(tracker.steering_angle_rad().abs() < 1e-6);
        assert_eq!(tracker.longitudinal_velocity_ms(), -1.5);
    }

    #[test]
    fn test_advance_requires_plan_and_state() {
        let mut tracker = PursuitTracker::new(test_params());

        assert!(matches!(tracker.advance(), Err(PursuitError::NotTracking)));

        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();

        assert!(matches!(
            tracker.advance(),
            Err(PursuitError::NoVehicleState)
        ));
    }

    #[test]
    fn test_import_validation() {
        let mut tracker = PursuitTracker::new(test_params());

        // Empty plan
        assert!(matches!(
            tracker.import_plan(&Plan { segments: vec![] }),
            Err(PursuitError::EmptyPlan)
        ));

        // Second segment has a single pose and cannot be tracked
        let mut plan = straight_plan(10, DrivingDirection::Forward);
        plan.segments.push(PlanSegment {
            direction: DrivingDirection::Forward,
            poses: vec![PlanPose {
                x_m: 10.0,
                y_m: 0.0,
                heading_rad: 0.0,
            }],
        });

        match tracker.import_plan(&plan) {
            Err(PursuitError::InvalidSegments(indexes)) => assert_eq!(indexes, vec![1]),
            other => panic!("expected invalid segments, got {:?}", other),
        }

        // Importing twice without stopping
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();
        assert!(matches!(
            tracker.import_plan(&straight_plan(10, DrivingDirection::Forward)),
            Err(PursuitError::PlanAlreadyLoaded)
        ));
    }

    #[test]
    fn test_stop_tracking_releases_plan() {
        let mut tracker = PursuitTracker::new(test_params());
        tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .unwrap();
        tracker.update_state(&state_at(1.0, 0.0, 0.0));
        tracker.advance().unwrap();

        tracker.stop_tracking();

        // The demands are zeroed and a new advance is rejected
        assert_eq!(tracker.steering_angle_rad(), 0.0);
        assert_eq!(tracker.longitudinal_velocity_ms(), 0.0);
        assert!(matches!(tracker.advance(), Err(PursuitError::NotTracking)));

        // A new plan can now be imported
        assert!(tracker
            .import_plan(&straight_plan(10, DrivingDirection::Forward))
            .is_ok());
    }
}
