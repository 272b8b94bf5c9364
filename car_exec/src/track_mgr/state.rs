//! Tracking manager state structure

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{Params, TrackMgrError, TrackingSession, TrackingStatus};
use crate::tracker::PathTracker;
use util::params;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Tracking manager state.
///
/// Owns the tracking session and mediates all access to it: plans arrive
/// through [`TrackMgr::submit_plan`], operator commands through
/// [`TrackMgr::handle_command`], and the cyclic actuation demand is produced
/// by [`TrackMgr::tick`].
#[derive(Default)]
pub struct TrackMgr {
    pub(crate) params: Params,

    pub(crate) session: TrackingSession,

    pub(crate) report: StatusReport,
}

/// Status report for tracking manager processing.
///
/// Cleared at the start of every cycle, so all flags describe the current
/// cycle only.
#[derive(Clone, Copy, Default, Serialize, Debug)]
pub struct StatusReport {
    /// Session status at the end of the cycle.
    pub status: TrackingStatus,

    /// Why the last plan or command of this cycle was rejected, if one was.
    pub last_rejection: Option<RejectionReason>,

    /// If true the tracker failed this cycle and the session was torn down.
    pub tracker_failed: bool,

    /// If true the tracker finished its plan this cycle.
    pub plan_finished: bool,

    /// If true the steering demand exceeded the steering limit.
    pub steering_limited: bool,

    /// If true the velocity demand exceeded the speed limit.
    pub velocity_limited: bool,

    /// Steering angle demanded by the tracker this cycle.
    ///
    /// Units: radians
    pub steering_angle_rad: f64,

    /// Longitudinal velocity demanded by the tracker this cycle.
    ///
    /// Units: meters/second
    pub velocity_ms: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Reasons the manager can reject a plan or an operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    /// A plan arrived while the session already held one.
    PlanWhileActive,

    /// A plan arrived with no segments or no poses.
    EmptyPlan,

    /// A plan arrived containing a segment with fewer than two poses.
    ShortSegment { index: usize },

    /// A start command arrived with no staged plan.
    StartWithoutPlan,

    /// A start command arrived while already tracking.
    StartWhileTracking,

    /// A stop command arrived while not tracking.
    StopWhileNotTracking,

    /// A command arrived that the manager does not handle.
    UnknownCommand,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TrackMgr {
    /// Initialise the tracking manager.
    ///
    /// Expected init data is a path to the parameter file.
    pub fn init(params_path: &str) -> Result<Self, TrackMgrError> {
        // Load the parameters
        let params = match params::load(params_path) {
            Ok(p) => p,
            Err(e) => return Err(TrackMgrError::ParamLoadError(e)),
        };

        Ok(Self::new(params))
    }

    /// Build the manager from already loaded parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            session: TrackingSession::new(),
            report: StatusReport::default(),
        }
    }

    /// Current session status.
    pub fn status(&self) -> TrackingStatus {
        self.session.status()
    }

    /// Status report describing the current cycle.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Clear the per-cycle status report.
    ///
    /// Call once at the start of every cycle, before processing plans and
    /// commands, so that rejections recorded during the cycle survive into
    /// the telemetry sent at its end.
    pub fn cycle_start(&mut self) {
        self.report = StatusReport::default();
    }

    /// The single `Tracking` to `Idle` teardown routine.
    ///
    /// Stops the tracker and resets the session, so the tracker is stopped
    /// exactly once however the session ends.
    pub(crate) fn stop_and_reset(&mut self, tracker: &mut dyn PathTracker) {
        tracker.stop_tracking();
        self.session.reset();
    }
}
