//! # Tracking session state machine
//!
//! A [`TrackingSession`] owns the staged plan and the [`TrackingStatus`]
//! describing where the session is in its lifecycle. All transitions go
//! through the methods here, which enforce the legal transition table and
//! keep the plan in lock-step with the status: the session holds a plan if
//! and only if its status is not [`TrackingStatus::Idle`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::plan::Plan;
use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Lifecycle status of the tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackingStatus {
    /// No plan is held, the vehicle is commanded with fail safe actuation.
    Idle,

    /// A plan has been accepted and is waiting for a start command.
    PlanStaged,

    /// The tracker is actively following the staged plan.
    Tracking,

    /// The tracker failed during this cycle. Transient, the session is
    /// returned to `Idle` in the same cycle that raised the fault.
    Faulted,
}

impl Default for TrackingStatus {
    fn default() -> Self {
        TrackingStatus::Idle
    }
}

/// Errors raised by an illegal session transition.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot stage a plan while the session is {0:?}")]
    NotIdle(TrackingStatus),

    #[error("Cannot begin tracking while the session is {0:?}")]
    NoStagedPlan(TrackingStatus),

    #[error("Cannot fault the session while it is {0:?}")]
    NotTracking(TrackingStatus),
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The tracking session, holding the current status and the staged plan.
#[derive(Debug, Default)]
pub struct TrackingSession {
    status: TrackingStatus,

    plan: Option<Plan>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TrackingSession {
    /// Create a new idle session holding no plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    /// The staged plan, `None` when the session is idle.
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    /// Stage a plan, moving the session from `Idle` to `PlanStaged`.
    ///
    /// Fails without modifying the session if it is not idle.
    pub fn stage_plan(&mut self, plan: Plan) -> Result<(), TransitionError> {
        match self.status {
            TrackingStatus::Idle => {
                self.plan = Some(plan);
                self.status = TrackingStatus::PlanStaged;
                Ok(())
            }
            s => Err(TransitionError::NotIdle(s)),
        }
    }

    /// Begin tracking the staged plan, moving the session from `PlanStaged`
    /// to `Tracking`, and return a reference to the plan for handover to the
    /// tracker.
    pub fn begin_tracking(&mut self) -> Result<&Plan, TransitionError> {
        if self.status != TrackingStatus::PlanStaged {
            return Err(TransitionError::NoStagedPlan(self.status));
        }

        // The plan is always present outside Idle, but guard rather than
        // panic if that were ever broken.
        let plan = match self.plan.as_ref() {
            Some(p) => p,
            None => return Err(TransitionError::NoStagedPlan(self.status)),
        };

        self.status = TrackingStatus::Tracking;

        Ok(plan)
    }

    /// Mark the session as faulted following a tracker failure.
    ///
    /// Only legal while tracking. The caller must fold the session back to
    /// `Idle` with [`TrackingSession::reset`] before the end of the cycle.
    pub fn fault(&mut self) -> Result<(), TransitionError> {
        match self.status {
            TrackingStatus::Tracking => {
                self.status = TrackingStatus::Faulted;
                Ok(())
            }
            s => Err(TransitionError::NotTracking(s)),
        }
    }

    /// Return the session to `Idle`, dropping any held plan.
    ///
    /// Legal from every status so that teardown paths never fail.
    pub fn reset(&mut self) {
        self.plan = None;
        self.status = TrackingStatus::Idle;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::plan::{DrivingDirection, Plan, PlanPose, PlanSegment};

    fn plan() -> Plan {
        Plan {
            segments: vec![PlanSegment {
                direction: DrivingDirection::Forward,
                poses: vec![
                    PlanPose {
                        x_m: 0.0,
                        y_m: 0.0,
                        heading_rad: 0.0,
                    },
                    PlanPose {
                        x_m: 1.0,
                        y_m: 0.0,
                        heading_rad: 0.0,
                    },
                ],
            }],
        }
    }

    /// Assert the plan is held exactly when the session is not idle.
    fn assert_plan_consistent(session: &TrackingSession) {
        if session.status() == TrackingStatus::Idle {
            assert!(session.plan().is_none());
        } else {
            assert!(session.plan().is_some());
        }
    }

    #[test]
    fn test_full_session_lifecycle() {
        let mut session = TrackingSession::new();
        assert_eq!(session.status(), TrackingStatus::Idle);
        assert_plan_consistent(&session);

        session.stage_plan(plan()).unwrap();
        assert_eq!(session.status(), TrackingStatus::PlanStaged);
        assert_plan_consistent(&session);

        let staged = session.begin_tracking().unwrap();
        assert_eq!(staged.num_segments(), 1);
        assert_eq!(session.status(), TrackingStatus::Tracking);
        assert_plan_consistent(&session);

        session.reset();
        assert_eq!(session.status(), TrackingStatus::Idle);
        assert_plan_consistent(&session);
    }

    #[test]
    fn test_stage_requires_idle() {
        let mut session = TrackingSession::new();
        session.stage_plan(plan()).unwrap();

        match session.stage_plan(plan()) {
            Err(TransitionError::NotIdle(TrackingStatus::PlanStaged)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }

        // The session must be untouched by the failed stage
        assert_eq!(session.status(), TrackingStatus::PlanStaged);
        assert_plan_consistent(&session);
    }

    #[test]
    fn test_begin_requires_staged_plan() {
        let mut session = TrackingSession::new();

        match session.begin_tracking() {
            Err(TransitionError::NoStagedPlan(TrackingStatus::Idle)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }

        session.stage_plan(plan()).unwrap();
        session.begin_tracking().unwrap();

        match session.begin_tracking() {
            Err(TransitionError::NoStagedPlan(TrackingStatus::Tracking)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_fault_requires_tracking() {
        let mut session = TrackingSession::new();

        match session.fault() {
            Err(TransitionError::NotTracking(TrackingStatus::Idle)) => (),
            other => panic!("Unexpected result: {:?}", other),
        }

        session.stage_plan(plan()).unwrap();
        session.begin_tracking().unwrap();
        session.fault().unwrap();
        assert_eq!(session.status(), TrackingStatus::Faulted);

        // Faulted is folded back to Idle by reset, dropping the plan
        session.reset();
        assert_eq!(session.status(), TrackingStatus::Idle);
        assert_plan_consistent(&session);
    }

    #[test]
    fn test_reset_is_legal_from_every_status() {
        let mut session = TrackingSession::new();
        session.reset();
        assert_eq!(session.status(), TrackingStatus::Idle);

        session.stage_plan(plan()).unwrap();
        session.reset();
        assert_eq!(session.status(), TrackingStatus::Idle);
        assert_plan_consistent(&session);
    }
}
