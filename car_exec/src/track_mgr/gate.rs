//! Plan submission gate
//!
//! New plans from the planner enter the manager here. A plan is only
//! accepted while the session is idle, and must pass validation before it is
//! staged. Rejections are recorded in the status report and do not disturb
//! the session.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{info, warn};

// Internal
use super::{RejectionReason, TrackMgr, TrackingStatus};
use comms_if::plan::Plan;

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TrackMgr {
    /// Offer a new plan to the manager.
    ///
    /// Returns true if the plan was accepted and staged. On rejection the
    /// reason is recorded in the status report and the session is untouched.
    pub fn submit_plan(&mut self, plan: Plan) -> bool {
        // Plans cannot be swapped mid-session, the operator must stop first.
        if self.session.status() != TrackingStatus::Idle {
            warn!(
                "Rejecting plan: the session is {:?}, not Idle",
                self.session.status()
            );
            self.report.last_rejection = Some(RejectionReason::PlanWhileActive);
            return false;
        }

        if plan.is_empty() {
            warn!("Rejecting plan: it contains no poses");
            self.report.last_rejection = Some(RejectionReason::EmptyPlan);
            return false;
        }

        if let Some(index) = plan.first_short_segment() {
            warn!("Rejecting plan: segment {} has fewer than 2 poses", index);
            self.report.last_rejection = Some(RejectionReason::ShortSegment { index });
            return false;
        }

        info!(
            "Recieved a plan: {} segment(s), {} pose(s)",
            plan.num_segments(),
            plan.num_poses()
        );

        match self.session.stage_plan(plan) {
            Ok(()) => true,
            Err(e) => {
                // Unreachable while the Idle check above holds
                warn!("Could not stage the plan: {}", e);
                self.report.last_rejection = Some(RejectionReason::PlanWhileActive);
                false
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::super::test_util::make_plan;
    use super::*;
    use comms_if::plan::{DrivingDirection, PlanSegment};

    #[test]
    fn test_accepts_plan_when_idle() {
        let mut mgr = TrackMgr::default();

        assert!(mgr.submit_plan(make_plan(&[3, 2])));
        assert_eq!(mgr.status(), TrackingStatus::PlanStaged);
        assert!(mgr.report().last_rejection.is_none());
    }

    #[test]
    fn test_rejects_plan_while_one_is_staged() {
        let mut mgr = TrackMgr::default();
        assert!(mgr.submit_plan(make_plan(&[3])));

        assert!(!mgr.submit_plan(make_plan(&[2])));
        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::PlanWhileActive)
        );

        // The staged plan must be the original one
        assert_eq!(mgr.status(), TrackingStatus::PlanStaged);
        assert_eq!(mgr.session.plan().unwrap().num_poses(), 3);
    }

    #[test]
    fn test_rejects_empty_plan() {
        let mut mgr = TrackMgr::default();

        assert!(!mgr.submit_plan(Plan { segments: vec![] }));
        assert_eq!(mgr.report().last_rejection, Some(RejectionReason::EmptyPlan));
        assert_eq!(mgr.status(), TrackingStatus::Idle);
    }

    #[test]
    fn test_rejects_short_segment() {
        let mut mgr = TrackMgr::default();

        // Second segment has a single pose
        let mut plan = make_plan(&[2]);
        plan.segments.push(PlanSegment {
            direction: DrivingDirection::Forward,
            poses: vec![plan.segments[0].poses[1]],
        });

        assert!(!mgr.submit_plan(plan));
        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::ShortSegment { index: 1 })
        );
        assert_eq!(mgr.status(), TrackingStatus::Idle);
    }
}
