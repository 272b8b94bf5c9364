//! Operator command dispatch
//!
//! Start and stop commands from the control station enter the manager here.
//! Every command is acknowledged on receipt. Whether it caused a transition
//! is reported through telemetry, not through the acknowledgement, so the
//! command link never blocks on session state.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{info, warn};

// Internal
use super::{RejectionReason, TrackMgr, TrackingStatus};
use crate::tracker::PathTracker;
use comms_if::tc::TrackingCmd;

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl TrackMgr {
    /// Process a tracking command from the operator.
    ///
    /// Always returns true, commands are acknowledged on receipt. Rejected
    /// commands leave the session untouched and record their reason in the
    /// status report.
    pub fn handle_command(&mut self, cmd: TrackingCmd, tracker: &mut dyn PathTracker) -> bool {
        match cmd {
            TrackingCmd::StartTracking => self.process_start(tracker),
            TrackingCmd::StopTracking => self.process_stop(tracker),
            TrackingCmd::Unknown => {
                warn!("Recieved an unknown command, ignoring it");
                self.report.last_rejection = Some(RejectionReason::UnknownCommand);
            }
        }

        true
    }

    /// Start tracking the staged plan.
    fn process_start(&mut self, tracker: &mut dyn PathTracker) {
        match self.session.status() {
            TrackingStatus::PlanStaged => (),
            TrackingStatus::Idle => {
                warn!("Cannot start tracking: no plan is staged");
                self.report.last_rejection = Some(RejectionReason::StartWithoutPlan);
                return;
            }
            s => {
                warn!("Cannot start tracking: the session is {:?}", s);
                self.report.last_rejection = Some(RejectionReason::StartWhileTracking);
                return;
            }
        }

        // The session moves to Tracking and the plan is handed to the
        // tracker. The borrow of the staged plan ends here, before any
        // teardown below.
        let import_result = match self.session.begin_tracking() {
            Ok(plan) => tracker.import_plan(plan),
            Err(e) => {
                // Unreachable while the PlanStaged check above holds
                warn!("Could not begin tracking: {}", e);
                self.report.last_rejection = Some(RejectionReason::StartWithoutPlan);
                return;
            }
        };

        match import_result {
            Ok(()) => info!("Started tracking"),
            Err(e) => {
                warn!("Tracking could not start: {}", e);
                self.report.tracker_failed = true;
                self.stop_and_reset(tracker);
            }
        }
    }

    /// Stop tracking and return the session to idle.
    fn process_stop(&mut self, tracker: &mut dyn PathTracker) {
        match self.session.status() {
            TrackingStatus::Tracking => {
                self.stop_and_reset(tracker);
                info!("Stopped tracking");
            }
            s => {
                warn!("Cannot stop tracking: the session is {:?}", s);
                self.report.last_rejection = Some(RejectionReason::StopWhileNotTracking);
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::super::test_util::{make_plan, ScriptedTracker};
    use super::*;
    use crate::tracker::TrackerError;

    #[test]
    fn test_commands_are_always_acked() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        // All of these are rejected, but all must ack
        assert!(mgr.handle_command(TrackingCmd::StartTracking, &mut tracker));
        assert!(mgr.handle_command(TrackingCmd::StopTracking, &mut tracker));
        assert!(mgr.handle_command(TrackingCmd::Unknown, &mut tracker));

        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::UnknownCommand)
        );
    }

    #[test]
    fn test_start_without_plan_is_rejected() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);

        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::StartWithoutPlan)
        );
        assert_eq!(mgr.status(), TrackingStatus::Idle);
        assert_eq!(tracker.num_imports, 0);
    }

    #[test]
    fn test_start_hands_plan_to_tracker() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        assert!(mgr.submit_plan(make_plan(&[3])));
        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);

        assert_eq!(mgr.status(), TrackingStatus::Tracking);
        assert_eq!(tracker.num_imports, 1);
        assert!(mgr.report().last_rejection.is_none());
    }

    #[test]
    fn test_start_while_tracking_is_rejected() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        mgr.submit_plan(make_plan(&[3]));
        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);
        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);

        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::StartWhileTracking)
        );
        assert_eq!(mgr.status(), TrackingStatus::Tracking);
        assert_eq!(tracker.num_imports, 1);
    }

    #[test]
    fn test_stop_tears_the_session_down_once() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        mgr.submit_plan(make_plan(&[3]));
        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);
        mgr.handle_command(TrackingCmd::StopTracking, &mut tracker);

        assert_eq!(mgr.status(), TrackingStatus::Idle);
        assert_eq!(tracker.num_stops, 1);
        assert!(mgr.report().last_rejection.is_none());

        // A second stop is a rejection, not a second teardown
        mgr.handle_command(TrackingCmd::StopTracking, &mut tracker);
        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::StopWhileNotTracking)
        );
        assert_eq!(tracker.num_stops, 1);
    }

    #[test]
    fn test_stop_while_staged_keeps_the_plan() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker::default();

        mgr.submit_plan(make_plan(&[3]));
        mgr.handle_command(TrackingCmd::StopTracking, &mut tracker);

        assert_eq!(
            mgr.report().last_rejection,
            Some(RejectionReason::StopWhileNotTracking)
        );
        assert_eq!(mgr.status(), TrackingStatus::PlanStaged);
        assert_eq!(tracker.num_stops, 0);
    }

    #[test]
    fn test_rejected_import_tears_the_session_down() {
        let mut mgr = TrackMgr::default();
        let mut tracker = ScriptedTracker {
            import_result: Some(TrackerError::PlanRejected("bad plan".into())),
            ..Default::default()
        };

        mgr.submit_plan(make_plan(&[3]));
        mgr.handle_command(TrackingCmd::StartTracking, &mut tracker);

        assert_eq!(mgr.status(), TrackingStatus::Idle);
        assert!(mgr.session.plan().is_none());
        assert!(mgr.report().tracker_failed);
        assert_eq!(tracker.num_stops, 1);
    }
}
