//! # Data Store

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::act::ActCmd;

use crate::{odom::OdomCache, track_mgr};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Elapsed time since the start of the session
    pub elapsed_time_s: f64,

    // Odometry
    /// Most recent vehicle state observation
    pub odom: OdomCache,

    // Tracking manager
    pub track_mgr: track_mgr::TrackMgr,
    pub track_status_rpt: track_mgr::StatusReport,

    // Actuation
    /// Command published to the actuation system this cycle
    pub act_cmd: ActCmd,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        if self.num_cycles % (cycle_frequency_hz as u128) == 0 {
            self.is_1_hz_cycle = true;
        } else {
            self.is_1_hz_cycle = false;
        }

        self.track_mgr.cycle_start();
        self.track_status_rpt = track_mgr::StatusReport::default();
        self.act_cmd = ActCmd::fail_safe();

        self.elapsed_time_s = util::session::get_elapsed_seconds();
    }
}
