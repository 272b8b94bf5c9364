//! # Vehicle telemetry cache

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::odom::VehicleState;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Cache of the most recent vehicle state observation.
///
/// Telemetry is last write wins: each update overwrites the previous
/// observation and no history is kept. Staleness is the responsibility of the
/// telemetry source.
#[derive(Default)]
pub struct OdomCache {
    state: Option<VehicleState>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OdomCache {
    /// Overwrite the cached state with a new observation.
    pub fn update(&mut self, state: VehicleState) {
        self.state = Some(state);
    }

    /// Return the last observed state, or `None` if no telemetry has been
    /// recieved yet.
    pub fn current(&self) -> Option<VehicleState> {
        self.state
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use comms_if::eqpt::odom::{VehiclePose, VehicleTwist};

    fn state_at(x_m: f64) -> VehicleState {
        VehicleState {
            timestamp: Utc::now(),
            pose: VehiclePose {
                position_m: [x_m, 0.0, 0.0],
                ..VehiclePose::identity()
            },
            twist: VehicleTwist::default(),
        }
    }

    #[test]
    fn test_empty_until_first_observation() {
        let cache = OdomCache::default();
        assert!(cache.current().is_none());
    }

    #[test]
    fn test_update_overwrites() {
        let mut cache = OdomCache::default();

        cache.update(state_at(1.0));
        cache.update(state_at(2.0));

        let state = cache.current().unwrap();
        assert_eq!(state.pose.position_m[0], 2.0);
    }
}
