//! # Plan
//!
//! This module defines the path plan message published by the planner and
//! consumed by the vehicle executive.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// A plan defining the desired trajectory of the vehicle.
///
/// A plan is an ordered sequence of segments. A plan with no segments is
/// invalid and will be rejected by the executive, as will a plan containing a
/// segment with fewer than two poses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub segments: Vec<PlanSegment>,
}

/// A single segment of a plan, driven in one direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSegment {
    /// The direction in which this segment is to be driven
    pub direction: DrivingDirection,

    /// The poses making up this segment, in driving order
    pub poses: Vec<PlanPose>,
}

/// A single SE2 pose within a plan segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanPose {
    /// Position along the world X axis.
    ///
    /// Units: meters
    pub x_m: f64,

    /// Position along the world Y axis.
    ///
    /// Units: meters
    pub y_m: f64,

    /// Heading, the angle to the positive world X axis.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Direction in which a plan segment is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingDirection {
    Forward,
    Backwards,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Plan {
    /// True if the plan contains no segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments in the plan
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Get the total number of poses across all segments of the plan
    pub fn num_poses(&self) -> usize {
        self.segments.iter().map(|s| s.poses.len()).sum()
    }

    /// Return the index of the first segment with fewer than two poses, or
    /// `None` if every segment is trackable.
    ///
    /// A segment needs at least two poses to define a direction of travel.
    pub fn first_short_segment(&self) -> Option<usize> {
        self.segments.iter().position(|s| s.poses.len() < 2)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_first_short_segment() {
        let pose = PlanPose {
            x_m: 0.0,
            y_m: 0.0,
            heading_rad: 0.0,
        };

        let plan = Plan {
            segments: vec![
                PlanSegment {
                    direction: DrivingDirection::Forward,
                    poses: vec![pose, pose],
                },
                PlanSegment {
                    direction: DrivingDirection::Backwards,
                    poses: vec![pose],
                },
            ],
        };

        assert_eq!(plan.first_short_segment(), Some(1));
        assert_eq!(plan.num_segments(), 2);
        assert_eq!(plan.num_poses(), 3);

        let plan = Plan {
            segments: vec![PlanSegment {
                direction: DrivingDirection::Forward,
                poses: vec![pose, pose, pose],
            }],
        };

        assert!(plan.first_short_segment().is_none());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_from_json() {
        let json = r#"{
            "segments": [
                {
                    "direction": "Forward",
                    "poses": [
                        {"x_m": 0.0, "y_m": 0.0, "heading_rad": 0.0},
                        {"x_m": 1.0, "y_m": 0.0, "heading_rad": 0.0}
                    ]
                },
                {
                    "direction": "Backwards",
                    "poses": [
                        {"x_m": 1.0, "y_m": 0.0, "heading_rad": 0.0},
                        {"x_m": 0.5, "y_m": 0.5, "heading_rad": 0.785}
                    ]
                }
            ]
        }"#;

        let plan: Plan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.num_segments(), 2);
        assert_eq!(plan.segments[0].direction, DrivingDirection::Forward);
        assert_eq!(plan.segments[1].direction, DrivingDirection::Backwards);
        assert!(plan.first_short_segment().is_none());
    }
}
