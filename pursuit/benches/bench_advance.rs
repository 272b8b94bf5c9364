//! # Pure Pursuit Advance Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use chrono::Utc;
use comms_if::{
    eqpt::odom::{VehiclePose, VehicleState, VehicleTwist},
    plan::{DrivingDirection, Plan, PlanPose, PlanSegment},
};
use pursuit::{PursuitParams, PursuitTracker};

fn advance_benchmark(c: &mut Criterion) {
    // ---- Build a long single segment plan ----

    // An arc of gently varying curvature, 0.05 m point separation
    let poses: Vec<PlanPose> = (0..2000)
        .map(|i| {
            let s = i as f64 * 0.05;
            PlanPose {
                x_m: s,
                y_m: (0.1 * s).sin(),
                heading_rad: 0.0,
            }
        })
        .collect();

    let plan = Plan {
        segments: vec![PlanSegment {
            direction: DrivingDirection::Forward,
            poses,
        }],
    };

    let mut tracker = PursuitTracker::new(PursuitParams {
        wheel_base_m: 2.7,
        lookahead_m: 2.0,
        desired_speed_ms: 1.5,
        goal_tolerance_m: 0.3,
        divergence_limit_m: 3.0,
    });

    tracker.import_plan(&plan).unwrap();

    // Vehicle on the path, a little way into the first segment
    tracker.update_state(&VehicleState {
        timestamp: Utc::now(),
        pose: VehiclePose {
            position_m: [1.0, (0.1f64).sin(), 0.0],
            attitude_q: [0.0, 0.0, 0.0, 1.0],
        },
        twist: VehicleTwist::default(),
    });

    c.bench_function("PursuitTracker::advance", |b| {
        b.iter(|| tracker.advance().unwrap())
    });
}

criterion_group!(benches, advance_benchmark);
criterion_main!(benches);
