//! # Pursuit geometry
//!
//! Geometry primitives used to find the lookahead point. The lookahead point
//! is the intersection of a circle (centred on the vehicle, radius equal to
//! the lookahead distance) with a line segment of the path.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A circle on the XY plane.
#[derive(Debug, Clone, Copy)]
pub struct Circle {
    /// Centre of the circle
    pub centre_m: Vector2<f64>,

    /// Radius of the circle
    pub radius_m: f64,
}

/// A line segment on the XY plane, directed from `start_m` to `end_m`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    /// Start point of the segment
    pub start_m: Vector2<f64>,

    /// End point of the segment
    pub end_m: Vector2<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Intersection of a circle and a line segment.
///
/// For two intersections the points are ordered along the direction of the
/// segment, so the second point is always the one closest to the segment's
/// end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    None,
    One(Vector2<f64>),
    Two(Vector2<f64>, Vector2<f64>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Circle {
    /// Find the intersection of this circle with a line segment.
    ///
    /// Only intersections lying within the bounds of the segment are
    /// returned. A segment which is degenerate (zero length) never
    /// intersects.
    pub fn intersect_segment(&self, line: &Line) -> Intersection {
        // The segment is parameterised as start + t * dir, with t in [0, 1].
        // Substituting into the circle equation gives a quadratic in t.
        let dir = line.end_m - line.start_m;
        let offset = line.start_m - self.centre_m;

        let a = dir.dot(&dir);
        let b = 2.0 * offset.dot(&dir);
        let c = offset.dot(&offset) - self.radius_m * self.radius_m;

        // Degenerate segment
        if a <= std::f64::EPSILON {
            return Intersection::None;
        }

        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return Intersection::None;
        }

        // Roots in ascending order of t, since a > 0
        let disc_sqrt = discriminant.sqrt();
        let t_near = (-b - disc_sqrt) / (2.0 * a);
        let t_far = (-b + disc_sqrt) / (2.0 * a);

        let in_bounds = |t: f64| (0.0..=1.0).contains(&t);

        // A tangent line gives two equal roots, which must not be reported as
        // two coincident points
        if (t_far - t_near).abs() <= std::f64::EPSILON {
            return match in_bounds(t_near) {
                true => Intersection::One(line.start_m + dir * t_near),
                false => Intersection::None,
            };
        }

        match (in_bounds(t_near), in_bounds(t_far)) {
            (true, true) => {
                Intersection::Two(line.start_m + dir * t_near, line.start_m + dir * t_far)
            }
            (true, false) => Intersection::One(line.start_m + dir * t_near),
            (false, true) => Intersection::One(line.start_m + dir * t_far),
            (false, false) => Intersection::None,
        }
    }
}

impl Line {
    /// Return the length of the segment.
    pub fn length_m(&self) -> f64 {
        (self.end_m - self.start_m).norm()
    }

    /// Return the point on the segment closest to the given point.
    pub fn closest_point(&self, point_m: &Vector2<f64>) -> Vector2<f64> {
        let dir = self.end_m - self.start_m;
        let length_sq = dir.dot(&dir);

        // Degenerate segment, closest point is the start
        if length_sq <= std::f64::EPSILON {
            return self.start_m;
        }

        // Project the point onto the segment, clamping the parameter so the
        // closest point stays within the segment bounds
        let t = ((point_m - self.start_m).dot(&dir) / length_sq).clamp(0.0, 1.0);

        self.start_m + dir * t
    }

    /// Return the distance from the given point to the segment.
    pub fn distance_to_point(&self, point_m: &Vector2<f64>) -> f64 {
        (point_m - self.closest_point(point_m)).norm()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn unit_circle() -> Circle {
        Circle {
            centre_m: Vector2::zeros(),
            radius_m: 1.0,
        }
    }

    #[test]
    fn test_two_intersections() {
        // A chord through the centre crosses the circle twice
        let line = Line {
            start_m: Vector2::new(-2.0, 0.0),
            end_m: Vector2::new(2.0, 0.0),
        };

        match unit_circle().intersect_segment(&line) {
            Intersection::Two(near, far) => {
                // The points must be ordered along the segment direction
                assert!((near - Vector2::new(-1.0, 0.0)).norm() < 1e-9);
                assert!((far - Vector2::new(1.0, 0.0)).norm() < 1e-9);
            }
            other => panic!("expected two intersections, got {:?}", other),
        }
    }

    #[test]
    fn test_one_intersection() {
        // A segment ending inside the circle crosses it exactly once
        let line = Line {
            start_m: Vector2::new(-2.0, 0.0),
            end_m: Vector2::new(0.0, 0.0),
        };

        match unit_circle().intersect_segment(&line) {
            Intersection::One(point) => {
                assert!((point - Vector2::new(-1.0, 0.0)).norm() < 1e-9);
            }
            other => panic!("expected one intersection, got {:?}", other),
        }
    }

    #[test]
    fn test_tangent_is_single_point() {
        let line = Line {
            start_m: Vector2::new(-2.0, 1.0),
            end_m: Vector2::new(2.0, 1.0),
        };

        match unit_circle().intersect_segment(&line) {
            Intersection::One(point) => {
                assert!((point - Vector2::new(0.0, 1.0)).norm() < 1e-6);
            }
            other => panic!("expected tangent point, got {:?}", other),
        }
    }

    #[test]
    fn test_no_intersection() {
        // Segment entirely outside the circle
        let line = Line {
            start_m: Vector2::new(-2.0, 2.0),
            end_m: Vector2::new(2.0, 2.0),
        };
        assert_eq!(unit_circle().intersect_segment(&line), Intersection::None);

        // Segment entirely inside the circle
        let line = Line {
            start_m: Vector2::new(-0.5, 0.0),
            end_m: Vector2::new(0.5, 0.0),
        };
        assert_eq!(unit_circle().intersect_segment(&line), Intersection::None);

        // Line through the circle but segment short of it
        let line = Line {
            start_m: Vector2::new(2.0, 0.0),
            end_m: Vector2::new(3.0, 0.0),
        };
        assert_eq!(unit_circle().intersect_segment(&line), Intersection::None);
    }

    #[test]
    fn test_distance_to_point() {
        let line = Line {
            start_m: Vector2::new(-1.0, 0.0),
            end_m: Vector2::new(1.0, 0.0),
        };

        // Point directly above the segment
        assert!((line.distance_to_point(&Vector2::new(0.0, 1.0)) - 1.0).abs() < 1e-9);

        // Point beyond the end, distance is to the end point
        assert!((line.distance_to_point(&Vector2::new(3.0, 0.0)) - 2.0).abs() < 1e-9);

        // Point on the segment
        assert!(line.distance_to_point(&Vector2::new(0.5, 0.0)) < 1e-9);
    }
}
