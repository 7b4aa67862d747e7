pub use kurbo::{Point, Vec2};

/// Distance below which an interpolation result snaps exactly onto its
/// target, so chasing animations terminate instead of approaching forever.
const SNAP_EPSILON: f64 = 1e-4;

/// Linear interpolation from `a` toward `b` by factor `t`, snapping to `b`
/// once the result is within [`SNAP_EPSILON`] of it.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let out = a + (b - a) * t;
    if (out - b).abs() < SNAP_EPSILON { b } else { out }
}

/// Back-easing interpolation with the classic 1.70158 overshoot constant,
/// with the same snap rule as [`lerp`].
///
/// No shipped flower head drives its motion through this curve; it is kept
/// as part of the entity toolkit.
pub fn lerp_elastic(a: f64, b: f64, t: f64) -> f64 {
    const OVERSHOOT: f64 = 1.70158;
    let t1 = t - 1.0;
    let eased = t1 * t1 * ((OVERSHOOT + 1.0) * t1 + OVERSHOOT) + 1.0;
    let out = a + (b - a) * eased;
    if (out - b).abs() < SNAP_EPSILON { b } else { out }
}

/// Rotate `p` about the origin by `angle` radians.
pub fn rotate_point(p: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_moves_monotonically_toward_target() {
        let mut v = 0.0;
        let mut prev = v;
        for _ in 0..200 {
            v = lerp(v, 10.0, 0.1);
            assert!(v >= prev);
            assert!(v <= 10.0);
            prev = v;
        }
    }

    #[test]
    fn lerp_snaps_within_epsilon() {
        assert_eq!(lerp(9.99995, 10.0, 0.1), 10.0);
        assert_eq!(lerp(10.0, 10.0, 0.1), 10.0);

        let mut v = 0.0;
        for _ in 0..10_000 {
            v = lerp(v, 10.0, 0.1);
        }
        assert_eq!(v, 10.0);
    }

    #[test]
    fn lerp_elastic_endpoints_are_stable() {
        assert_eq!(lerp_elastic(2.0, 7.0, 0.0), 2.0);
        assert_eq!(lerp_elastic(2.0, 7.0, 1.0), 7.0);
    }

    #[test]
    fn lerp_elastic_overshoots_mid_curve() {
        assert!(lerp_elastic(0.0, 1.0, 0.5) > 1.0);
    }

    #[test]
    fn rotate_point_quarter_turn() {
        let r = rotate_point(Point::new(1.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert!(r.x.abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_point_preserves_length() {
        let p = Point::new(3.0, -4.0);
        let r = rotate_point(p, 1.234);
        assert!((r.to_vec2().hypot() - 5.0).abs() < 1e-12);
    }
}
