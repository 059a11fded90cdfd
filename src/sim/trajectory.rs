//! Flight curves
//!
//! Every jump is a quadratic Bézier curve through three control points:
//! launch point, drag-release point, and a mirrored endpoint. Progress along
//! the curve is not clamped at 1; past that the curve keeps extrapolating
//! beyond the endpoint until something else stops the hero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::snap_point;
use crate::tuning::Tuning;

/// Identifies one flight curve.
///
/// Gesture curves get increasing ids; a hero only restarts its progress when
/// it sees an id it is not already flying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u64);

impl ProjectileId {
    /// Id shared by every synthetic dash curve
    pub const DASH: Self = Self(u64::MAX);
}

/// Monotonic source of gesture curve ids
#[derive(Debug, Clone, Default)]
pub struct ProjectileIds {
    next: u64,
}

impl ProjectileIds {
    pub fn next_id(&mut self) -> ProjectileId {
        let id = ProjectileId(self.next);
        self.next += 1;
        id
    }
}

/// The three control points of one flight, plus its id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Launch point
    pub p0: Vec2,
    /// Control point (where the drag was released)
    pub p1: Vec2,
    /// Mirrored endpoint
    pub p2: Vec2,
    pub id: ProjectileId,
}

impl Projectile {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, id: ProjectileId) -> Self {
        Self { p0, p1, p2, id }
    }

    /// Build the curve for a completed drag gesture
    pub fn from_gesture(start: Vec2, release: Vec2, tuning: &Tuning, id: ProjectileId) -> Self {
        let p2 = mirrored_endpoint(start, release, tuning.aim_extension, tuning.reference_height);
        Self::new(start, release, p2, id)
    }

    /// Synthetic dash curve launched from `origin`
    pub fn dash(origin: Vec2, dash_distance: f32, tuning: &Tuning) -> Self {
        let p0 = snap_point(origin);
        Self::new(
            p0,
            p0 + Vec2::new(dash_distance, -tuning.dash_lift),
            p0 + Vec2::new(dash_distance * 2.0, -tuning.dash_drop),
            ProjectileId::DASH,
        )
    }

    /// Position at progress `t`
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        quadratic_bezier(self.p0, self.p1, self.p2, t)
    }

    /// True when the curve heads left (hero drawn mirrored)
    #[inline]
    pub fn is_flipped(&self) -> bool {
        is_facing_flipped(self.p0, self.p1)
    }

    /// Dash length derived from this curve: a quarter of its horizontal
    /// control-point delta, in whole pixels rounded toward negative infinity
    pub fn dash_distance(&self) -> f32 {
        ((self.p1.x - self.p0.x).trunc() / 4.0).floor()
    }
}

/// Quadratic Bézier: `(1-t)²·p0 + 2(1-t)t·p1 + t²·p2`
///
/// Exact at both ends: `t == 0` yields `p0` and `t == 1` yields `p2`.
#[inline]
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let omt = 1.0 - t;
    p0 * (omt * omt) + p1 * (2.0 * omt * t) + p2 * (t * t)
}

/// Advance curve progress by one step. Never clamped.
#[inline]
pub fn advance_progress(t: f32, speed: f32, dt: f32) -> f32 {
    t + (speed / 100.0) * dt
}

/// Facing is flipped when the control point lies left of the launch point
#[inline]
pub fn is_facing_flipped(p0: Vec2, p1: Vec2) -> bool {
    p1.x < p0.x
}

/// Endpoint of a jump curve: the horizontal drag distance extended by
/// `extension`, dropped to `reference_height`
#[inline]
pub fn mirrored_endpoint(start: Vec2, release: Vec2, extension: f32, reference_height: f32) -> Vec2 {
    Vec2::new(start.x + (release.x - start.x) * extension, reference_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Projectile {
        Projectile::new(
            Vec2::new(100.0, 500.0),
            Vec2::new(200.0, 300.0),
            Vec2::new(300.0, 600.0),
            ProjectileId(0),
        )
    }

    #[test]
    fn test_midpoint() {
        let p = sample();
        // 0.25*p0 + 0.5*p1 + 0.25*p2
        assert_eq!(p.point_at(0.5), Vec2::new(200.0, 425.0));
    }

    #[test]
    fn test_progress_overshoot_extrapolates_past_endpoint() {
        let p = sample();
        let mut t = 0.0;
        for _ in 0..80 {
            t = advance_progress(t, 1.6, 1.0);
        }
        assert!(t > 1.0);
        let past = p.point_at(t);
        assert!(past.x > p.p2.x);
        assert!(past.y > p.p2.y);
    }

    #[test]
    fn test_advance_progress() {
        assert!((advance_progress(0.0, 1.6, 1.0) - 0.016).abs() < 1e-6);
        assert!((advance_progress(0.5, 6.0, 2.0) - 0.62).abs() < 1e-6);
    }

    #[test]
    fn test_facing() {
        assert!(is_facing_flipped(Vec2::new(100.0, 0.0), Vec2::new(50.0, 0.0)));
        assert!(!is_facing_flipped(Vec2::new(100.0, 0.0), Vec2::new(150.0, 0.0)));
        assert!(!is_facing_flipped(Vec2::new(100.0, 0.0), Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_gesture_curve_mirrors_drag() {
        let tuning = Tuning::default();
        let p = Projectile::from_gesture(
            Vec2::new(100.0, 544.0),
            Vec2::new(160.0, 400.0),
            &tuning,
            ProjectileId(3),
        );
        assert_eq!(p.p2, Vec2::new(220.0, 600.0));
        assert_eq!(p.id, ProjectileId(3));
    }

    #[test]
    fn test_dash_distance_rounds_down() {
        let mut p = sample();
        assert_eq!(p.dash_distance(), 25.0);

        p.p1.x = p.p0.x + 10.9;
        assert_eq!(p.dash_distance(), 2.0);

        // Leftward curves round toward negative infinity
        p.p1.x = p.p0.x - 10.0;
        assert_eq!(p.dash_distance(), -3.0);
    }

    #[test]
    fn test_dash_curve_geometry() {
        let tuning = Tuning::default();
        let p = Projectile::dash(Vec2::new(100.7, 300.2), 25.0, &tuning);
        assert_eq!(p.p0, Vec2::new(100.0, 300.0));
        assert_eq!(p.p1, Vec2::new(125.0, 230.0));
        assert_eq!(p.p2, Vec2::new(150.0, 294.0));
        assert_eq!(p.id, ProjectileId::DASH);
    }

    #[test]
    fn test_ids_increase() {
        let mut ids = ProjectileIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b.0 > a.0);
        assert_ne!(a, ProjectileId::DASH);
    }

    proptest! {
        #[test]
        fn prop_curve_hits_both_endpoints_exactly(
            x0 in -1000.0f32..1000.0, y0 in -1000.0f32..1000.0,
            x1 in -1000.0f32..1000.0, y1 in -1000.0f32..1000.0,
            x2 in -1000.0f32..1000.0, y2 in -1000.0f32..1000.0,
        ) {
            let p0 = Vec2::new(x0, y0);
            let p1 = Vec2::new(x1, y1);
            let p2 = Vec2::new(x2, y2);
            prop_assert_eq!(quadratic_bezier(p0, p1, p2, 0.0), p0);
            prop_assert_eq!(quadratic_bezier(p0, p1, p2, 1.0), p2);
        }
    }
}
