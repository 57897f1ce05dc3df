//! Raycasting for weapon hit detection.

use engine_core::Vec3;
use rapier3d::na::{Isometry3, Point3, Vector3};
use rapier3d::parry::query::{Ray as ParryRay, RayCast};
use rapier3d::parry::shape::{Ball, Cuboid};

/// Default reach of a hit-scan query.
pub const DEFAULT_RAY_LENGTH: f32 = 1000.0;

/// Half-thickness given to flat panels so they have a volume to intersect.
const PANEL_HALF_THICKNESS: f32 = 0.001;

/// A ray with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; returns `None` when `direction` has no length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    fn to_parry(self) -> ParryRay {
        ParryRay::new(
            Point3::new(self.origin.x, self.origin.y, self.origin.z),
            Vector3::new(self.direction.x, self.direction.y, self.direction.z),
        )
    }
}

/// Result of a raycast query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

impl RaycastHit {
    fn at(ray: &Ray, distance: f32) -> Self {
        Self {
            distance,
            point: ray.point_at(distance),
        }
    }
}

/// Intersect a ray with a sphere surface.
///
/// Only hits strictly in front of the origin count; an origin already inside
/// the sphere reports nothing, matching a renderer that culls back faces.
pub fn raycast_sphere(ray: &Ray, center: Vec3, radius: f32, max_distance: f32) -> Option<RaycastHit> {
    if radius <= 0.0 {
        return None;
    }
    if ray.origin.distance_squared(center) <= radius * radius {
        return None;
    }
    let ball = Ball::new(radius);
    let pose = Isometry3::translation(center.x, center.y, center.z);
    ball.cast_ray(&pose, &ray.to_parry(), max_distance, true)
        .filter(|&toi| toi > 0.0)
        .map(|toi| RaycastHit::at(ray, toi))
}

/// A flat rectangle lying in the XZ plane (normal +Y), such as a floor decal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPanel {
    pub center: Vec3,
    /// Half extent along X.
    pub half_width: f32,
    /// Half extent along Z.
    pub half_depth: f32,
}

impl FloorPanel {
    pub fn new(center: Vec3, width: f32, depth: f32) -> Self {
        Self {
            center,
            half_width: width * 0.5,
            half_depth: depth * 0.5,
        }
    }
}

/// Intersect a ray with the upward-facing side of a floor panel.
///
/// Rays travelling upward, or starting below the panel, never hit it.
pub fn raycast_floor_panel(ray: &Ray, panel: &FloorPanel, max_distance: f32) -> Option<RaycastHit> {
    if ray.direction.y >= 0.0 || ray.origin.y <= panel.center.y {
        return None;
    }
    let slab = Cuboid::new(Vector3::new(
        panel.half_width,
        PANEL_HALF_THICKNESS,
        panel.half_depth,
    ));
    let pose = Isometry3::translation(panel.center.x, panel.center.y, panel.center.z);
    slab.cast_ray(&pose, &ray.to_parry(), max_distance, true)
        .filter(|&toi| toi > 0.0)
        .map(|toi| RaycastHit::at(ray, toi))
}

/// Pick the nearest hit among candidates, keeping the caller's tag.
///
/// Equal distances keep the earlier candidate so results are stable.
pub fn nearest_hit<T>(hits: impl IntoIterator<Item = (T, RaycastHit)>) -> Option<(T, RaycastHit)> {
    let mut best: Option<(T, RaycastHit)> = None;
    for (tag, hit) in hits {
        let closer = match &best {
            None => true,
            Some((_, prev)) => hit.distance < prev.distance,
        };
        if closer {
            best = Some((tag, hit));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Z).unwrap()
    }

    #[test]
    fn zero_direction_has_no_ray() {
        assert!(Ray::new(Vec3::ZERO, Vec3::ZERO).is_none());
    }

    #[test]
    fn sphere_straight_ahead_is_hit_at_near_surface() {
        let hit = raycast_sphere(&forward_ray(), Vec3::new(0.0, 1.7, -5.0), 0.3, DEFAULT_RAY_LENGTH)
            .expect("sphere ahead should be hit");
        assert!((hit.distance - 4.7).abs() < 1e-4);
        assert!((hit.point.z + 4.7).abs() < 1e-4);
    }

    #[test]
    fn sphere_behind_or_off_axis_is_missed() {
        let ray = forward_ray();
        assert!(raycast_sphere(&ray, Vec3::new(0.0, 1.7, 5.0), 0.3, DEFAULT_RAY_LENGTH).is_none());
        assert!(raycast_sphere(&ray, Vec3::new(1.0, 1.7, -5.0), 0.3, DEFAULT_RAY_LENGTH).is_none());
    }

    #[test]
    fn sphere_beyond_max_distance_is_missed() {
        assert!(raycast_sphere(&forward_ray(), Vec3::new(0.0, 1.7, -50.0), 0.3, 10.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_does_not_hit() {
        assert!(raycast_sphere(&forward_ray(), Vec3::new(0.0, 1.7, -0.1), 0.3, DEFAULT_RAY_LENGTH).is_none());
    }

    #[test]
    fn floor_panel_hit_from_above() {
        let panel = FloorPanel::new(Vec3::new(0.0, 0.01, 0.0), 1.2, 0.6);
        let down = Ray::new(Vec3::new(0.0, 1.7, 0.0), Vec3::NEG_Y).unwrap();
        let hit = raycast_floor_panel(&down, &panel, DEFAULT_RAY_LENGTH).expect("looking down hits");
        assert!((hit.distance - (1.7 - 0.01 - PANEL_HALF_THICKNESS)).abs() < 1e-3);
    }

    #[test]
    fn floor_panel_missed_outside_extent_or_looking_up() {
        let panel = FloorPanel::new(Vec3::new(0.0, 0.01, 0.0), 1.2, 0.6);
        let off = Ray::new(Vec3::new(0.0, 1.7, 1.0), Vec3::NEG_Y).unwrap();
        assert!(raycast_floor_panel(&off, &panel, DEFAULT_RAY_LENGTH).is_none());
        let up = Ray::new(Vec3::new(0.0, 1.7, 0.0), Vec3::Y).unwrap();
        assert!(raycast_floor_panel(&up, &panel, DEFAULT_RAY_LENGTH).is_none());
        let level = forward_ray();
        assert!(raycast_floor_panel(&level, &panel, DEFAULT_RAY_LENGTH).is_none());
    }

    #[test]
    fn nearest_hit_prefers_smallest_distance_then_first() {
        let a = RaycastHit { distance: 3.0, point: Vec3::ZERO };
        let b = RaycastHit { distance: 1.0, point: Vec3::ZERO };
        let c = RaycastHit { distance: 1.0, point: Vec3::ONE };
        let (tag, hit) = nearest_hit([("a", a), ("b", b), ("c", c)]).unwrap();
        assert_eq!(tag, "b");
        assert_eq!(hit.distance, 1.0);
        assert!(nearest_hit(Vec::<(u8, RaycastHit)>::new()).is_none());
    }
}
