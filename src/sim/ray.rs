//! Ray and sphere geometry
//!
//! Targets are plain spheres, so hit testing reduces to the ray/sphere
//! quadratic. Only the near root is ever used: the player never stands
//! inside a target.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A world-space ray with a unit-length direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`
    ///
    /// Returns `None` for a zero-length or non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray from `origin` passing through `point`
    pub fn toward(origin: Vec3, point: Vec3) -> Option<Self> {
        Self::new(origin, point - origin)
    }

    /// Copy of this ray with its direction re-normalized
    ///
    /// Callers may hand us rays built by hand, so the resolver always goes
    /// through this before solving.
    pub fn normalized(&self) -> Option<Self> {
        Self::new(self.origin, self.direction)
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A sphere in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along `ray` to the near surface, if hit
    #[inline]
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        intersect(ray, self.center, self.radius)
    }
}

/// Ray/sphere intersection, near root only
///
/// `ray.direction` must be unit length. With `oc = origin - center`,
/// `b = oc·dir`, `c = oc·oc - r²`, the ray hits when `b² - c >= 0` and the
/// near root `-b - sqrt(b² - c)` is non-negative. A sphere entirely behind
/// the origin is a miss.
pub fn intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let t = -b - disc.sqrt();
    if t < 0.0 {
        return None;
    }
    Some(t)
}
