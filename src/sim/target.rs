//! Targets and the live target pool
//!
//! The pool owns every live target in creation order (ids ascending), which
//! is also the hit resolver's tie-break order.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::curve::{self, spawn_params};
use super::mode::Mode;
use super::ray::Sphere;
use crate::consts::*;

/// Visual effect toggles applied during target updates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    /// Horizontal oscillation
    pub animated: bool,
    /// Pulsing radius
    pub glowing: bool,
}

/// A spherical target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
    /// Spawn timestamp (seconds)
    pub born_at: f64,
    /// Lifetime (seconds)
    pub ttl: f64,
    /// Radius after mode shrink, before pulse
    pub base_radius: f32,
    /// Radius used for hit testing and drawing
    pub radius: f32,
    /// Anchor for horizontal oscillation
    pub original_x: f32,
    pub glow_phase: f32,
    /// -1 or 1
    pub move_direction: i8,
}

impl Target {
    /// Seconds since spawn
    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.born_at
    }

    /// Strictly older than its lifetime
    #[inline]
    pub fn is_expired(&self, now: f64) -> bool {
        self.age(now) > self.ttl
    }

    /// Body sphere
    pub fn body(&self) -> Sphere {
        Sphere::new(self.pos, self.radius)
    }

    /// Precision head sphere, directly above the body
    pub fn head(&self) -> Sphere {
        Sphere::new(
            self.pos + Vec3::Z * (self.radius * HEADSHOT_OFFSET_FACTOR),
            self.radius * PRECISION_INNER_RATIO,
        )
    }

    /// Re-derive position and radius for this tick
    ///
    /// Shrink is applied first, the glow pulse multiplies the shrunk radius.
    fn animate(&mut self, now: f64, base_radius: f32, effects: Effects) {
        if effects.animated {
            let age = self.age(now) as f32;
            let offset =
                (age * SPHERE_MOVE_SPEED / SPHERE_MOVE_RANGE).sin() * SPHERE_MOVE_RANGE * 0.5;
            let limit = ARENA_HALF * SPHERE_MOVE_LIMIT;
            self.pos.x = (self.original_x + offset).clamp(-limit, limit);
        }

        self.base_radius = base_radius;
        self.radius = if effects.glowing {
            self.glow_phase += GLOW_STEP;
            base_radius * (1.0 + GLOW_AMPLITUDE * self.glow_phase.sin())
        } else {
            base_radius
        };
    }
}

/// Read-only view of a live target for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub position: Vec3,
    pub radius: f32,
    pub glow_phase: f32,
    /// Head sphere (Precision mode only)
    pub head: Option<Sphere>,
}

/// Owns the live targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPool {
    targets: Vec<Target>,
    next_id: u32,
}

impl Default for TargetPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetPool {
    pub fn new() -> Self {
        Self {
            targets: Vec::with_capacity(MAX_TARGETS),
            next_id: 1,
        }
    }

    /// Remove every target and restart id allocation
    pub fn clear(&mut self) {
        self.targets.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn has_capacity(&self) -> bool {
        self.targets.len() < MAX_TARGETS
    }

    /// Live targets in creation order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn find(&self, id: u32) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Spawn a target sized for `mode` at `progress`
    ///
    /// Returns the new id, or `None` when the pool is full. Positions are
    /// uniform in the forward arena volume; overlaps are allowed.
    pub fn spawn<R: Rng>(
        &mut self,
        mode: Mode,
        progress: f64,
        now: f64,
        rng: &mut R,
    ) -> Option<u32> {
        if !self.has_capacity() {
            return None;
        }

        let params = spawn_params(mode, progress, rng);
        let half_x = ARENA_HALF * 0.5;
        let pos = Vec3::new(
            rng.random_range(-half_x..=half_x),
            rng.random_range(TARGET_MIN_Y..=ARENA_DEPTH * 0.9),
            rng.random_range(TARGET_MIN_Z..=TARGET_MAX_Z),
        );
        let glow_phase = rng.random_range(0.0..std::f32::consts::TAU);
        let move_direction = if rng.random_bool(0.5) { 1 } else { -1 };

        let id = self.place(pos, params.radius, params.ttl, now)?;
        if let Some(target) = self.targets.last_mut() {
            target.glow_phase = glow_phase;
            target.move_direction = move_direction;
        }
        log::trace!("spawned target {} r={:.1} ttl={:.2}s", id, params.radius, params.ttl);
        Some(id)
    }

    /// Insert a target at a fixed position
    ///
    /// Refused when full, or when `radius`/`ttl` are not positive.
    pub fn place(&mut self, pos: Vec3, radius: f32, ttl: f64, now: f64) -> Option<u32> {
        if !self.has_capacity() || radius.is_nan() || radius <= 0.0 || ttl.is_nan() || ttl <= 0.0 {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            pos,
            born_at: now,
            ttl,
            base_radius: radius,
            radius,
            original_x: pos.x,
            glow_phase: 0.0,
            move_direction: 1,
        });
        Some(id)
    }

    /// Expire old targets, then animate the survivors
    ///
    /// Returns the ids that expired this tick.
    pub fn update(&mut self, now: f64, mode: Mode, progress: f64, effects: Effects) -> Vec<u32> {
        let mut expired = Vec::new();
        self.targets.retain(|t| {
            if t.is_expired(now) {
                expired.push(t.id);
                false
            } else {
                true
            }
        });

        let base_radius = curve::target_radius(mode, progress);
        for target in &mut self.targets {
            target.animate(now, base_radius, effects);
        }

        if !expired.is_empty() {
            log::trace!("expired targets {:?}", expired);
        }
        expired
    }

    /// Remove the target at `index` (hit)
    pub fn remove(&mut self, index: usize) -> Option<Target> {
        if index < self.targets.len() {
            Some(self.targets.remove(index))
        } else {
            None
        }
    }

    /// Renderer snapshot; head spheres included when `mode` has them
    pub fn views(&self, mode: Mode) -> Vec<TargetView> {
        let heads = mode.config().headshot_zone;
        self.targets
            .iter()
            .map(|t| TargetView {
                id: t.id,
                position: t.pos,
                radius: t.radius,
                glow_phase: t.glow_phase,
                head: heads.then(|| t.head()),
            })
            .collect()
    }
}
