use std::f64::consts::{PI, TAU};

use foundation::math::{Vec3, damp_factor, damp_vec3};

/// Placement of a card in world space: position, yaw and uniform scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardTransform {
    pub position: Vec3,
    /// Rotation around the Y axis (radians).
    pub rotation_y: f64,
    pub scale: f64,
}

impl CardTransform {
    pub fn new(position: Vec3, rotation_y: f64) -> Self {
        Self {
            position,
            rotation_y,
            scale: 1.0,
        }
    }

    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }

    /// One smoothing step toward `target`. Yaw takes the short way around.
    pub fn damp_toward(self, target: Self, rate: f64, dt: f64) -> Self {
        let t = damp_factor(rate, dt);
        Self {
            position: self.position.lerp(target.position, t),
            rotation_y: self.rotation_y + angle_delta(self.rotation_y, target.rotation_y) * t,
            scale: self.scale + (target.scale - self.scale) * t,
        }
    }

    /// Largest of the positional, angular and scale errors.
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position
            .distance(other.position)
            .max(angle_delta(self.rotation_y, other.rotation_y).abs())
            .max((self.scale - other.scale).abs())
    }

    /// The card's facing direction in world space.
    pub fn forward(&self) -> Vec3 {
        Vec3::FORWARD.rotate_y(self.rotation_y)
    }
}

/// Camera eye position and look-at point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn damp_toward(self, target: Self, rate: f64, dt: f64) -> Self {
        Self {
            position: damp_vec3(self.position, target.position, rate, dt),
            look_at: damp_vec3(self.look_at, target.look_at, rate, dt),
        }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position
            .distance(other.position)
            .max(self.look_at.distance(other.look_at))
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-π, π]`.
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}
