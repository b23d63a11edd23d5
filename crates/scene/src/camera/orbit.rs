use std::f64::consts::TAU;

use foundation::math::Vec3;

use crate::config::OrbitConfig;
use crate::transform::CameraPose;

/// Scroll-driven orbit around the scene center.
///
/// The target pose is a pure function of the scroll offset; the camera is
/// smoothed toward it so fast scroll flicks do not snap the view.
#[derive(Debug, Clone)]
pub struct OrbitController {
    config: OrbitConfig,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// `offset` in `[0, 1]` maps onto `[0, 2π]`.
    pub fn angle(offset: f64) -> f64 {
        offset.clamp(0.0, 1.0) * TAU
    }

    pub fn target_pose(&self, offset: f64) -> CameraPose {
        let offset = offset.clamp(0.0, 1.0);
        let look_at = Vec3::from(self.config.look_at);
        let bob = self.config.wave_amplitude * (offset * TAU * self.config.wave_cycles).sin();
        let on_circle = Vec3::on_circle(self.config.radius, Self::angle(offset), bob);
        CameraPose::new(look_at + on_circle, look_at)
    }

    /// One frame of smoothing toward the orbit pose for `offset`.
    pub fn step(&self, camera: CameraPose, offset: f64, dt: f64) -> CameraPose {
        camera.damp_toward(self.target_pose(offset), self.config.rate, dt)
    }
}
