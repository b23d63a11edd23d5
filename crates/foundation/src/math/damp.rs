//! Frame-rate independent exponential smoothing.
//!
//! `damp(current, target, rate, dt)` moves `current` toward `target` by the
//! fraction `1 - exp(-rate * dt)`. Two half-steps produce the same result as
//! one full step, so motion does not depend on the refresh rate.

use super::Vec3;

/// Largest `dt` fed into a single smoothing step (seconds).
pub const MAX_STEP_DT: f64 = 0.1;

/// Blend fraction for one step of `dt` seconds at `rate` (per second).
pub fn damp_factor(rate: f64, dt: f64) -> f64 {
    let dt = dt.clamp(0.0, MAX_STEP_DT);
    1.0 - (-rate.max(0.0) * dt).exp()
}

pub fn damp(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    current + (target - current) * damp_factor(rate, dt)
}

pub fn damp_vec3(current: Vec3, target: Vec3, rate: f64, dt: f64) -> Vec3 {
    current.lerp(target, damp_factor(rate, dt))
}

/// Plain linear interpolation, `t` unclamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::{damp, damp_factor, damp_vec3, lerp};
    use crate::math::Vec3;

    #[test]
    fn zero_dt_does_not_move() {
        assert_eq!(damp(1.0, 5.0, 4.0, 0.0), 1.0);
    }

    #[test]
    fn two_half_steps_equal_one_step() {
        let one = damp(0.0, 10.0, 3.0, 1.0 / 30.0);
        let half = damp(damp(0.0, 10.0, 3.0, 1.0 / 60.0), 10.0, 3.0, 1.0 / 60.0);
        assert!((one - half).abs() < 1e-12);
    }

    #[test]
    fn factor_stays_in_unit_interval() {
        for dt in [0.0, 0.001, 0.016, 0.5, 10.0] {
            let f = damp_factor(8.0, dt);
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn converges_toward_target() {
        let mut p = Vec3::new(10.0, 0.0, 0.0);
        for _ in 0..600 {
            p = damp_vec3(p, Vec3::ZERO, 2.0, 1.0 / 60.0);
        }
        assert!(p.length() < 1e-3);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(-15.0, 0.0, 0.5), -7.5);
    }
}
