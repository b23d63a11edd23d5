//! Camera controllers and the gate that picks exactly one of them per frame.

pub mod focused;
pub mod free_roam;
pub mod orbit;

pub use focused::FocusedController;
pub use free_roam::{FreeRoamController, MoveKey};
pub use orbit::OrbitController;

use foundation::math::Vec3;
use serde::Serialize;

use crate::config::ProjectionConfig;
use crate::transform::CameraPose;

/// Which controller owns the camera this frame.
///
/// The three controllers are mutually exclusive; the gate is evaluated once
/// per frame before any controller runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    Orbit,
    Focused,
    FreeRoam,
}

impl CameraMode {
    pub fn select(section_focused: bool, free_roam: bool) -> Self {
        if free_roam {
            CameraMode::FreeRoam
        } else if section_focused {
            CameraMode::Focused
        } else {
            CameraMode::Orbit
        }
    }
}

/// Column-major view-projection matrix for `pose`.
pub fn view_proj_matrix(pose: &CameraPose, aspect: f64, projection: &ProjectionConfig) -> [[f32; 4]; 4] {
    let view = mat4_look_at_rh(pose.position, pose.look_at, Vec3::UP);
    let proj = mat4_perspective_rh_z0(
        projection.fov_y_deg.to_radians(),
        aspect.max(1e-6),
        projection.near,
        projection.far,
    );
    mat4_mul(proj, view)
}

fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

// Right-handed, depth range [0, 1].
fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let f = (target - eye).normalize();
    let mut s = f.cross(up).normalize();
    if s == Vec3::ZERO {
        // Looking straight up or down; any horizontal side vector works.
        s = Vec3::new(1.0, 0.0, 0.0);
    }
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::{CameraMode, view_proj_matrix};
    use crate::config::ProjectionConfig;
    use crate::transform::CameraPose;
    use foundation::math::Vec3;

    #[test]
    fn free_roam_wins_over_focus() {
        assert_eq!(CameraMode::select(true, true), CameraMode::FreeRoam);
        assert_eq!(CameraMode::select(true, false), CameraMode::Focused);
        assert_eq!(CameraMode::select(false, false), CameraMode::Orbit);
    }

    fn project(m: [[f32; 4]; 4], p: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0f32; 4];
        for row in 0..4 {
            out[row] = m[0][row] * p[0] + m[1][row] * p[1] + m[2][row] * p[2] + m[3][row];
        }
        [out[0] / out[3], out[1] / out[3], out[2] / out[3]]
    }

    #[test]
    fn look_at_target_projects_to_screen_center() {
        let pose = CameraPose::new(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO);
        let m = view_proj_matrix(&pose, 16.0 / 9.0, &ProjectionConfig::default());
        let ndc = project(m, [0.0, 0.0, 0.0]);
        assert!(ndc[0].abs() < 1e-5);
        assert!(ndc[1].abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc[2]));
    }

    #[test]
    fn off_axis_eye_still_centers_target() {
        let target = Vec3::new(1.0, 0.5, -2.0);
        let pose = CameraPose::new(Vec3::new(5.0, 3.0, 7.0), target);
        let m = view_proj_matrix(&pose, 16.0 / 9.0, &ProjectionConfig::default());
        let ndc = project(m, [1.0, 0.5, -2.0]);
        assert!(ndc[0].abs() < 1e-4, "x {}", ndc[0]);
        assert!(ndc[1].abs() < 1e-4, "y {}", ndc[1]);
        assert!((0.0..=1.0).contains(&ndc[2]));

        // A point above the target lands in the upper half of the screen.
        let above = project(m, [1.0, 1.5, -2.0]);
        assert!(above[1] > 0.0);
    }

    #[test]
    fn vertical_view_does_not_produce_nan() {
        let pose = CameraPose::new(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        let m = view_proj_matrix(&pose, 1.0, &ProjectionConfig::default());
        assert!(m.iter().flatten().all(|v| v.is_finite()));
    }
}
