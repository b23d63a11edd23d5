use std::f64::consts::FRAC_PI_2;

use foundation::math::Vec3;

use crate::config::FreeRoamConfig;
use crate::transform::CameraPose;

/// Keys that move the free-roam camera.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl MoveKey {
    /// W/A/S/D move, R/F ascend and descend.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(MoveKey::Forward),
            "s" | "S" => Some(MoveKey::Back),
            "a" | "A" => Some(MoveKey::Left),
            "d" | "D" => Some(MoveKey::Right),
            "r" | "R" => Some(MoveKey::Up),
            "f" | "F" => Some(MoveKey::Down),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            MoveKey::Forward => 1,
            MoveKey::Back => 1 << 1,
            MoveKey::Left => 1 << 2,
            MoveKey::Right => 1 << 3,
            MoveKey::Up => 1 << 4,
            MoveKey::Down => 1 << 5,
        }
    }
}

const MAX_PITCH: f64 = FRAC_PI_2 * (89.0 / 90.0);

/// Manual fly camera with drag-to-look.
#[derive(Debug, Clone)]
pub struct FreeRoamController {
    config: FreeRoamConfig,
    position: Vec3,
    yaw: f64,
    pitch: f64,
    held: u8,
    drag_from: Option<[f64; 2]>,
}

impl FreeRoamController {
    pub fn new(config: FreeRoamConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            held: 0,
            drag_from: None,
        }
    }

    /// Starts flying from wherever the camera currently is.
    pub fn take_over(&mut self, pose: &CameraPose) {
        let dir = (pose.look_at - pose.position).normalize();
        self.position = pose.position;
        if dir != Vec3::ZERO {
            self.yaw = dir.x.atan2(dir.z);
            self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.held = 0;
        self.drag_from = None;
    }

    pub fn press(&mut self, key: MoveKey) {
        self.held |= key.bit();
    }

    pub fn release(&mut self, key: MoveKey) {
        self.held &= !key.bit();
    }

    pub fn release_all(&mut self) {
        self.held = 0;
        self.drag_from = None;
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held & key.bit() != 0
    }

    pub fn begin_drag(&mut self, pos_px: [f64; 2]) {
        self.drag_from = Some(pos_px);
    }

    pub fn drag(&mut self, pos_px: [f64; 2]) {
        let Some(from) = self.drag_from else {
            return;
        };
        let s = self.config.look_sensitivity;
        self.yaw -= (pos_px[0] - from[0]) * s;
        self.pitch = (self.pitch - (pos_px[1] - from[1]) * s).clamp(-MAX_PITCH, MAX_PITCH);
        self.drag_from = Some(pos_px);
    }

    pub fn end_drag(&mut self) {
        self.drag_from = None;
    }

    pub fn direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp)
    }

    pub fn speed(&self, turbo: bool) -> f64 {
        if turbo {
            self.config.turbo_speed
        } else {
            self.config.speed
        }
    }

    /// Integrates held keys over `dt` and returns the resulting pose.
    pub fn step(&mut self, dt: f64, turbo: bool) -> CameraPose {
        let forward = self.direction();
        let right = forward.cross(Vec3::UP).normalize();
        let mut motion = Vec3::ZERO;
        let axes = [
            (MoveKey::Forward, forward),
            (MoveKey::Back, -forward),
            (MoveKey::Right, right),
            (MoveKey::Left, -right),
            (MoveKey::Up, Vec3::UP),
            (MoveKey::Down, -Vec3::UP),
        ];
        for (key, axis) in axes {
            if self.is_held(key) {
                motion += axis;
            }
        }
        let motion = motion.normalize();
        self.position += motion * (self.speed(turbo) * dt.max(0.0));
        self.pose()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.position + self.direction())
    }
}
