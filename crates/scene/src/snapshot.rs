//! Serializable per-frame view of the scene handed to renderers.

use serde::Serialize;

use crate::camera::CameraMode;
use crate::focus::FocusPhase;
use crate::section::SectionKind;
use crate::terminal::TerminalPhase;
use crate::transform::{CameraPose, CardTransform};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame_index: u64,
    pub time_s: f64,
    pub scroll_offset: f64,
    pub camera_mode: CameraMode,
    pub camera: PoseSnapshot,
    pub view_proj: [[f32; 4]; 4],
    pub free_roam: bool,
    pub turbo: bool,
    pub focus: FocusSnapshot,
    pub carousel: CarouselSnapshot,
    pub expanded: Option<ExpandedSnapshot>,
    pub terminal: TerminalSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseSnapshot {
    pub position: [f64; 3],
    pub look_at: [f64; 3],
}

impl From<CameraPose> for PoseSnapshot {
    fn from(pose: CameraPose) -> Self {
        Self {
            position: pose.position.to_array(),
            look_at: pose.look_at.to_array(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformSnapshot {
    pub position: [f64; 3],
    pub rotation_y: f64,
    pub scale: f64,
}

impl From<CardTransform> for TransformSnapshot {
    fn from(t: CardTransform) -> Self {
        Self {
            position: t.position.to_array(),
            rotation_y: t.rotation_y,
            scale: t.scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusSnapshot {
    pub phase: FocusPhase,
    pub section: Option<SectionKind>,
    /// The focused card's interpolated transform.
    pub card: Option<TransformSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub rotation_y: f64,
    pub group_y: f64,
    pub cards: Vec<CardSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSnapshot {
    pub section: SectionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub glow_color: &'static str,
    pub icon: &'static str,
    pub transform: TransformSnapshot,
    pub tilt_z: f64,
    pub hovered: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedSnapshot {
    pub section: SectionKind,
    pub title: &'static str,
    pub glow_color: &'static str,
    pub text: String,
    pub scroll: f64,
    pub max_scroll: f64,
    pub scrollbar_thumb_y: f64,
    pub revealing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalSnapshot {
    pub phase: TerminalPhase,
    pub lines: Vec<String>,
}
