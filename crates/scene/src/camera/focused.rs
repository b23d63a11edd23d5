use foundation::math::Vec3;

use crate::config::FocusConfig;
use crate::focus::FocusPhase;
use crate::transform::{CameraPose, CardTransform};

/// Frames the expanded card while a section is focused.
#[derive(Debug, Clone)]
pub struct FocusedController {
    config: FocusConfig,
}

impl FocusedController {
    pub fn new(config: FocusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    /// Where the focused card settles: the display anchor, facing +Z.
    pub fn display_transform(&self) -> CardTransform {
        CardTransform::new(Vec3::from(self.config.anchor), 0.0)
    }

    /// Camera pose a standoff in front of the displayed card, looking at it.
    pub fn framing_pose(&self) -> CameraPose {
        let card = self.display_transform();
        let eye = card.position + card.forward() * self.config.standoff;
        CameraPose::new(eye, card.position)
    }

    /// Blend rate for `phase`; transitions move faster than the settled hold.
    pub fn rate(&self, phase: FocusPhase) -> f64 {
        match phase {
            FocusPhase::Entering | FocusPhase::Exiting => self.config.transition_rate,
            FocusPhase::Active | FocusPhase::Idle => self.config.settled_rate,
        }
    }

    pub fn step(&self, camera: CameraPose, target: CameraPose, phase: FocusPhase, dt: f64) -> CameraPose {
        camera.damp_toward(target, self.rate(phase), dt)
    }
}
