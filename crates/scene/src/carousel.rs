use std::f64::consts::TAU;

use foundation::math::{Vec3, damp, lerp};

use crate::config::CarouselConfig;
use crate::section::SectionKind;
use crate::transform::CardTransform;

/// One card slot on the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub kind: SectionKind,
    /// Placement relative to the carousel group.
    pub local: CardTransform,
    pub hovered: bool,
    /// Hover feedback, animated toward `hover_scale` / `hover_tilt`.
    pub hover_scale: f64,
    pub tilt_z: f64,
}

/// World-space state of a card for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCard {
    pub kind: SectionKind,
    pub transform: CardTransform,
    pub tilt_z: f64,
    pub hovered: bool,
    pub visible: bool,
}

/// Ring of section cards whose rotation follows the scroll offset.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    slots: Vec<CardSlot>,
    rotation_y: f64,
    group_y: f64,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        let n = SectionKind::count();
        let slots = SectionKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, kind)| {
                let angle = slot_angle(i, n);
                CardSlot {
                    kind,
                    local: CardTransform::new(Vec3::on_circle(config.radius, angle, 0.0), angle),
                    hovered: false,
                    hover_scale: 1.0,
                    tilt_z: 0.0,
                }
            })
            .collect();
        Self {
            group_y: config.hidden_y,
            config,
            slots,
            rotation_y: 0.0,
        }
    }

    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    pub fn group_y(&self) -> f64 {
        self.group_y
    }

    pub fn slots(&self) -> &[CardSlot] {
        &self.slots
    }

    pub fn target_rotation(&self, offset: f64) -> f64 {
        offset.clamp(0.0, 1.0) * TAU * f64::from(self.config.revolutions)
    }

    /// Pop-up reveal: rises from `hidden_y` to `display_y` over the first
    /// `reveal_offset` of scroll, then stays put.
    pub fn target_y(&self, offset: f64) -> f64 {
        let t = (offset.max(0.0) / self.config.reveal_offset).min(1.0);
        lerp(self.config.hidden_y, self.config.display_y, t)
    }

    /// Per-frame animation. Rotation holds still while `frozen`.
    pub fn update(&mut self, offset: f64, frozen: bool, dt: f64) {
        if !frozen {
            let target = self.target_rotation(offset);
            self.rotation_y = damp(self.rotation_y, target, self.config.rotation_rate, dt);
        }
        self.group_y = damp(self.group_y, self.target_y(offset), self.config.rise_rate, dt);

        for slot in &mut self.slots {
            let (scale, tilt) = if slot.hovered {
                (self.config.hover_scale, self.config.hover_tilt)
            } else {
                (1.0, 0.0)
            };
            slot.hover_scale = damp(slot.hover_scale, scale, self.config.hover_scale_rate, dt);
            slot.tilt_z = damp(slot.tilt_z, tilt, self.config.hover_tilt_rate, dt);
        }
    }

    pub fn set_hovered(&mut self, kind: SectionKind, hovered: bool) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.kind == kind) {
            slot.hovered = hovered;
        }
    }

    pub fn clear_hover(&mut self) {
        for slot in &mut self.slots {
            slot.hovered = false;
        }
    }

    /// Current world transform of `kind`'s card, as captured on click.
    pub fn world_transform(&self, kind: SectionKind) -> CardTransform {
        let slot = &self.slots[kind.index()];
        let position = slot.local.position.rotate_y(self.rotation_y) + Vec3::new(0.0, self.group_y, 0.0);
        CardTransform {
            position,
            rotation_y: slot.local.rotation_y + self.rotation_y,
            scale: slot.hover_scale,
        }
    }

    /// All cards in world space; `focused` is hidden while it is away from the ring.
    pub fn placed_cards(&self, focused: Option<SectionKind>) -> Vec<PlacedCard> {
        self.slots
            .iter()
            .map(|slot| PlacedCard {
                kind: slot.kind,
                transform: self.world_transform(slot.kind),
                tilt_z: slot.tilt_z,
                hovered: slot.hovered,
                visible: focused != Some(slot.kind),
            })
            .collect()
    }
}

pub fn slot_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    index as f64 / count as f64 * TAU
}

#[cfg(test)]
mod tests {
    use super::{Carousel, slot_angle};
    use crate::config::CarouselConfig;
    use crate::section::SectionKind;
    use std::f64::consts::TAU;

    const DT: f64 = 1.0 / 60.0;

    fn settle(c: &mut Carousel, offset: f64, frozen: bool) {
        for _ in 0..600 {
            c.update(offset, frozen, DT);
        }
    }

    #[test]
    fn slots_are_evenly_spaced_on_radius() {
        let c = Carousel::new(CarouselConfig::default());
        for (i, slot) in c.slots().iter().enumerate() {
            assert!((slot.local.rotation_y - slot_angle(i, 5)).abs() < 1e-12);
            assert!((slot.local.position.horizontal_length() - 9.0).abs() < 1e-9);
        }
        assert!((slot_angle(1, 5) - TAU / 5.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_tracks_scroll_revolutions() {
        let mut c = Carousel::new(CarouselConfig::default());
        assert!((c.target_rotation(0.5) - TAU).abs() < 1e-12);
        settle(&mut c, 0.5, false);
        assert!((c.rotation_y() - TAU).abs() < 1e-6);
    }

    #[test]
    fn rotation_freezes_while_focused() {
        let mut c = Carousel::new(CarouselConfig::default());
        settle(&mut c, 0.1, false);
        let before = c.rotation_y();
        settle(&mut c, 0.9, true);
        assert_eq!(c.rotation_y(), before);
    }

    #[test]
    fn group_pops_up_then_clamps() {
        let c = Carousel::new(CarouselConfig::default());
        assert_eq!(c.group_y(), -15.0);
        assert_eq!(c.target_y(0.0), -15.0);
        assert_eq!(c.target_y(0.125), -7.5);
        assert_eq!(c.target_y(0.25), 0.0);
        assert_eq!(c.target_y(0.9), 0.0);
    }

    #[test]
    fn world_transform_follows_group() {
        let mut c = Carousel::new(CarouselConfig::default());
        settle(&mut c, 0.25, false);
        let t = c.world_transform(SectionKind::Projects);
        // Projects sits at angle 0; the group has turned by π.
        assert!((t.position.z + 9.0).abs() < 1e-4);
        assert!(t.position.y.abs() < 1e-4);
        assert!((t.rotation_y - std::f64::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn focused_card_is_hidden() {
        let c = Carousel::new(CarouselConfig::default());
        let cards = c.placed_cards(Some(SectionKind::Skills));
        let hidden: Vec<_> = cards.iter().filter(|p| !p.visible).map(|p| p.kind).collect();
        assert_eq!(hidden, vec![SectionKind::Skills]);
    }

    #[test]
    fn hover_grows_card() {
        let mut c = Carousel::new(CarouselConfig::default());
        c.set_hovered(SectionKind::Contact, true);
        settle(&mut c, 0.0, false);
        let slot = &c.slots()[SectionKind::Contact.index()];
        assert!((slot.hover_scale - 1.05).abs() < 1e-6);
        assert!((slot.tilt_z - 0.05).abs() < 1e-6);
        c.clear_hover();
        settle(&mut c, 0.0, false);
        assert!((c.slots()[SectionKind::Contact.index()].hover_scale - 1.0).abs() < 1e-6);
    }
}
