//! Top-level scene state and the per-frame step.
//!
//! `Portfolio` owns every controller. Hosts feed it input events between
//! frames and call [`Portfolio::tick`] once per display refresh.

use runtime::{Channel, Event, EventBus, Frame, InputSurface, ListenerId, ListenerSet};
use tracing::debug;

use crate::camera::{
    CameraMode, FocusedController, FreeRoamController, MoveKey, OrbitController, view_proj_matrix,
};
use crate::carousel::Carousel;
use crate::config::SceneConfig;
use crate::expanded::ExpandedView;
use crate::focus::{
    CloseOutcome, ExitTarget, FocusMachine, FocusPhase, FocusTransition, SelectOutcome,
};
use crate::section::SectionKind;
use crate::snapshot::{
    CardSnapshot, CarouselSnapshot, ExpandedSnapshot, FocusSnapshot, FrameSnapshot,
    TerminalSnapshot,
};
use crate::terminal::{FloatingTerminal, KeyOutcome, TerminalPhase};
use crate::transform::CameraPose;

/// Owners of global input listeners.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListenerOwner {
    /// Turbo and free-roam movement keys; registered for the scene's lifetime.
    Scene,
    ExpandedView,
    Terminal,
}

/// Where a wheel event ended up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WheelRoute {
    /// Captured by the expanded card; the host must not scroll the page.
    ExpandedView,
    /// Not handled here; the host scrolls the page.
    Page,
}

#[derive(Debug)]
pub struct Portfolio {
    config: SceneConfig,
    frame: Frame,
    bus: EventBus,
    scroll_offset: f64,
    viewport: [f64; 2],
    camera: CameraPose,
    last_mode: CameraMode,
    orbit: OrbitController,
    focused: FocusedController,
    free_roam: FreeRoamController,
    free_roam_enabled: bool,
    turbo: bool,
    focus: FocusMachine,
    last_transition: Option<FocusTransition>,
    carousel: Carousel,
    expanded: Option<ExpandedView>,
    terminal: FloatingTerminal,
    listeners: ListenerSet<ListenerOwner>,
    terminal_keys: Option<ListenerId>,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

impl Portfolio {
    pub fn new(config: SceneConfig) -> Self {
        let orbit = OrbitController::new(config.orbit.clone());
        let camera = orbit.target_pose(0.0);
        let mut listeners = ListenerSet::new();
        listeners.register(InputSurface::Keyboard, ListenerOwner::Scene, false);

        Self {
            frame: Frame::first(),
            bus: EventBus::new(),
            scroll_offset: 0.0,
            viewport: [1280.0, 720.0],
            camera,
            last_mode: CameraMode::Orbit,
            orbit,
            focused: FocusedController::new(config.focus.clone()),
            free_roam: FreeRoamController::new(config.free_roam.clone()),
            free_roam_enabled: false,
            turbo: false,
            focus: FocusMachine::new(
                config.focus.convergence_threshold,
                config.focus.max_transition_s,
            ),
            last_transition: None,
            carousel: Carousel::new(config.carousel.clone()),
            expanded: None,
            terminal: FloatingTerminal::new(config.terminal.clone()),
            listeners,
            terminal_keys: None,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    /// Controller that will own the camera on the next frame.
    pub fn camera_mode(&self) -> CameraMode {
        CameraMode::select(self.focus.is_focused(), self.free_roam_enabled)
    }

    /// Controller that owned the camera on the last frame.
    pub fn last_camera_mode(&self) -> CameraMode {
        self.last_mode
    }

    pub fn focus(&self) -> &FocusMachine {
        &self.focus
    }

    /// Most recent focus phase change made by [`Portfolio::tick`].
    pub fn last_transition(&self) -> Option<FocusTransition> {
        self.last_transition
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn expanded(&self) -> Option<&ExpandedView> {
        self.expanded.as_ref()
    }

    pub fn terminal(&self) -> &FloatingTerminal {
        &self.terminal
    }

    pub fn listeners(&self) -> &ListenerSet<ListenerOwner> {
        &self.listeners
    }

    pub fn is_free_roam(&self) -> bool {
        self.free_roam_enabled
    }

    pub fn is_turbo(&self) -> bool {
        self.turbo
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        if offset.is_finite() {
            self.scroll_offset = offset.clamp(0.0, 1.0);
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = [width.max(1.0), height.max(1.0)];
    }

    pub fn click_section(&mut self, kind: SectionKind) -> SelectOutcome {
        if self.free_roam_enabled {
            return SelectOutcome::Ignored;
        }
        let origin = self.carousel.world_transform(kind);
        let outcome = self.focus.select(kind, origin, self.frame, &mut self.bus);
        if outcome == SelectOutcome::Started {
            self.carousel.set_hovered(kind, false);
            self.mount_expanded(kind);
        }
        outcome
    }

    pub fn hover_section(&mut self, kind: SectionKind, hovered: bool) {
        self.carousel.set_hovered(kind, hovered);
    }

    pub fn close(&mut self) -> CloseOutcome {
        let outcome = self.focus.close(self.frame, &mut self.bus);
        if outcome != CloseOutcome::Ignored {
            self.unmount_expanded();
        }
        outcome
    }

    pub fn wheel(&mut self, delta: f64) -> WheelRoute {
        let first = self.listeners.dispatch_order(InputSurface::Wheel).into_iter().next();
        match (first, self.expanded.as_mut()) {
            (Some((ListenerOwner::ExpandedView, _)), Some(view)) => {
                // Content scrolling unlocks once the card has settled.
                if self.focus.phase() == FocusPhase::Active {
                    view.scroll_by(delta);
                }
                WheelRoute::ExpandedView
            }
            _ => WheelRoute::Page,
        }
    }

    pub fn key_down(&mut self, key: &str) {
        for (owner, capture) in self.listeners.dispatch_order(InputSurface::Keyboard) {
            let handled = match owner {
                ListenerOwner::ExpandedView => {
                    key == "Escape" && self.close() != CloseOutcome::Ignored
                }
                ListenerOwner::Terminal => {
                    let outcome = self.terminal.key(key);
                    if let KeyOutcome::Ran { command, .. } = &outcome {
                        self.bus
                            .emit(self.frame, Channel::Terminal, format!("ran `{command}`"));
                    }
                    outcome != KeyOutcome::Ignored
                }
                ListenerOwner::Scene => self.scene_key(key, true),
            };
            if handled && capture {
                break;
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.scene_key(key, false);
    }

    fn scene_key(&mut self, key: &str, down: bool) -> bool {
        if key == "Shift" {
            self.turbo = down;
            return true;
        }
        if !self.free_roam_enabled {
            return false;
        }
        match MoveKey::from_key(key) {
            Some(k) if down => {
                self.free_roam.press(k);
                true
            }
            Some(k) => {
                self.free_roam.release(k);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, pos_px: [f64; 2]) {
        if self.free_roam_enabled {
            self.free_roam.begin_drag(pos_px);
        }
    }

    pub fn pointer_move(&mut self, pos_px: [f64; 2]) {
        if self.free_roam_enabled {
            self.free_roam.drag(pos_px);
        }
    }

    pub fn pointer_up(&mut self) {
        self.free_roam.end_drag();
    }

    pub fn set_free_roam(&mut self, enabled: bool) {
        if enabled == self.free_roam_enabled {
            return;
        }
        if enabled {
            if self.focus.dismiss(self.frame, &mut self.bus).is_some() {
                self.unmount_expanded();
            }
            self.carousel.clear_hover();
            self.free_roam.take_over(&self.camera);
        } else {
            self.free_roam.release_all();
        }
        self.free_roam_enabled = enabled;
        self.bus.emit(
            self.frame,
            Channel::Input,
            if enabled { "free roam on" } else { "free roam off" },
        );
    }

    pub fn toggle_free_roam(&mut self) {
        self.set_free_roam(!self.free_roam_enabled);
    }

    /// Replays the expanded card's text reveal from the first character.
    pub fn replay_reveal(&mut self) {
        if let Some(view) = self.expanded.as_mut() {
            view.replay();
        }
    }

    /// Skips the terminal intro and enables command input.
    pub fn skip_terminal_intro(&mut self) {
        self.terminal.skip_intro();
        self.sync_terminal_listener();
    }

    /// Runs one frame of `dt_s` seconds.
    pub fn tick(&mut self, dt_s: f64) -> Frame {
        self.frame = self.frame.advance(dt_s);
        let dt = self.frame.dt_s;

        // The carousel moves first so exit targets match this frame's ring.
        self.carousel
            .update(self.scroll_offset, self.focus.is_focused(), dt);

        let mode = self.camera_mode();
        match mode {
            CameraMode::FreeRoam => {
                self.camera = self.free_roam.step(dt, self.turbo);
            }
            CameraMode::Focused => {
                if let Some(kind) = self.focus.section() {
                    let exit = ExitTarget {
                        card: self.carousel.world_transform(kind),
                        camera: self.orbit.target_pose(self.scroll_offset),
                    };
                    if let Some(transition) = self.focus.update(
                        &mut self.camera,
                        &self.focused,
                        exit,
                        dt,
                        self.frame,
                        &mut self.bus,
                    ) {
                        self.last_transition = Some(transition);
                    }
                }
            }
            CameraMode::Orbit => {
                self.camera = self.orbit.step(self.camera, self.scroll_offset, dt);
            }
        }
        if mode != self.last_mode {
            debug!(from = ?self.last_mode, to = ?mode, "camera controller switched");
            self.bus.emit(
                self.frame,
                Channel::Camera,
                format!("{:?} -> {:?}", self.last_mode, mode),
            );
            self.last_mode = mode;
        }

        if let Some(view) = self.expanded.as_mut() {
            view.advance(dt);
        }
        if let Some(phase) = self.terminal.advance(dt) {
            self.bus
                .emit(self.frame, Channel::Terminal, format!("phase {phase:?}"));
            self.sync_terminal_listener();
        }
        self.frame
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let aspect = self.viewport[0] / self.viewport[1];
        let focused = self.focus.section();
        let cards = self
            .carousel
            .placed_cards(focused)
            .into_iter()
            .map(|card| {
                let section = card.kind.section();
                CardSnapshot {
                    section: card.kind,
                    title: section.title,
                    description: section.description,
                    color: section.color,
                    glow_color: section.glow_color,
                    icon: section.icon.glyph(),
                    transform: card.transform.into(),
                    tilt_z: card.tilt_z,
                    hovered: card.hovered,
                    visible: card.visible,
                }
            })
            .collect();

        FrameSnapshot {
            frame_index: self.frame.index,
            time_s: self.frame.time.seconds(),
            scroll_offset: self.scroll_offset,
            camera_mode: self.last_mode,
            camera: self.camera.into(),
            view_proj: view_proj_matrix(&self.camera, aspect, &self.config.projection),
            free_roam: self.free_roam_enabled,
            turbo: self.turbo,
            focus: FocusSnapshot {
                phase: self.focus.phase(),
                section: focused,
                card: self.focus.state().map(|s| s.card().into()),
            },
            carousel: CarouselSnapshot {
                rotation_y: self.carousel.rotation_y(),
                group_y: self.carousel.group_y(),
                cards,
            },
            expanded: self.expanded.as_ref().map(|view| {
                let section = view.section().section();
                ExpandedSnapshot {
                    section: view.section(),
                    title: section.title,
                    glow_color: section.glow_color,
                    text: view.display_text(),
                    scroll: view.scroll(),
                    max_scroll: view.max_scroll(),
                    scrollbar_thumb_y: view.scrollbar_thumb_y(),
                    revealing: view.is_revealing(),
                }
            }),
            terminal: TerminalSnapshot {
                phase: self.terminal.phase(),
                lines: self.terminal.screen(),
            },
        }
    }

    fn mount_expanded(&mut self, kind: SectionKind) {
        self.unmount_expanded();
        self.expanded = Some(ExpandedView::mount(kind, &self.config.expanded));
        self.listeners
            .register(InputSurface::Wheel, ListenerOwner::ExpandedView, true);
        self.listeners
            .register(InputSurface::Keyboard, ListenerOwner::ExpandedView, true);
    }

    fn unmount_expanded(&mut self) {
        if let Some(mut view) = self.expanded.take() {
            view.unmount();
        }
        self.listeners.deregister_owner(ListenerOwner::ExpandedView);
    }

    fn sync_terminal_listener(&mut self) {
        let wants = self.terminal.phase() == TerminalPhase::Interactive;
        match (wants, self.terminal_keys) {
            (true, None) => {
                self.terminal_keys = Some(self.listeners.register(
                    InputSurface::Keyboard,
                    ListenerOwner::Terminal,
                    false,
                ));
            }
            (false, Some(id)) => {
                self.listeners.deregister(id);
                self.terminal_keys = None;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListenerOwner, Portfolio, WheelRoute};
    use crate::camera::{CameraMode, OrbitController};
    use crate::config::SceneConfig;
    use crate::focus::{CloseOutcome, FocusPhase, SelectOutcome};
    use crate::section::SectionKind;
    use crate::terminal::TerminalPhase;
    use runtime::InputSurface;

    const DT: f64 = 1.0 / 60.0;

    fn run(p: &mut Portfolio, frames: usize) {
        for _ in 0..frames {
            p.tick(DT);
            assert_exclusive(p);
        }
    }

    fn run_until(p: &mut Portfolio, phase: FocusPhase, max_frames: usize) {
        for _ in 0..max_frames {
            if p.focus().phase() == phase {
                return;
            }
            p.tick(DT);
            assert_exclusive(p);
        }
        panic!("did not reach {phase:?}");
    }

    fn assert_exclusive(p: &Portfolio) {
        assert!(
            !(p.focus().is_focused() && p.last_camera_mode() == CameraMode::Orbit),
            "orbit controller ran while a section was focused"
        );
    }

    #[test]
    fn projects_scenario_at_quarter_scroll() {
        let mut p = Portfolio::default();
        p.set_scroll_offset(0.25);
        run(&mut p, 300);

        assert_eq!(p.click_section(SectionKind::Projects), SelectOutcome::Started);
        assert_eq!(p.focus().phase(), FocusPhase::Entering);
        assert_eq!(p.focus().section(), Some(SectionKind::Projects));
        let view = p.expanded().expect("expanded view mounted");
        assert_eq!(view.scroll(), 0.0);

        run_until(&mut p, FocusPhase::Active, 600);
        let card = p.focus().state().expect("focused").card();
        assert!(card.position.distance(foundation::math::Vec3::new(0.0, 1.5, 9.0)) < 0.1);

        assert_eq!(p.wheel(1e9), WheelRoute::ExpandedView);
        let view = p.expanded().expect("expanded view mounted");
        assert!(view.max_scroll() > 0.0);
        assert_eq!(view.scroll(), view.max_scroll());
    }

    #[test]
    fn rapid_clicks_keep_a_single_focused_section() {
        let mut p = Portfolio::default();
        run(&mut p, 10);
        assert_eq!(p.click_section(SectionKind::Skills), SelectOutcome::Started);
        run(&mut p, 1);
        assert_eq!(p.click_section(SectionKind::Contact), SelectOutcome::Ignored);
        assert_eq!(p.click_section(SectionKind::Skills), SelectOutcome::Ignored);
        assert_eq!(p.focus().section(), Some(SectionKind::Skills));
        assert_eq!(p.expanded().map(|v| v.section()), Some(SectionKind::Skills));
        assert_eq!(
            p.listeners().count(InputSurface::Wheel),
            1,
            "one capture listener per mounted view"
        );
    }

    #[test]
    fn close_in_idle_is_noop() {
        let mut p = Portfolio::default();
        run(&mut p, 5);
        let before = p.events().len();
        assert_eq!(p.close(), CloseOutcome::Ignored);
        assert_eq!(p.events().len(), before);
        assert_eq!(p.focus().phase(), FocusPhase::Idle);
    }

    #[test]
    fn round_trip_returns_to_orbit_for_close_time_offset() {
        let mut p = Portfolio::default();
        p.set_scroll_offset(0.1);
        run(&mut p, 300);
        p.click_section(SectionKind::Experience);
        run_until(&mut p, FocusPhase::Active, 600);

        // Scrolling continues while the card is open.
        p.set_scroll_offset(0.6);
        p.close();
        run_until(&mut p, FocusPhase::Idle, 600);
        run(&mut p, 600);

        let orbit = OrbitController::new(SceneConfig::default().orbit);
        let expected = orbit.target_pose(0.6);
        assert!(p.camera().distance_to(&expected) < 0.1);
        assert_eq!(p.last_camera_mode(), CameraMode::Orbit);
    }

    #[test]
    fn closed_card_lands_on_its_current_slot() {
        let mut p = Portfolio::default();
        // Click while the carousel is still rising, then keep scrolling.
        p.set_scroll_offset(0.05);
        run(&mut p, 300);
        p.click_section(SectionKind::Projects);
        run_until(&mut p, FocusPhase::Active, 600);
        p.set_scroll_offset(0.6);
        run(&mut p, 120);
        p.close();

        let mut last_exiting = None;
        for _ in 0..600 {
            match p.focus().state() {
                Some(state) => last_exiting = Some(state.card()),
                None => break,
            }
            p.tick(DT);
            assert_exclusive(&p);
        }
        assert_eq!(p.focus().phase(), FocusPhase::Idle);

        let slot = p.carousel().world_transform(SectionKind::Projects);
        let landed = p.last_transition().expect("exit transition");
        assert_eq!(landed.to, FocusPhase::Idle);
        assert!(!landed.forced);
        assert!(landed.card.distance_to(&slot) < 1e-9);
        let before_snap = last_exiting.expect("exiting frames");
        assert!(before_snap.distance_to(&slot) < 0.15);

        // The camera went straight to the orbit pose for the close-time offset.
        let orbit = OrbitController::new(SceneConfig::default().orbit);
        assert!(p.camera().distance_to(&orbit.target_pose(0.6)) < 1e-9);
    }

    #[test]
    fn carousel_freezes_while_focused() {
        let mut p = Portfolio::default();
        p.set_scroll_offset(0.2);
        run(&mut p, 300);
        p.click_section(SectionKind::Education);
        let rotation = p.carousel().rotation_y();
        p.set_scroll_offset(0.8);
        run(&mut p, 120);
        assert_eq!(p.carousel().rotation_y(), rotation);
        let hidden: Vec<_> = p
            .snapshot()
            .carousel
            .cards
            .iter()
            .filter(|c| !c.visible)
            .map(|c| c.section)
            .collect();
        assert_eq!(hidden, vec![SectionKind::Education]);
    }

    #[test]
    fn wheel_reaches_page_without_expanded_view() {
        let mut p = Portfolio::default();
        assert_eq!(p.wheel(120.0), WheelRoute::Page);
        p.click_section(SectionKind::Projects);
        // Captured while entering, but content does not move until settled.
        assert_eq!(p.wheel(120.0), WheelRoute::ExpandedView);
        assert_eq!(p.expanded().map(|v| v.scroll()), Some(0.0));
        p.close();
        assert_eq!(p.wheel(120.0), WheelRoute::Page);
        assert_eq!(p.listeners().count(InputSurface::Wheel), 0);
    }

    #[test]
    fn escape_closes_and_is_not_typed_into_terminal() {
        let mut p = Portfolio::default();
        p.skip_terminal_intro();
        p.click_section(SectionKind::Contact);
        run_until(&mut p, FocusPhase::Active, 600);
        p.key_down("Escape");
        assert_eq!(p.focus().phase(), FocusPhase::Exiting);
        assert!(p.expanded().is_none());
        p.key_down("x");
        assert_eq!(p.terminal().input(), "x");
    }

    #[test]
    fn terminal_listener_registers_when_interactive() {
        let mut p = Portfolio::default();
        let owners = |p: &Portfolio| -> Vec<ListenerOwner> {
            p.listeners()
                .dispatch_order(InputSurface::Keyboard)
                .into_iter()
                .map(|(o, _)| o)
                .collect()
        };
        assert_eq!(owners(&p), vec![ListenerOwner::Scene]);
        p.skip_terminal_intro();
        assert_eq!(p.terminal().phase(), TerminalPhase::Interactive);
        assert_eq!(owners(&p), vec![ListenerOwner::Terminal, ListenerOwner::Scene]);
    }

    #[test]
    fn free_roam_dismisses_focus_and_excludes_other_controllers() {
        let mut p = Portfolio::default();
        run(&mut p, 5);
        p.click_section(SectionKind::Projects);
        run(&mut p, 5);
        p.hover_section(SectionKind::Contact, true);
        p.set_free_roam(true);
        assert!(p.carousel().slots().iter().all(|s| !s.hovered));
        assert!(!p.focus().is_focused());
        assert!(p.expanded().is_none());
        assert_eq!(p.click_section(SectionKind::Skills), SelectOutcome::Ignored);

        p.key_down("Shift");
        p.key_down("w");
        let start = p.camera().position;
        p.tick(0.1);
        assert_eq!(p.last_camera_mode(), CameraMode::FreeRoam);
        assert!((p.camera().position.distance(start) - 3.0).abs() < 1e-6);

        p.key_up("Shift");
        p.toggle_free_roam();
        run(&mut p, 1);
        assert_eq!(p.last_camera_mode(), CameraMode::Orbit);
        assert!(!p.is_turbo());
    }

    #[test]
    fn mutual_exclusion_holds_for_mixed_input() {
        let mut p = Portfolio::default();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..3000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            match seed % 23 {
                0 => {
                    let kind = SectionKind::from_index((seed >> 8) as usize % 5).expect("index");
                    p.click_section(kind);
                }
                1 => {
                    p.close();
                }
                2 => p.set_scroll_offset((seed >> 16) as f64 / (1u64 << 48) as f64),
                3 => {
                    p.wheel(((seed >> 20) % 400) as f64 - 200.0);
                }
                4 if seed % 7 == 0 => p.toggle_free_roam(),
                _ => {}
            }
            p.tick(DT);
            assert_exclusive(&p);
            assert!(p.focus().section().is_some() == p.focus().is_focused());
        }
    }

    #[test]
    fn snapshot_serializes() {
        let mut p = Portfolio::default();
        p.click_section(SectionKind::Projects);
        run(&mut p, 3);
        let json = serde_json::to_value(p.snapshot()).expect("serialize snapshot");
        assert_eq!(json["focus"]["section"], "projects");
        assert_eq!(json["focus"]["phase"], "entering");
        assert_eq!(json["camera_mode"], "focused");
        assert_eq!(json["carousel"]["cards"].as_array().map(Vec::len), Some(5));
        assert!(json["expanded"]["text"].as_str().is_some());
    }
}
