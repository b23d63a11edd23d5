//! Card focus state machine.
//!
//! ```text
//! Idle --select--> Entering --converged--> Active --close--> Exiting --converged--> Idle
//!                     |                                          ^
//!                     +------------------close-------------------+
//! ```
//!
//! Policy for input that arrives mid-transition:
//! - `select` is ignored unless the machine is `Idle`, so there is never more
//!   than one focused section.
//! - `close` during `Entering` turns around from the current interpolated
//!   transform; `close` during `Exiting` or `Idle` does nothing.
//!
//! The exit targets are supplied every frame by the caller, so a card that
//! is closed after the carousel moved lands where its slot is now.

use runtime::{Channel, EventBus, Frame};
use serde::Serialize;
use tracing::{debug, warn};

use crate::camera::FocusedController;
use crate::section::SectionKind;
use crate::transform::{CameraPose, CardTransform};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPhase {
    Idle,
    Entering,
    Active,
    Exiting,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    Started,
    /// Another section is focused or in flight.
    Ignored,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    Exiting,
    /// Close arrived while entering; the card turned around in flight.
    Redirected,
    Ignored,
}

/// Where the card and camera return to while exiting.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExitTarget {
    /// The card's current slot on the carousel.
    pub card: CardTransform,
    /// The orbit pose for the current scroll offset.
    pub camera: CameraPose,
}

/// Phase change produced by [`FocusMachine::update`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FocusTransition {
    pub section: SectionKind,
    pub from: FocusPhase,
    pub to: FocusPhase,
    /// The transition hit the duration limit and was snapped.
    pub forced: bool,
    /// Card transform the transition landed on.
    pub card: CardTransform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusState {
    section: SectionKind,
    phase: FocusPhase,
    /// Interpolated card transform.
    card: CardTransform,
    /// Seconds spent in the current phase.
    elapsed_s: f64,
}

impl FocusState {
    pub fn section(&self) -> SectionKind {
        self.section
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn card(&self) -> CardTransform {
        self.card
    }
}

#[derive(Debug, Clone)]
pub struct FocusMachine {
    state: Option<FocusState>,
    threshold: f64,
    max_transition_s: f64,
}

impl FocusMachine {
    pub fn new(threshold: f64, max_transition_s: f64) -> Self {
        Self {
            state: None,
            threshold,
            max_transition_s,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.state.as_ref().map_or(FocusPhase::Idle, |s| s.phase)
    }

    pub fn section(&self) -> Option<SectionKind> {
        self.state.as_ref().map(|s| s.section)
    }

    pub fn state(&self) -> Option<&FocusState> {
        self.state.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.state.is_some()
    }

    pub fn select(
        &mut self,
        section: SectionKind,
        origin: CardTransform,
        frame: Frame,
        bus: &mut EventBus,
    ) -> SelectOutcome {
        if let Some(current) = &self.state {
            debug!(
                requested = ?section,
                focused = ?current.section,
                phase = ?current.phase,
                "select ignored while a section is focused"
            );
            return SelectOutcome::Ignored;
        }

        self.state = Some(FocusState {
            section,
            phase: FocusPhase::Entering,
            card: origin,
            elapsed_s: 0.0,
        });
        debug!(?section, "focus entering");
        bus.emit(frame, Channel::Focus, format!("{} idle -> entering", section.section().title));
        SelectOutcome::Started
    }

    pub fn close(&mut self, frame: Frame, bus: &mut EventBus) -> CloseOutcome {
        let Some(state) = self.state.as_mut() else {
            return CloseOutcome::Ignored;
        };
        let outcome = match state.phase {
            FocusPhase::Active => CloseOutcome::Exiting,
            FocusPhase::Entering => CloseOutcome::Redirected,
            FocusPhase::Exiting | FocusPhase::Idle => return CloseOutcome::Ignored,
        };
        let from = state.phase;
        state.phase = FocusPhase::Exiting;
        state.elapsed_s = 0.0;
        debug!(section = ?state.section, ?from, "focus exiting");
        bus.emit(
            frame,
            Channel::Focus,
            format!("{} {} -> exiting", state.section.section().title, phase_name(from)),
        );
        outcome
    }

    /// Drops the focus immediately, without an exit animation.
    pub fn dismiss(&mut self, frame: Frame, bus: &mut EventBus) -> Option<SectionKind> {
        let state = self.state.take()?;
        bus.emit(
            frame,
            Channel::Focus,
            format!("{} {} -> idle (dismissed)", state.section.section().title, phase_name(state.phase)),
        );
        Some(state.section)
    }

    /// Advances the card and camera one frame and applies convergence checks.
    pub fn update(
        &mut self,
        camera: &mut CameraPose,
        controller: &FocusedController,
        exit: ExitTarget,
        dt: f64,
        frame: Frame,
        bus: &mut EventBus,
    ) -> Option<FocusTransition> {
        let state = self.state.as_mut()?;
        state.elapsed_s += dt.max(0.0);

        let (card_target, camera_target) = match state.phase {
            FocusPhase::Entering | FocusPhase::Active => {
                (controller.display_transform(), controller.framing_pose())
            }
            FocusPhase::Exiting => (exit.card, exit.camera),
            FocusPhase::Idle => return None,
        };

        let rate = controller.rate(state.phase);
        state.card = state.card.damp_toward(card_target, rate, dt);
        *camera = controller.step(*camera, camera_target, state.phase, dt);

        if state.phase == FocusPhase::Active {
            return None;
        }

        let converged = state.card.distance_to(&card_target) < self.threshold
            && camera.distance_to(&camera_target) < self.threshold;
        let forced = !converged && state.elapsed_s >= self.max_transition_s;
        if !converged && !forced {
            return None;
        }

        if forced {
            warn!(
                section = ?state.section,
                phase = ?state.phase,
                elapsed_s = state.elapsed_s,
                "focus transition did not converge; snapping to target"
            );
        }
        state.card = card_target;
        *camera = camera_target;

        let section = state.section;
        let from = state.phase;
        let to = match from {
            FocusPhase::Entering => FocusPhase::Active,
            _ => FocusPhase::Idle,
        };
        let suffix = if forced { " (forced)" } else { "" };
        bus.emit(
            frame,
            Channel::Focus,
            format!("{} {} -> {}{suffix}", section.section().title, phase_name(from), phase_name(to)),
        );
        debug!(?section, ?from, ?to, forced, "focus transition");

        if to == FocusPhase::Idle {
            self.state = None;
        } else {
            state.phase = to;
            state.elapsed_s = 0.0;
        }

        Some(FocusTransition {
            section,
            from,
            to,
            forced,
            card: card_target,
        })
    }
}

fn phase_name(phase: FocusPhase) -> &'static str {
    match phase {
        FocusPhase::Idle => "idle",
        FocusPhase::Entering => "entering",
        FocusPhase::Active => "active",
        FocusPhase::Exiting => "exiting",
    }
}
