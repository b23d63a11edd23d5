//! Scripted headless sessions over [`Portfolio`].
//!
//! A script is a JSON array of steps, each tagged by `"op"`:
//!
//! ```json
//! [
//!   { "op": "scroll", "offset": 0.25 },
//!   { "op": "advance", "seconds": 2.0 },
//!   { "op": "click", "section": "projects" },
//!   { "op": "advance", "seconds": 3.0 },
//!   { "op": "wheel", "delta": 400 }
//! ]
//! ```

use std::fmt;
use std::path::Path;

use runtime::Event;
use scene::snapshot::FrameSnapshot;
use scene::{Portfolio, SceneConfig, SectionKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Scroll { offset: f64 },
    Click { section: String },
    Hover { section: String, #[serde(default = "yes")] hovered: bool },
    Close,
    Wheel { delta: f64 },
    Key { key: String },
    KeyUp { key: String },
    FreeRoam { enabled: bool },
    /// Restarts the expanded card's text reveal.
    Replay,
    /// Runs frames at the session frame rate until `seconds` have elapsed.
    Advance { seconds: f64 },
}

/// Longest single `advance` step accepted, in seconds.
pub const MAX_ADVANCE_S: f64 = 3600.0;

fn yes() -> bool {
    true
}

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnknownSection { step: usize, name: String },
    InvalidStep { step: usize, reason: String },
    InvalidFps(f64),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "io error: {e}"),
            ScriptError::Parse(e) => write!(f, "script parse error: {e}"),
            ScriptError::UnknownSection { step, name } => {
                write!(f, "step {step}: unknown section '{name}'")
            }
            ScriptError::InvalidStep { step, reason } => write!(f, "step {step}: {reason}"),
            ScriptError::InvalidFps(fps) => write!(f, "fps must be positive, got {fps}"),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        ScriptError::Io(e)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(e: serde_json::Error) -> Self {
        ScriptError::Parse(e)
    }
}

pub fn parse_script(payload: &str) -> Result<Vec<Step>, ScriptError> {
    Ok(serde_json::from_str(payload)?)
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Step>, ScriptError> {
    let payload = std::fs::read_to_string(path)?;
    parse_script(&payload)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLine {
    pub frame: u64,
    pub channel: &'static str,
    pub message: String,
}

impl From<Event> for EventLine {
    fn from(e: Event) -> Self {
        Self {
            frame: e.frame_index,
            channel: e.channel.as_str(),
            message: e.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub frames: u64,
    pub snapshot: FrameSnapshot,
    pub events: Vec<EventLine>,
}

/// Runs `steps` against a fresh scene and reports the final state.
pub fn run_script(config: SceneConfig, steps: &[Step], fps: f64) -> Result<SessionReport, ScriptError> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(ScriptError::InvalidFps(fps));
    }
    let dt = 1.0 / fps;
    let mut portfolio = Portfolio::new(config);
    let mut events = Vec::new();

    for (i, step) in steps.iter().enumerate() {
        debug!(step = i, ?step, "script step");
        match step {
            Step::Scroll { offset } => portfolio.set_scroll_offset(*offset),
            Step::Click { section } => {
                let outcome = portfolio.click_section(section_named(i, section)?);
                debug!(?outcome, "click");
            }
            Step::Hover { section, hovered } => {
                portfolio.hover_section(section_named(i, section)?, *hovered);
            }
            Step::Close => {
                portfolio.close();
            }
            Step::Wheel { delta } => {
                portfolio.wheel(*delta);
            }
            Step::Key { key } => portfolio.key_down(key),
            Step::KeyUp { key } => portfolio.key_up(key),
            Step::FreeRoam { enabled } => portfolio.set_free_roam(*enabled),
            Step::Replay => portfolio.replay_reveal(),
            Step::Advance { seconds } => {
                if !(seconds.is_finite() && *seconds >= 0.0) {
                    return Err(ScriptError::InvalidStep {
                        step: i,
                        reason: format!("advance needs a non-negative duration, got {seconds}"),
                    });
                }
                if *seconds > MAX_ADVANCE_S {
                    return Err(ScriptError::InvalidStep {
                        step: i,
                        reason: format!("advance is capped at {MAX_ADVANCE_S} s, got {seconds}"),
                    });
                }
                let frames = (seconds * fps).round() as u64;
                for _ in 0..frames {
                    portfolio.tick(dt);
                }
            }
        }
        events.extend(portfolio.drain_events().into_iter().map(EventLine::from));
    }

    let frames = portfolio.frame().index;
    info!(frames, steps = steps.len(), "script finished");
    Ok(SessionReport {
        frames,
        snapshot: portfolio.snapshot(),
        events,
    })
}

fn section_named(step: usize, name: &str) -> Result<SectionKind, ScriptError> {
    SectionKind::from_name(name).ok_or_else(|| ScriptError::UnknownSection {
        step,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{MAX_ADVANCE_S, ScriptError, Step, parse_script, run_script};
    use pretty_assertions::assert_eq;
    use scene::SceneConfig;
    use scene::focus::FocusPhase;

    #[test]
    fn parses_tagged_steps() {
        let steps = parse_script(
            r#"[
                {"op": "scroll", "offset": 0.5},
                {"op": "hover", "section": "skills"},
                {"op": "close"},
                {"op": "key_up", "key": "Shift"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(
            steps,
            vec![
                Step::Scroll { offset: 0.5 },
                Step::Hover {
                    section: "skills".to_string(),
                    hovered: true
                },
                Step::Close,
                Step::KeyUp {
                    key: "Shift".to_string()
                },
            ]
        );
    }

    #[test]
    fn focus_round_trip_is_logged_in_order() {
        let steps = parse_script(
            r#"[
                {"op": "scroll", "offset": 0.25},
                {"op": "advance", "seconds": 2.0},
                {"op": "click", "section": "PROJECTS"},
                {"op": "advance", "seconds": 3.0},
                {"op": "close"},
                {"op": "advance", "seconds": 3.0}
            ]"#,
        )
        .expect("parse");
        let report = run_script(SceneConfig::default(), &steps, 60.0).expect("run");
        assert_eq!(report.frames, 480);
        assert_eq!(report.snapshot.focus.phase, FocusPhase::Idle);

        let focus: Vec<&str> = report
            .events
            .iter()
            .filter(|e| e.channel == "focus")
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(
            focus,
            vec![
                "PROJECTS idle -> entering",
                "PROJECTS entering -> active",
                "PROJECTS active -> exiting",
                "PROJECTS exiting -> idle",
            ]
        );
    }

    #[test]
    fn unknown_section_names_the_step() {
        let steps = vec![Step::Click {
            section: "hobbies".to_string(),
        }];
        let err = run_script(SceneConfig::default(), &steps, 60.0).expect_err("unknown");
        assert!(matches!(err, ScriptError::UnknownSection { step: 0, .. }));
    }

    #[test]
    fn rejects_bad_fps_and_durations() {
        assert!(matches!(
            run_script(SceneConfig::default(), &[], 0.0),
            Err(ScriptError::InvalidFps(_))
        ));
        let steps = vec![Step::Advance { seconds: -1.0 }];
        assert!(matches!(
            run_script(SceneConfig::default(), &steps, 60.0),
            Err(ScriptError::InvalidStep { step: 0, .. })
        ));
    }

    #[test]
    fn huge_advance_is_rejected_before_running() {
        let steps = parse_script(
            r#"[
                {"op": "advance", "seconds": 1.0},
                {"op": "advance", "seconds": 1e15}
            ]"#,
        )
        .expect("parse");
        assert!(matches!(
            run_script(SceneConfig::default(), &steps, 60.0),
            Err(ScriptError::InvalidStep { step: 1, .. })
        ));
        let at_cap = vec![Step::Advance {
            seconds: MAX_ADVANCE_S,
        }];
        let report = run_script(SceneConfig::default(), &at_cap, 1.0).expect("at cap");
        assert_eq!(report.frames, 3600);
    }

    #[test]
    fn replay_restarts_the_reveal() {
        let steps = parse_script(
            r#"[
                {"op": "click", "section": "contact"},
                {"op": "advance", "seconds": 5.0},
                {"op": "replay"},
                {"op": "advance", "seconds": 0.01}
            ]"#,
        )
        .expect("parse");
        let report = run_script(SceneConfig::default(), &steps, 100.0).expect("run");
        let expanded = report.snapshot.expanded.expect("card open");
        assert!(expanded.revealing);
        assert!(expanded.text.ends_with('_'));
    }
}
