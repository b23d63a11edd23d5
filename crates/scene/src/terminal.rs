//! The floating terminal under the hero title.
//!
//! Runs a scripted intro (boot log, typed bio, animated cat) and then accepts
//! a handful of shell-like commands from the keyboard.

use foundation::millis;
use runtime::Ticker;
use serde::Serialize;

use crate::config::TerminalConfig;
use crate::reveal::Typewriter;

pub const PROMPT: &str = "root@kali:~$";

pub const BOOT_LINES: [&str; 9] = [
    "> initializing system...",
    "> loading kernel modules...",
    "> mounting filesystems...",
    "> starting network services...",
    "> establishing secure connection...",
    "> scanning for vulnerabilities...",
    "> access granted.",
    "> welcome, user.",
    "> _",
];

pub const BIO_TEXT: &str = "I'm Chris Kuriakose, a security analyst who treats bugs with equal parts \
curiosity and vengeance. I love building things that work beautifully and breaking things that \
shouldn't. Whether it's apps, audits, or automation -- I'm all about clean execution and smarter systems.";

pub const CAT_FRAMES: [&str; 4] = [
    "   /\\_/\\\n  ( o.o )\n   > ^ <",
    "   /\\_/\\\n  ( -.- )\n   > ^ <",
    "   /\\_/\\\n  ( >.< )\n   > w <",
    "   /\\_/\\\n  ( O.O )\n   > ~ <",
];

/// Fixed replies, matched against the trimmed, lower-cased input.
pub fn command_output(cmd: &str) -> Option<&'static str> {
    match cmd {
        "help" => Some("Available commands: help, whoami, clear, contact, sudo rm -rf /"),
        "whoami" => Some("guest@portfolio-terminal:~$ role: visitor"),
        "contact" => Some("email: contact@example.com | github: @chris-kuriakose"),
        "sudo rm -rf /" => Some("PERMISSION DENIED. Nice try, hacker."),
        "ls" => Some("projects/  skills/  secrets.txt"),
        "cat secrets.txt" => Some("The cake is a lie."),
        _ => None,
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPhase {
    Boot,
    Bio,
    Cat,
    Interactive,
}

#[derive(Debug, Clone)]
enum PhaseState {
    Boot {
        shown: usize,
        lines: Ticker,
        /// Starts once every boot line is printed.
        pause: Option<Ticker>,
    },
    Bio {
        /// The first bio tick shows nothing; typing starts after it.
        lead: Ticker,
        typewriter: Typewriter,
        hold: Option<Ticker>,
    },
    Cat {
        frame: usize,
        frames: Ticker,
        done: Ticker,
    },
    Interactive,
}

impl PhaseState {
    fn phase(&self) -> TerminalPhase {
        match self {
            PhaseState::Boot { .. } => TerminalPhase::Boot,
            PhaseState::Bio { .. } => TerminalPhase::Bio,
            PhaseState::Cat { .. } => TerminalPhase::Cat,
            PhaseState::Interactive => TerminalPhase::Interactive,
        }
    }

    /// Stops every timer owned by the phase.
    fn cancel_timers(&mut self) {
        match self {
            PhaseState::Boot { lines, pause, .. } => {
                lines.cancel();
                if let Some(p) = pause {
                    p.cancel();
                }
            }
            PhaseState::Bio {
                lead,
                typewriter,
                hold,
            } => {
                lead.cancel();
                typewriter.cancel();
                if let Some(h) = hold {
                    h.cancel();
                }
            }
            PhaseState::Cat { frames, done, .. } => {
                frames.cancel();
                done.cancel();
            }
            PhaseState::Interactive => {}
        }
    }
}

/// Result of a key press in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not accepting keys in the current phase.
    Ignored,
    Edited,
    Ran { command: String, known: bool },
}

#[derive(Debug, Clone)]
pub struct FloatingTerminal {
    config: TerminalConfig,
    state: PhaseState,
    input: String,
    history: Vec<String>,
}

impl FloatingTerminal {
    pub fn new(config: TerminalConfig) -> Self {
        let state = boot_state(&config);
        Self {
            config,
            state,
            input: String::new(),
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> TerminalPhase {
        self.state.phase()
    }

    pub fn accepts_keys(&self) -> bool {
        self.phase() == TerminalPhase::Interactive
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Advances intro timers. Returns the new phase if it changed.
    pub fn advance(&mut self, dt_s: f64) -> Option<TerminalPhase> {
        let before = self.phase();
        let next = match &mut self.state {
            PhaseState::Boot { shown, lines, pause } => {
                if let Some(p) = pause.as_mut() {
                    (p.advance(dt_s) > 0).then(|| bio_state(&self.config))
                } else {
                    let fired = lines.advance(dt_s) as usize;
                    *shown = (*shown + fired).min(BOOT_LINES.len());
                    if *shown == BOOT_LINES.len() {
                        // The line interval ticks once more, empty, before the pause.
                        lines.cancel();
                        let delay = self.config.boot_line_ms + self.config.boot_pause_ms;
                        *pause = Some(Ticker::timeout(millis(delay)));
                    }
                    None
                }
            }
            PhaseState::Bio {
                lead,
                typewriter,
                hold,
            } => {
                if let Some(h) = hold.as_mut() {
                    (h.advance(dt_s) > 0).then(|| cat_state(&self.config))
                } else if lead.is_running() {
                    lead.advance(dt_s);
                    None
                } else {
                    typewriter.advance(dt_s);
                    if typewriter.is_complete() {
                        // One closing tick after the last character, then the hold.
                        let delay = self.config.bio_char_ms + self.config.bio_hold_ms;
                        *hold = Some(Ticker::timeout(millis(delay)));
                    }
                    None
                }
            }
            PhaseState::Cat { frame, frames, done } => {
                let fired = frames.advance(dt_s) as usize;
                *frame = (*frame + fired) % CAT_FRAMES.len();
                if done.advance(dt_s) > 0 {
                    Some(PhaseState::Interactive)
                } else {
                    None
                }
            }
            PhaseState::Interactive => None,
        };

        if let Some(next) = next {
            self.state.cancel_timers();
            self.state = next;
        }
        let after = self.phase();
        (after != before).then_some(after)
    }

    /// Handles a key named like DOM `KeyboardEvent.key` values.
    pub fn key(&mut self, key: &str) -> KeyOutcome {
        if !self.accepts_keys() {
            return KeyOutcome::Ignored;
        }
        match key {
            "Enter" => {
                let cmd = self.input.trim().to_lowercase();
                let known = command_output(&cmd);
                let output = known
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Command not found: {cmd}"));
                self.history.push(format!("{PROMPT} {}", self.input));
                self.history.push(output);
                self.input.clear();
                if cmd == "clear" {
                    self.history.clear();
                }
                KeyOutcome::Ran {
                    known: known.is_some() || cmd == "clear",
                    command: cmd,
                }
            }
            "Backspace" => {
                self.input.pop();
                KeyOutcome::Edited
            }
            k if k.chars().count() == 1 => {
                self.input.push_str(k);
                KeyOutcome::Edited
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Lines currently on screen.
    pub fn screen(&self) -> Vec<String> {
        match &self.state {
            PhaseState::Boot { shown, .. } => {
                BOOT_LINES[..*shown].iter().map(|l| l.to_string()).collect()
            }
            PhaseState::Bio { typewriter, .. } => vec![typewriter.visible().to_string()],
            PhaseState::Cat { frame, .. } => {
                CAT_FRAMES[*frame].lines().map(str::to_string).collect()
            }
            PhaseState::Interactive => {
                let keep = self.config.visible_history;
                let start = self.history.len().saturating_sub(keep);
                let mut lines: Vec<String> = self.history[start..].to_vec();
                lines.push(format!("{PROMPT} {}_", self.input));
                lines
            }
        }
    }

    /// Jumps straight to interactive mode, cancelling intro timers.
    pub fn skip_intro(&mut self) {
        self.state.cancel_timers();
        self.state = PhaseState::Interactive;
    }
}

fn boot_state(config: &TerminalConfig) -> PhaseState {
    PhaseState::Boot {
        shown: 0,
        lines: Ticker::interval(millis(config.boot_line_ms)),
        pause: None,
    }
}

fn bio_state(config: &TerminalConfig) -> PhaseState {
    PhaseState::Bio {
        lead: Ticker::timeout(millis(config.bio_char_ms)),
        typewriter: Typewriter::new(BIO_TEXT, millis(config.bio_char_ms), 1),
        hold: None,
    }
}

fn cat_state(config: &TerminalConfig) -> PhaseState {
    PhaseState::Cat {
        frame: 0,
        frames: Ticker::interval(millis(config.cat_frame_ms)),
        done: Ticker::timeout(millis(config.cat_duration_ms)),
    }
}
