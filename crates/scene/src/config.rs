//! Tunables for every controller in the scene.
//!
//! All fields have defaults; a JSON file only needs to name the values it
//! overrides (`{"orbit": {"radius": 15.0}}`).

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "I/O error: {err}"),
            ConfigError::Parse(err) => write!(f, "Config parse error: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config value for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    pub orbit: OrbitConfig,
    pub focus: FocusConfig,
    pub carousel: CarouselConfig,
    pub expanded: ExpandedConfig,
    pub terminal: TerminalConfig,
    pub free_roam: FreeRoamConfig,
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub radius: f64,
    /// Peak vertical displacement of the bobbing wave.
    pub wave_amplitude: f64,
    /// Vertical bobs per full scroll pass.
    pub wave_cycles: f64,
    pub look_at: [f64; 3],
    /// Exponential smoothing rate (per second).
    pub rate: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 12.0,
            wave_amplitude: 2.0,
            wave_cycles: 2.0,
            look_at: [0.0, 0.0, 0.0],
            rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Where the expanded card is displayed.
    pub anchor: [f64; 3],
    /// Camera distance in front of the anchor along the card's forward axis.
    pub standoff: f64,
    pub transition_rate: f64,
    pub settled_rate: f64,
    pub convergence_threshold: f64,
    /// Transitions longer than this are force-snapped to their target.
    pub max_transition_s: f64,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            anchor: [0.0, 1.5, 9.0],
            standoff: 6.0,
            transition_rate: 4.0,
            settled_rate: 1.5,
            convergence_threshold: 0.1,
            max_transition_s: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub radius: f64,
    /// Full group revolutions per scroll pass.
    pub revolutions: u32,
    pub rotation_rate: f64,
    /// Group height before the reveal.
    pub hidden_y: f64,
    pub display_y: f64,
    /// Scroll offset at which the group reaches `display_y`.
    pub reveal_offset: f64,
    pub rise_rate: f64,
    pub hover_scale: f64,
    pub hover_scale_rate: f64,
    pub hover_tilt: f64,
    pub hover_tilt_rate: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            radius: 9.0,
            revolutions: 2,
            rotation_rate: 5.0,
            hidden_y: -15.0,
            display_y: 0.0,
            reveal_offset: 0.25,
            rise_rate: 5.0,
            hover_scale: 1.05,
            hover_scale_rate: 10.0,
            hover_tilt: 0.05,
            hover_tilt_rate: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandedConfig {
    pub reveal_interval_ms: f64,
    pub reveal_chars_per_tick: usize,
    /// World units scrolled per wheel delta unit.
    pub wheel_scale: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub wrap_columns: usize,
    pub viewport_height: f64,
    /// Travel of the scrollbar thumb, top to bottom.
    pub scrollbar_travel: f64,
    pub scrollbar_top: f64,
}

impl Default for ExpandedConfig {
    fn default() -> Self {
        Self {
            reveal_interval_ms: 5.0,
            reveal_chars_per_tick: 5,
            wheel_scale: 0.005,
            font_size: 0.25,
            line_height: 1.2,
            wrap_columns: 52,
            viewport_height: 5.5,
            scrollbar_travel: 5.8,
            scrollbar_top: 2.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub boot_line_ms: f64,
    pub boot_pause_ms: f64,
    pub bio_char_ms: f64,
    pub bio_hold_ms: f64,
    pub cat_frame_ms: f64,
    pub cat_duration_ms: f64,
    pub visible_history: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            boot_line_ms: 500.0,
            boot_pause_ms: 500.0,
            bio_char_ms: 50.0,
            bio_hold_ms: 3000.0,
            cat_frame_ms: 500.0,
            cat_duration_ms: 5000.0,
            visible_history: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeRoamConfig {
    pub speed: f64,
    pub turbo_speed: f64,
    /// Radians per pixel of pointer drag.
    pub look_sensitivity: f64,
}

impl Default for FreeRoamConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            turbo_speed: 30.0,
            look_sensitivity: 0.005,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 55.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let payload = fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&payload)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("orbit.radius", self.orbit.radius)?;
        positive("orbit.rate", self.orbit.rate)?;
        positive("focus.transition_rate", self.focus.transition_rate)?;
        positive("focus.settled_rate", self.focus.settled_rate)?;
        positive("focus.convergence_threshold", self.focus.convergence_threshold)?;
        positive("focus.max_transition_s", self.focus.max_transition_s)?;
        positive("carousel.radius", self.carousel.radius)?;
        positive("carousel.reveal_offset", self.carousel.reveal_offset)?;
        if self.carousel.revolutions == 0 {
            return Err(ConfigError::Invalid {
                field: "carousel.revolutions",
                reason: "must be at least 1".to_string(),
            });
        }
        positive("expanded.reveal_interval_ms", self.expanded.reveal_interval_ms)?;
        if self.expanded.reveal_chars_per_tick == 0 || self.expanded.wrap_columns == 0 {
            return Err(ConfigError::Invalid {
                field: "expanded",
                reason: "reveal_chars_per_tick and wrap_columns must be non-zero".to_string(),
            });
        }
        positive("projection.near", self.projection.near)?;
        if self.projection.far <= self.projection.near {
            return Err(ConfigError::Invalid {
                field: "projection.far",
                reason: format!("must exceed near ({})", self.projection.near),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}
