use foundation::millis;
use tracing::debug;

use crate::config::ExpandedConfig;
use crate::content;
use crate::reveal::Typewriter;
use crate::section::SectionKind;

/// Reading view for the focused section.
///
/// Mounted when a card is selected and unmounted when it is closed. While
/// mounted it captures wheel input for its own scroll position.
#[derive(Debug, Clone)]
pub struct ExpandedView {
    section: SectionKind,
    typewriter: Typewriter,
    scroll: f64,
    max_scroll: f64,
    wheel_scale: f64,
    scrollbar_top: f64,
    scrollbar_travel: f64,
    mounted: bool,
}

impl ExpandedView {
    pub fn mount(section: SectionKind, config: &ExpandedConfig) -> Self {
        let text = content::text(section);
        let max_scroll = max_scroll_for(text, config);
        debug!(?section, max_scroll, "expanded view mounted");
        Self {
            section,
            typewriter: Typewriter::new(
                text,
                millis(config.reveal_interval_ms),
                config.reveal_chars_per_tick,
            ),
            scroll: 0.0,
            max_scroll,
            wheel_scale: config.wheel_scale,
            scrollbar_top: config.scrollbar_top,
            scrollbar_travel: config.scrollbar_travel,
            mounted: true,
        }
    }

    /// Cancels the reveal timer. The view must not change after this.
    pub fn unmount(&mut self) {
        self.typewriter.cancel();
        self.mounted = false;
        debug!(section = ?self.section, "expanded view unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn section(&self) -> SectionKind {
        self.section
    }

    pub fn advance(&mut self, dt_s: f64) {
        if self.mounted {
            self.typewriter.advance(dt_s);
        }
    }

    /// Applies a wheel delta to the content scroll, clamped to `[0, max_scroll]`.
    pub fn scroll_by(&mut self, wheel_delta: f64) {
        if !self.mounted || !wheel_delta.is_finite() {
            return;
        }
        self.scroll = (self.scroll + wheel_delta * self.wheel_scale).clamp(0.0, self.max_scroll);
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Vertical position of the scrollbar thumb.
    pub fn scrollbar_thumb_y(&self) -> f64 {
        let progress = if self.max_scroll > 0.0 {
            self.scroll / self.max_scroll
        } else {
            0.0
        };
        self.scrollbar_top - progress * self.scrollbar_travel
    }

    /// Starts the reveal over. Scroll position is kept.
    pub fn replay(&mut self) {
        if self.mounted {
            self.typewriter.restart();
        }
    }

    pub fn text(&self) -> &str {
        self.typewriter.visible()
    }

    pub fn is_revealing(&self) -> bool {
        self.typewriter.is_running()
    }

    /// Visible text plus a trailing cursor while the reveal is running.
    pub fn display_text(&self) -> String {
        let mut out = self.text().to_string();
        if self.is_revealing() {
            out.push('_');
        }
        out
    }
}

/// Lines after wrapping at `wrap_columns`; blank lines still take a row.
pub fn wrapped_line_count(text: &str, wrap_columns: usize) -> usize {
    let cols = wrap_columns.max(1);
    text.split('\n')
        .map(|line| line.chars().count().div_ceil(cols).max(1))
        .sum()
}

/// Scrollable distance: content height minus the visible window, never negative.
pub fn max_scroll_for(text: &str, config: &ExpandedConfig) -> f64 {
    let lines = wrapped_line_count(text, config.wrap_columns) as f64;
    let content_height = lines * config.font_size * config.line_height;
    (content_height - config.viewport_height).max(0.0)
}
