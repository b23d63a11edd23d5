use runtime::Ticker;

/// Character-by-character text reveal paced by a logical-clock interval.
///
/// The typewriter owns its ticker; cancelling it (or dropping the
/// typewriter) stops all further progress.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    total_chars: usize,
    revealed: usize,
    chars_per_tick: usize,
    ticker: Ticker,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval_s: f64, chars_per_tick: usize) -> Self {
        let text = text.into();
        let total_chars = text.chars().count();
        Self {
            text,
            total_chars,
            revealed: 0,
            chars_per_tick: chars_per_tick.max(1),
            ticker: Ticker::interval(interval_s),
        }
    }

    /// Returns `true` if more text became visible.
    pub fn advance(&mut self, dt_s: f64) -> bool {
        let ticks = self.ticker.advance(dt_s) as usize;
        if ticks == 0 {
            return false;
        }
        let before = self.revealed;
        self.revealed = (self.revealed + ticks * self.chars_per_tick).min(self.total_chars);
        if self.revealed == self.total_chars {
            self.ticker.cancel();
        }
        self.revealed != before
    }

    pub fn visible(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total_chars
    }

    /// Still ticking: neither complete nor cancelled.
    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub fn cancel(&mut self) {
        self.ticker.cancel();
    }

    pub fn restart(&mut self) {
        self.revealed = 0;
        self.ticker.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::Typewriter;

    #[test]
    fn reveals_fixed_chars_per_tick() {
        let mut tw = Typewriter::new("abcdefghij", 0.01, 3);
        assert_eq!(tw.visible(), "");
        assert!(tw.advance(0.01));
        assert_eq!(tw.visible(), "abc");
        tw.advance(0.02);
        assert_eq!(tw.visible(), "abcdefghi");
        tw.advance(0.01);
        assert_eq!(tw.visible(), "abcdefghij");
        assert!(tw.is_complete());
        assert!(!tw.is_running());
        assert!(!tw.advance(1.0));
    }

    #[test]
    fn slices_on_char_boundaries() {
        let mut tw = Typewriter::new("\u{2605}\u{2605}x", 0.01, 1);
        tw.advance(0.01);
        assert_eq!(tw.visible(), "\u{2605}");
        tw.advance(0.01);
        assert_eq!(tw.visible(), "\u{2605}\u{2605}");
    }

    #[test]
    fn cancel_stops_progress_and_restart_resets() {
        let mut tw = Typewriter::new("hello", 0.05, 1);
        tw.advance(0.05);
        tw.cancel();
        assert!(!tw.advance(1.0));
        assert_eq!(tw.visible(), "h");
        tw.restart();
        assert_eq!(tw.visible(), "");
        tw.advance(0.1);
        assert_eq!(tw.visible(), "he");
    }

    #[test]
    fn empty_text_is_complete() {
        let tw = Typewriter::new("", 0.05, 1);
        assert!(tw.is_complete());
        assert_eq!(tw.visible(), "");
    }
}
