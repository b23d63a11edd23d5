/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Self = Time(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn advanced(self, dt_s: f64) -> Self {
        Time(self.0 + dt_s.max(0.0))
    }
}

/// Converts milliseconds, the unit the UI timers are authored in, to seconds.
pub fn millis(ms: f64) -> f64 {
    ms / 1000.0
}
